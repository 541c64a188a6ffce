//! The ordered article listing captured when the archive loads.

use std::collections::HashSet;

use serde::Serialize;

use super::{error::DomainError, types::ArticleId};

/// One article block of the archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub id: ArticleId,
    /// Inner markup of the article heading, copied verbatim into sidebar entries.
    pub heading_html: String,
    pub heading_text: String,
}

impl ArticleRecord {
    pub fn new(id: ArticleId, heading_html: impl Into<String>, heading_text: impl Into<String>) -> Self {
        let heading_text = heading_text.into();
        let normalized = heading_text.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            id,
            heading_html: heading_html.into(),
            heading_text: normalized,
        }
    }
}

/// Articles in document order. The count never changes after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleList {
    records: Vec<ArticleRecord>,
}

impl ArticleList {
    pub fn new(records: Vec<ArticleRecord>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(DomainError::DuplicateArticle {
                    id: record.id.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ArticleRecord> {
        self.records.get(index)
    }

    pub fn position(&self, id: &ArticleId) -> Option<usize> {
        self.records.iter().position(|record| &record.id == id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ArticleRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ArticleRecord {
        ArticleRecord::new(ArticleId::new(id).expect("id"), id, id)
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ArticleList::new(vec![record("a"), record("b"), record("a")])
            .expect_err("duplicate rejected");
        assert!(matches!(err, DomainError::DuplicateArticle { id } if id.as_str() == "a"));
    }

    #[test]
    fn heading_text_whitespace_is_collapsed() {
        let article = ArticleRecord::new(
            ArticleId::synthetic(0),
            "<a href=\"/p\">Hello\n   world</a>",
            "  Hello\n   world ",
        );
        assert_eq!(article.heading_text, "Hello world");
    }

    #[test]
    fn position_follows_document_order() {
        let list = ArticleList::new(vec![record("a"), record("b")]).expect("list");
        let id = ArticleId::new("b").expect("id");
        assert_eq!(list.position(&id), Some(1));
        assert_eq!(list.len(), 2);
    }
}
