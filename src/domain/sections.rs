//! Sidebar entries mirroring the headings of the visible articles.

use serde::Serialize;

use super::{articles::ArticleRecord, types::ArticleId};

/// DOM id prefix for rendered sidebar entries.
pub const SIDEBAR_ENTRY_PREFIX: &str = "articles-sidebar-item-";

/// A sidebar navigation entry. Holds a copy of the heading, never a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub entry_id: String,
    pub article: ArticleId,
    pub heading_html: String,
    pub heading_text: String,
}

impl SidebarEntry {
    pub fn for_article(article: &ArticleRecord) -> Self {
        Self {
            entry_id: format!("{SIDEBAR_ENTRY_PREFIX}{}", article.id),
            article: article.id.clone(),
            heading_html: article.heading_html.clone(),
            heading_text: article.heading_text.clone(),
        }
    }
}

/// The single highlighted sidebar item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "article")]
pub enum ActiveItem {
    #[default]
    None,
    Entry(ArticleId),
    Bottom,
}

impl ActiveItem {
    pub fn is_bottom(&self) -> bool {
        matches!(self, ActiveItem::Bottom)
    }

    pub fn article(&self) -> Option<&ArticleId> {
        match self {
            ActiveItem::Entry(id) => Some(id),
            _ => None,
        }
    }
}
