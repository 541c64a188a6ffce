//! Shared domain value types for archive pagination.

use std::{fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Number of articles shown on one archive page.
pub const PER_PAGE: usize = 3;

/// Suffix of the sidebar sentinel's DOM id; an article with this id would collide with it.
pub const RESERVED_ARTICLE_ID: &str = "bottom";

/// Stable identifier of an article block within the archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("article id must not be empty"));
        }
        if trimmed == RESERVED_ARTICLE_ID {
            return Err(DomainError::validation(format!(
                "article id `{RESERVED_ARTICLE_ID}` is reserved for the sidebar sentinel"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Synthetic id for articles rendered without an `id` attribute.
    pub fn synthetic(position: usize) -> Self {
        Self(format!("article-{}", position + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-indexed page number as shown on pagination controls and in the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Page number for a 0-indexed page position.
    pub fn from_index(index: usize) -> Option<Self> {
        let value = u32::try_from(index.checked_add(1)?).ok()?;
        Self::new(value)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// 0-indexed page position.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visibility assigned to one article for the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ArticleVisibility {
    Hidden,
    Shown { last: bool },
}

impl ArticleVisibility {
    pub fn is_shown(self) -> bool {
        matches!(self, ArticleVisibility::Shown { .. })
    }
}
