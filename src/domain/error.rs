use thiserror::Error;

use super::types::{ArticleId, PageNumber};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("archive contains no articles")]
    EmptyArchive,
    #[error("page {page} is outside 1..={page_count}")]
    PageOutOfRange { page: PageNumber, page_count: usize },
    #[error("article `{id}` appears more than once")]
    DuplicateArticle { id: ArticleId },
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
