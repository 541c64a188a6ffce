use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::settings::OptionError, domain::error::DomainError, infra::error::InfraError,
};

/// Flattened view of an error and its source chain, used for console output.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    pub fn summary(&self) -> String {
        self.messages.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Options(#[from] OptionError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Domain(DomainError::Validation { .. })
            | AppError::Domain(DomainError::PageOutOfRange { .. })
            | AppError::Domain(DomainError::DuplicateArticle { .. })
            | AppError::Options(_)
            | AppError::Validation(_) => 2,
            AppError::Domain(DomainError::EmptyArchive) => 3,
            AppError::Infra(InfraError::Io(_)) | AppError::Infra(InfraError::Html { .. }) => 4,
            AppError::Infra(_) | AppError::Unexpected(_) => 1,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
