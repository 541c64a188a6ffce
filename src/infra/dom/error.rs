//! Errors crossing into JavaScript.

use wasm_bindgen::prelude::*;

use crate::{application::settings::OptionError, infra::error::InfraError};

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid `mount` options.
    Options,
    /// The document does not satisfy the archive contract.
    Dom,
    /// Anything else.
    Unknown,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Options => "OPTIONS_ERROR",
            ErrorCode::Dom => "DOM_ERROR",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

/// Converted to a JS `Error` with a `code` property.
#[derive(Debug)]
pub struct FolioError {
    code: ErrorCode,
    message: String,
}

impl FolioError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn options(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Options, message)
    }

    pub fn dom(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Dom, message)
    }
}

impl From<OptionError> for FolioError {
    fn from(err: OptionError) -> Self {
        Self::options(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for FolioError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::options(err.to_string())
    }
}

impl From<InfraError> for FolioError {
    fn from(err: InfraError) -> Self {
        let code = match &err {
            InfraError::Dom { .. } => ErrorCode::Dom,
            InfraError::Configuration { .. } => ErrorCode::Options,
            _ => ErrorCode::Unknown,
        };
        Self::new(code, err.to_string())
    }
}

impl From<FolioError> for JsValue {
    fn from(err: FolioError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(&js_error, &"code".into(), &JsValue::from_str(err.code.as_str())).ok();
        js_error.into()
    }
}
