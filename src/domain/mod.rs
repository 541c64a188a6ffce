//! Domain layer types and invariants.

pub mod articles;
pub mod error;
pub mod fragment;
pub mod layout;
pub mod sections;
pub mod types;
