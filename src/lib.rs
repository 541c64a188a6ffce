//! Folio: client-side pagination for static blog archives.
//!
//! The archive listing is split into pages of [`domain::types::PER_PAGE`]
//! articles, the active page is mirrored in the URL fragment (`#!/<n>`), and a
//! sidebar lists the visible headings with the one currently being read
//! highlighted. The controller in [`application::archive`] is pure; the
//! browser adapter in `infra::dom` (wasm32) applies its effects to the live
//! document, and the `folio` binary runs it headless over rendered HTML.

pub mod application;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
