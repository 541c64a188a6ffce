//! Infrastructure adapters and runtime bootstrap.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod html;
pub mod telemetry;
