//! Application services: pagination, fragment routing and sidebar synchronisation.

pub mod archive;
pub mod error;
pub mod pagination;
pub mod router;
pub mod settings;
pub mod sidebar;
