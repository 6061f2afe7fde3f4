//! Database models for the Stock Report Platform backend
//!
//! Re-exports models from the shared crate; backend-specific row types
//! live next to the services that query them.

pub use shared::models::*;
