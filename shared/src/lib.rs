//! Shared types and models for the Stock Report Platform
//!
//! This crate contains types shared between the backend report service
//! and the report view controller.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
