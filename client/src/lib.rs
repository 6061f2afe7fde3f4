//! Report view controller for the Stock Report Platform
//!
//! Drives the product/variant grid on behalf of a host UI:
//! - configuration + report data loading through a pluggable transport
//! - local search, quantity-bucket and config-driven filtering
//! - attribute matrix derivation for two-axis configurations
//! - pagination state and per-variant detail lookup for a modal view

mod controller;
mod error;
mod filters;
mod matrix;
mod notify;
mod transport;

pub use controller::{
    AttributeDisplay, FetchTicket, ReportController, SearchToken, VariantDetails, ViewState,
    SEARCH_DEBOUNCE,
};
pub use error::ClientError;
pub use filters::apply_filters;
pub use matrix::{build_attribute_matrix, AttributeMatrix, MatrixCell, MatrixRow};
pub use notify::{NotificationLevel, Notifier, NullNotifier};
pub use transport::{HttpTransport, ReportQuery, ReportTransport};
