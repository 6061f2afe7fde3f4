//! Business logic services for the Stock Report Platform backend

pub mod report;
pub mod report_config;
pub mod stock;

pub use report::ReportService;
pub use report_config::ReportConfigService;
pub use stock::StockService;
