//! Period aggregation and trend building.

pub mod service;
pub mod types;

pub use service::{DEFAULT_TREND_WINDOW, ReportService};
pub use types::{AggregateRow, MonthlySummary, PeriodSummary, TrendPoint};
