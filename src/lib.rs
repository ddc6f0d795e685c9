// Library interface for VitalTrend modules
// This allows integration tests to access the core functionality

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod report;
pub mod trackers;
pub mod window;

// Re-export commonly used types for convenience
pub use analyzer::TimeSeriesAnalyzer;
pub use classify::Classifier;
pub use error::{Result, VitalError};
pub use ingest::RecordSchema;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{
    AggregatedPoint, Classification, CustomRange, HealthRecord, ResolvedWindow, SummaryStats,
    TimeWindow,
};
pub use trackers::Tracker;
pub use window::{filter_by_window, resolve_window, WindowError};
