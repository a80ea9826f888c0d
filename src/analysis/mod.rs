// src/analysis/mod.rs
pub mod series;
pub mod single;

// Re-export main components
pub use series::{TimeSeriesAnalyzer, TimeSeriesPoint, TimeSeriesReport};
pub use single::{PreviewSpec, SinglePeriodAnalyzer, SingleReport};

/// Maximum acceptable scene cloud cover, percent.
pub const CLOUD_COVER_CEILING: f32 = 20.0;

/// Linear ground sampling distance for region reductions, meters.
pub const GROUND_SAMPLING_METERS: f64 = 10.0;
