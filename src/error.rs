// src/error.rs
use crate::catalog::CatalogError;

/// Failure taxonomy for one analysis request.
///
/// Every variant aborts the whole request; partial results are never
/// returned. None of these are retryable by the pipeline itself.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no suitable imagery found for the selected area and date range")]
    NoImageryFound,

    #[error("no pixels found for analysis; the polygon may be too small or off-land")]
    NoAnalyzablePixels,

    #[error("no time-series data available at {cadence} cadence for the selected area and date range")]
    NoTimeSeriesData { cadence: String },

    #[error("unknown cadence '{token}'; expected biweekly, monthly or quarterly")]
    InvalidCadence { token: String },

    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("imagery catalog failure: {0}")]
    Upstream(#[from] CatalogError),
}
