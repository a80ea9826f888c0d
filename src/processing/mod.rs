// src/processing/mod.rs
pub mod classify;
pub mod indices;

// Re-export main components
pub use classify::{AreaBreakdown, TierSet, ZonalClassifier};
pub use indices::IndexCalculator;
