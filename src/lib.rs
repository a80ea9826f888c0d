// src/lib.rs
pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod geometry;
pub mod period;
pub mod processing;
pub mod raster;
pub mod utils;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
