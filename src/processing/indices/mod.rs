// src/processing/indices/mod.rs
pub mod bsi;
pub mod ndvi;

use crate::error::AnalysisError;
use crate::raster::{Composite, IndexRaster};

// Re-export indices
pub use bsi::BSI;
pub use ndvi::NDVI;

/// Sentinel-2 band names used by the shipped indices.
pub mod bands {
    pub const BLUE: &str = "B02";
    pub const RED: &str = "B04";
    pub const NIR: &str = "B08";
    pub const SWIR: &str = "B11";
}

/// Trait for spectral index calculators.
///
/// Implementations are pure functions of the composite: no side effects, and
/// any pixel with a NODATA input band stays NODATA in the output, never a
/// synthetic zero.
pub trait IndexCalculator: Send + Sync {
    /// Derive the index raster from the composite's named bands.
    fn calculate(&self, composite: &Composite) -> Result<IndexRaster, AnalysisError>;

    /// Band names the calculator reads from the composite.
    fn required_bands(&self) -> &[&'static str];

    /// Output raster name.
    fn name(&self) -> &str;
}

/// Fetch a required band or report the composite as malformed upstream data.
pub(crate) fn required_band<'a>(
    composite: &'a Composite,
    band: &'static str,
) -> Result<&'a [f32], AnalysisError> {
    composite.band(band).ok_or_else(|| {
        AnalysisError::Upstream(crate::catalog::CatalogError::MissingBand {
            scene: "median composite".to_string(),
            band: band.to_string(),
        })
    })
}
