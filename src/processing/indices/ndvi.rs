// src/processing/indices/ndvi.rs
use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::processing::indices::{bands, required_band, IndexCalculator};
use crate::raster::{is_nodata, Composite, IndexRaster, NODATA};

/// Normalized Difference Vegetation Index calculator
/// NDVI = (NIR - RED) / (NIR + RED)
pub struct NDVI {
    name: String,
}

impl NDVI {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| "NDVI".to_string()),
        }
    }
}

impl Default for NDVI {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IndexCalculator for NDVI {
    fn calculate(&self, composite: &Composite) -> Result<IndexRaster, AnalysisError> {
        let nir = required_band(composite, bands::NIR)?;
        let red = required_band(composite, bands::RED)?;

        let mut result_data = vec![0.0f32; composite.grid().len()];
        result_data.par_iter_mut().enumerate().for_each(|(i, result)| {
            let nir_val = nir[i];
            let red_val = red[i];

            *result = if is_nodata(nir_val) || is_nodata(red_val) {
                NODATA
            } else {
                let denominator = nir_val + red_val;
                if denominator.abs() > 1e-6 {
                    ((nir_val - red_val) / denominator).clamp(-1.0, 1.0)
                } else {
                    NODATA
                }
            };
        });

        Ok(IndexRaster::new(self.name.clone(), composite.grid(), result_data))
    }

    fn required_bands(&self) -> &[&'static str] {
        &[bands::NIR, bands::RED]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
