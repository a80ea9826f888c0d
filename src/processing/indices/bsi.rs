// src/processing/indices/bsi.rs
use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::processing::indices::{bands, required_band, IndexCalculator};
use crate::raster::{is_nodata, Composite, IndexRaster, NODATA};

/// Bare Soil Index (BSI) calculator
/// BSI = ((SWIR + RED) - (NIR + BLUE)) / ((SWIR + RED) + (NIR + BLUE))
pub struct BSI {
    name: String,
}

impl BSI {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| "BSI".to_string()),
        }
    }
}

impl Default for BSI {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IndexCalculator for BSI {
    fn calculate(&self, composite: &Composite) -> Result<IndexRaster, AnalysisError> {
        let swir = required_band(composite, bands::SWIR)?;
        let red = required_band(composite, bands::RED)?;
        let nir = required_band(composite, bands::NIR)?;
        let blue = required_band(composite, bands::BLUE)?;

        let mut result_data = vec![0.0f32; composite.grid().len()];
        result_data.par_iter_mut().enumerate().for_each(|(i, result)| {
            let swir_val = swir[i];
            let red_val = red[i];
            let nir_val = nir[i];
            let blue_val = blue[i];

            *result = if is_nodata(swir_val)
                || is_nodata(red_val)
                || is_nodata(nir_val)
                || is_nodata(blue_val)
            {
                NODATA
            } else {
                let numerator = (swir_val + red_val) - (nir_val + blue_val);
                let denominator = (swir_val + red_val) + (nir_val + blue_val);
                if denominator.abs() > 1e-6 {
                    (numerator / denominator).clamp(-1.0, 1.0)
                } else {
                    NODATA
                }
            };
        });

        Ok(IndexRaster::new(self.name.clone(), composite.grid(), result_data))
    }

    fn required_bands(&self) -> &[&'static str] {
        &[bands::SWIR, bands::RED, bands::NIR, bands::BLUE]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
