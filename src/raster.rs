// src/raster.rs
use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Sentinel for undefined pixels inside rasters. Region reductions return
/// `Option<f64>` instead; the sentinel never leaves the raster layer.
pub const NODATA: f32 = -999.0;

pub fn is_nodata(value: f32) -> bool {
    value == NODATA || value.is_nan()
}

/// Regular north-up grid in the AOI's coordinate space. `origin_x`/`origin_y`
/// is the top-left corner; rows advance south.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_size: f64,
}

impl GridShape {
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Center coordinate of pixel `i` in row-major order.
    pub fn pixel_center(&self, i: usize) -> (f64, f64) {
        let col = i % self.width;
        let row = i / self.width;
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_size,
            self.origin_y - (row as f64 + 0.5) * self.pixel_size,
        )
    }

    pub fn extent(&self) -> crate::geometry::BoundingBox {
        crate::geometry::BoundingBox {
            min_lon: self.origin_x,
            min_lat: self.origin_y - self.height as f64 * self.pixel_size,
            max_lon: self.origin_x + self.width as f64 * self.pixel_size,
            max_lat: self.origin_y,
        }
    }
}

/// Multi-band raster blended from one scene collection. Request-scoped;
/// never cached across analyses.
#[derive(Debug, Clone)]
pub struct Composite {
    grid: GridShape,
    bands: HashMap<String, Vec<f32>>,
}

impl Composite {
    pub fn new(grid: GridShape, bands: HashMap<String, Vec<f32>>) -> Self {
        debug_assert!(bands.values().all(|b| b.len() == grid.len()));
        Self { grid, bands }
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn band(&self, name: &str) -> Option<&[f32]> {
        self.bands.get(name).map(Vec::as_slice)
    }
}

/// Named per-pixel scalar derived from a composite (NDVI, BSI, ...).
/// Values outside the index formula's domain carry NODATA.
#[derive(Debug, Clone)]
pub struct IndexRaster {
    name: String,
    grid: GridShape,
    data: Vec<f32>,
}

impl IndexRaster {
    pub fn new(name: impl Into<String>, grid: GridShape, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), grid.len());
        Self {
            name: name.into(),
            grid,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Boolean mask of pixels with a defined value inside [lower, upper).
    /// NODATA pixels belong to no mask.
    pub fn interval_mask(&self, lower: f32, upper: f32) -> Mask {
        let data = self
            .data
            .iter()
            .map(|&v| !is_nodata(v) && v >= lower && v < upper)
            .collect();
        Mask {
            grid: self.grid,
            data,
        }
    }
}

/// Boolean raster sharing an index raster's grid.
#[derive(Debug, Clone)]
pub struct Mask {
    grid: GridShape,
    data: Vec<bool>,
}

impl Mask {
    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }
}

/// Per-pixel median across a stack of equally shaped band buffers, skipping
/// NODATA inputs. A pixel with no defined input stays NODATA.
pub fn median_stack(layers: &[&[f32]], len: usize) -> Vec<f32> {
    (0..len)
        .into_par_iter()
        .map(|i| {
            let mut values: Vec<f32> = layers
                .iter()
                .map(|layer| layer[i])
                .filter(|&v| !is_nodata(v))
                .collect();
            if values.is_empty() {
                return NODATA;
            }
            values.sort_by(|a, b| a.total_cmp(b));
            let mid = values.len() / 2;
            if values.len() % 2 == 1 {
                values[mid]
            } else {
                (values[mid - 1] + values[mid]) / 2.0
            }
        })
        .collect()
}

/// Per-pixel median across index rasters sharing one grid. None for an
/// empty stack.
pub fn median_raster(name: &str, rasters: &[&IndexRaster]) -> Option<IndexRaster> {
    let first = rasters.first()?;
    let grid = first.grid();
    debug_assert!(rasters.iter().all(|r| r.grid() == grid));
    let layers: Vec<&[f32]> = rasters.iter().map(|r| r.data()).collect();
    Some(IndexRaster::new(name, grid, median_stack(&layers, grid.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_skips_nodata_per_pixel() {
        let a = vec![0.1, NODATA, 0.5, NODATA];
        let b = vec![0.3, 0.2, NODATA, NODATA];
        let c = vec![0.5, 0.4, 0.7, NODATA];
        let out = median_stack(&[&a, &b, &c], 4);
        assert_eq!(out[0], 0.3);
        assert!((out[1] - 0.3).abs() < 1e-6); // median of [0.2, 0.4]
        assert!((out[2] - 0.6).abs() < 1e-6); // median of [0.5, 0.7]
        assert_eq!(out[3], NODATA);
    }

    #[test]
    fn median_raster_blends_stacks_and_rejects_empty() {
        let grid = GridShape {
            width: 2,
            height: 1,
            origin_x: 0.0,
            origin_y: 1.0,
            pixel_size: 1.0,
        };
        let a = IndexRaster::new("NDVI", grid, vec![1.0, 0.2]);
        let b = IndexRaster::new("NDVI", grid, vec![0.5, NODATA]);
        let blended = median_raster("NDVI", &[&a, &b]).unwrap();
        assert_eq!(blended.data(), &[0.75, 0.2]);
        assert!(median_raster("NDVI", &[]).is_none());
    }

    #[test]
    fn interval_mask_excludes_nodata() {
        let grid = GridShape {
            width: 2,
            height: 2,
            origin_x: 0.0,
            origin_y: 2.0,
            pixel_size: 1.0,
        };
        let raster = IndexRaster::new("NDVI", grid, vec![0.1, 0.2, 0.5, NODATA]);
        let mask = raster.interval_mask(0.2, 0.5);
        assert_eq!(mask.data(), &[false, true, false, false]);
    }

    #[test]
    fn pixel_centers_walk_the_grid() {
        let grid = GridShape {
            width: 2,
            height: 2,
            origin_x: 10.0,
            origin_y: 40.0,
            pixel_size: 0.5,
        };
        assert_eq!(grid.pixel_center(0), (10.25, 39.75));
        assert_eq!(grid.pixel_center(3), (10.75, 39.25));
    }
}
