// src/catalog/memory.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CatalogError, ImageryCatalog, SceneCollection, SceneMeta};
use crate::geometry::AreaOfInterest;
use crate::period::DateRange;
use crate::raster::{is_nodata, median_stack, Composite, GridShape, IndexRaster, Mask};

/// In-memory imagery catalog on a single shared grid.
///
/// Serves as the serde-loadable catalog format behind the CLI and as the
/// test fixture. All scenes share one grid; reductions sample pixel centers
/// against the AOI and weight each pixel by scale².
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GriddedCatalog {
    grid: GridShape,
    scenes: Vec<StoredScene>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredScene {
    #[serde(flatten)]
    meta: SceneMeta,
    bands: HashMap<String, Vec<f32>>,
}

impl GriddedCatalog {
    pub fn new(grid: GridShape) -> Self {
        Self {
            grid,
            scenes: Vec::new(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        let catalog: GriddedCatalog = serde_json::from_str(&raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for scene in &self.scenes {
            for (band, data) in &scene.bands {
                if data.len() != self.grid.len() {
                    return Err(CatalogError::Malformed(format!(
                        "scene '{}' band '{}' has {} samples, grid expects {}",
                        scene.meta.id,
                        band,
                        data.len(),
                        self.grid.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn add_scene(
        &mut self,
        id: impl Into<String>,
        acquired: chrono::NaiveDate,
        cloud_cover: f32,
        bands: HashMap<String, Vec<f32>>,
    ) {
        self.scenes.push(StoredScene {
            meta: SceneMeta {
                id: id.into(),
                acquired,
                cloud_cover,
            },
            bands,
        });
    }

    fn stored(&self, id: &str) -> Result<&StoredScene, CatalogError> {
        self.scenes
            .iter()
            .find(|s| s.meta.id == id)
            .ok_or_else(|| CatalogError::UnknownScene(id.to_string()))
    }
}

impl ImageryCatalog for GriddedCatalog {
    fn find_scenes(
        &self,
        aoi: &AreaOfInterest,
        range: &DateRange,
        cloud_ceiling: f32,
    ) -> Result<SceneCollection, CatalogError> {
        if !aoi.bounding_box().intersects(&self.grid.extent()) {
            return Ok(SceneCollection::default());
        }
        let matches = self
            .scenes
            .iter()
            .filter(|s| range.contains(s.meta.acquired))
            .filter(|s| s.meta.cloud_cover < cloud_ceiling)
            .map(|s| s.meta.clone())
            .sorted_by(|a, b| a.cloud_cover.total_cmp(&b.cloud_cover))
            .collect::<Vec<_>>();
        debug!(count = matches.len(), range = %range, "catalog scene query");
        Ok(SceneCollection::new(matches))
    }

    fn median(
        &self,
        collection: &SceneCollection,
        _aoi: &AreaOfInterest,
    ) -> Result<Composite, CatalogError> {
        let first = collection
            .scenes()
            .first()
            .ok_or_else(|| CatalogError::Malformed("median of an empty collection".to_string()))?;
        let band_names: Vec<String> = self.stored(&first.id)?.bands.keys().cloned().collect();

        let mut bands = HashMap::new();
        for name in &band_names {
            let mut layers = Vec::with_capacity(collection.len());
            for meta in collection.scenes() {
                let scene = self.stored(&meta.id)?;
                let data = scene.bands.get(name).ok_or_else(|| CatalogError::MissingBand {
                    scene: meta.id.clone(),
                    band: name.clone(),
                })?;
                layers.push(data.as_slice());
            }
            bands.insert(name.clone(), median_stack(&layers, self.grid.len()));
        }
        Ok(Composite::new(self.grid, bands))
    }

    fn reduce_mean(
        &self,
        raster: &IndexRaster,
        aoi: &AreaOfInterest,
        _scale: f64,
    ) -> Result<Option<f64>, CatalogError> {
        let grid = raster.grid();
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for (i, &value) in raster.data().iter().enumerate() {
            if is_nodata(value) {
                continue;
            }
            let (x, y) = grid.pixel_center(i);
            if aoi.contains(x, y) {
                sum += f64::from(value);
                count += 1;
            }
        }
        if count == 0 {
            Ok(None)
        } else {
            Ok(Some(sum / count as f64))
        }
    }

    fn reduce_area(
        &self,
        mask: &Mask,
        aoi: &AreaOfInterest,
        scale: f64,
    ) -> Result<Option<f64>, CatalogError> {
        let grid = mask.grid();
        let mut covered = 0usize;
        let mut masked = 0usize;
        for (i, &set) in mask.data().iter().enumerate() {
            let (x, y) = grid.pixel_center(i);
            if aoi.contains(x, y) {
                covered += 1;
                if set {
                    masked += 1;
                }
            }
        }
        // No pixel center inside the AOI means the reduction is undefined,
        // not zero.
        if covered == 0 {
            Ok(None)
        } else {
            Ok(Some(masked as f64 * scale * scale))
        }
    }
}
