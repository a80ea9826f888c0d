// src/catalog/mod.rs
pub mod memory;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geometry::AreaOfInterest;
use crate::period::DateRange;
use crate::raster::{Composite, IndexRaster, Mask};

pub use memory::GriddedCatalog;

/// Scene descriptor as returned by a catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMeta {
    pub id: String,
    pub acquired: NaiveDate,
    /// Percent of the scene obscured by cloud, 0..100.
    pub cloud_cover: f32,
}

/// Query result, ordered by ascending cloud cover.
#[derive(Debug, Clone, Default)]
pub struct SceneCollection {
    scenes: Vec<SceneMeta>,
}

impl SceneCollection {
    /// Callers must pass scenes already sorted by ascending cloud cover.
    pub fn new(scenes: Vec<SceneMeta>) -> Self {
        debug_assert!(scenes.windows(2).all(|w| w[0].cloud_cover <= w[1].cloud_cover));
        Self { scenes }
    }

    pub fn scenes(&self) -> &[SceneMeta] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Best single observation. The collection is cloud-sorted, so this is
    /// the first entry.
    pub fn least_cloudy(&self) -> Option<&SceneMeta> {
        self.scenes.first()
    }

    /// Restrict to scenes acquired inside [range.start, range.end), keeping
    /// the cloud-cover ordering.
    pub fn filter_date(&self, range: &DateRange) -> SceneCollection {
        SceneCollection {
            scenes: self
                .scenes
                .iter()
                .filter(|s| range.contains(s.acquired))
                .cloned()
                .collect(),
        }
    }
}

/// Failures raised by an imagery catalog implementation. The analysis layer
/// wraps these as upstream errors; callers never match on them directly.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("scene '{scene}' is missing required band '{band}'")]
    MissingBand { scene: String, band: String },

    #[error("unknown scene id '{0}'")]
    UnknownScene(String),

    #[error("malformed catalog: {0}")]
    Malformed(String),

    #[error("catalog I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The external imagery collaborator: scene search, median compositing and
/// region reductions over an area of interest.
///
/// Reductions return `Ok(None)` when no defined sample falls inside the AOI
/// at the given scale; that is an answer, not an error, and callers must
/// exclude it from totals rather than coalesce it to zero.
pub trait ImageryCatalog {
    /// Scenes intersecting the AOI within the date range with cloud cover
    /// strictly below `cloud_ceiling`, sorted by ascending cloud cover.
    fn find_scenes(
        &self,
        aoi: &AreaOfInterest,
        range: &DateRange,
        cloud_ceiling: f32,
    ) -> Result<SceneCollection, CatalogError>;

    /// Per-pixel median composite across every scene in the collection.
    fn median(
        &self,
        collection: &SceneCollection,
        aoi: &AreaOfInterest,
    ) -> Result<Composite, CatalogError>;

    /// Mean of defined raster values at pixel centers inside the AOI,
    /// sampled at `scale` meters.
    fn reduce_mean(
        &self,
        raster: &IndexRaster,
        aoi: &AreaOfInterest,
        scale: f64,
    ) -> Result<Option<f64>, CatalogError>;

    /// Area-weighted sum over the mask: scale² per masked pixel whose center
    /// falls inside the AOI.
    fn reduce_area(
        &self,
        mask: &Mask,
        aoi: &AreaOfInterest,
        scale: f64,
    ) -> Result<Option<f64>, CatalogError>;
}
