// src/geometry.rs
use geo::{BoundingRect, Contains};
use geo_types::{Coord, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Closed land polygon in lon/lat, read-only for the lifetime of one
/// analysis request.
#[derive(Debug, Clone)]
pub struct AreaOfInterest {
    polygon: Polygon<f64>,
    bbox: BoundingBox,
}

impl AreaOfInterest {
    /// Build an AOI from GeoJSON-style rings (outer ring first, then holes).
    /// An open ring is closed implicitly; a ring needs at least 3 distinct
    /// vertices to bound any area.
    pub fn from_rings(rings: &[Vec<[f64; 2]>]) -> Result<Self, AnalysisError> {
        let Some((outer, holes)) = rings.split_first() else {
            return Err(AnalysisError::InvalidInput(
                "polygon has no rings".to_string(),
            ));
        };

        let exterior = Self::ring_to_line_string(outer)?;
        let interiors = holes
            .iter()
            .map(|ring| Self::ring_to_line_string(ring))
            .collect::<Result<Vec<_>, _>>()?;
        let polygon = Polygon::new(exterior, interiors);

        let rect = polygon.bounding_rect().ok_or_else(|| {
            AnalysisError::InvalidInput("polygon has no spatial extent".to_string())
        })?;
        let bbox = BoundingBox {
            min_lon: rect.min().x,
            min_lat: rect.min().y,
            max_lon: rect.max().x,
            max_lat: rect.max().y,
        };

        Ok(Self { polygon, bbox })
    }

    fn ring_to_line_string(ring: &[[f64; 2]]) -> Result<LineString<f64>, AnalysisError> {
        let mut coords: Vec<Coord<f64>> = ring
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();

        // Drop a duplicated closing vertex before counting distinct ones.
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }

        let mut distinct = coords.clone();
        distinct.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(AnalysisError::InvalidInput(format!(
                "polygon ring needs at least 3 distinct vertices, got {}",
                distinct.len()
            )));
        }

        Ok(LineString::from(coords))
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Point-in-polygon test used by region reductions (pixel centers).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.polygon.contains(&Point::new(x, y))
    }

    /// Min/max lon/lat of the outer ring, fixed at construction.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

/// AOI extent reported back to the caller for map framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lon <= other.max_lon
            && self.max_lon >= other.min_lon
            && self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
    }
}
