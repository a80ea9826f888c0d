// src/analysis/series.rs
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{CLOUD_COVER_CEILING, GROUND_SAMPLING_METERS};
use crate::catalog::{ImageryCatalog, SceneCollection};
use crate::error::AnalysisError;
use crate::geometry::AreaOfInterest;
use crate::period::{Cadence, DateRange};
use crate::processing::classify::{TierPercent, TierSet};
use crate::processing::indices::{IndexCalculator, NDVI};
use crate::raster::median_raster;
use crate::utils::round::round_to;

/// Vegetation trend over a date window sampled at a fixed cadence: one mean
/// NDVI value per sub-period, plus a temporal-occupancy summary.
pub struct TimeSeriesAnalyzer<'a, C: ImageryCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: ImageryCatalog + ?Sized> TimeSeriesAnalyzer<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    pub fn run(
        &self,
        aoi: &AreaOfInterest,
        range: &DateRange,
        cadence: Cadence,
    ) -> Result<TimeSeriesReport, AnalysisError> {
        let sub_periods = range.partition(cadence);

        // One catalog query covers the whole range; sub-periods only
        // restrict the returned collection by date.
        let collection = self
            .catalog
            .find_scenes(aoi, range, CLOUD_COVER_CEILING)?;
        info!(
            scenes = collection.len(),
            sub_periods = sub_periods.len(),
            cadence = %cadence,
            "sampling time series"
        );

        // Derive the vegetation index once per scene; sub-periods below
        // only restrict and blend these rasters.
        let ndvi = NDVI::default();
        let mut indexed = Vec::with_capacity(collection.len());
        for meta in collection.scenes() {
            let single = SceneCollection::new(vec![meta.clone()]);
            let composite = self.catalog.median(&single, aoi)?;
            indexed.push((meta.acquired, ndvi.calculate(&composite)?));
        }

        let mut points = Vec::new();
        for sub in &sub_periods {
            let rasters: Vec<_> = indexed
                .iter()
                .filter(|(acquired, _)| sub.contains(*acquired))
                .map(|(_, raster)| raster)
                .collect();
            let Some(blended) = median_raster(ndvi.name(), &rasters) else {
                // Gaps are expected, not an error.
                debug!(period = %sub, "no imagery in sub-period, skipping");
                continue;
            };
            if let Some(mean) = self
                .catalog
                .reduce_mean(&blended, aoi, GROUND_SAMPLING_METERS)?
            {
                points.push(TimeSeriesPoint {
                    date: sub.start(),
                    mean_ndvi: round_to(mean, 4),
                });
            }
        }

        if points.is_empty() {
            return Err(AnalysisError::NoTimeSeriesData {
                cadence: cadence.token().to_string(),
            });
        }

        let summary = occupancy(&points, &TierSet::vegetation());
        Ok(TimeSeriesReport {
            cadence: cadence.token(),
            points,
            summary,
        })
    }
}

/// Fraction of sampled periods per vegetation tier. Each period counts as
/// one unit regardless of area; this is a temporal statistic, distinct from
/// the spatial breakdown of the single-period report.
fn occupancy(points: &[TimeSeriesPoint], tiers: &TierSet) -> Vec<TierPercent> {
    tiers
        .tiers()
        .iter()
        .map(|tier| {
            let count = points
                .iter()
                .filter(|p| tier.contains(p.mean_ndvi as f32))
                .count();
            TierPercent {
                label: tier.label,
                percent: round_to(count as f64 / points.len() as f64 * 100.0, 2),
            }
        })
        .collect()
}

/// Mean vegetation index of one sampled sub-period, keyed by the
/// sub-period's start date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub mean_ndvi: f64,
}

/// Terminal payload of a time-series analysis: chronological points plus
/// per-tier occupancy percentages across the sampled periods.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesReport {
    pub cadence: &'static str,
    pub points: Vec<TimeSeriesPoint>,
    pub summary: Vec<TierPercent>,
}
