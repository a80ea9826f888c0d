// src/analysis/single.rs
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::analysis::{CLOUD_COVER_CEILING, GROUND_SAMPLING_METERS};
use crate::catalog::ImageryCatalog;
use crate::error::AnalysisError;
use crate::geometry::{AreaOfInterest, BoundingBox};
use crate::period::DateRange;
use crate::processing::classify::{TierPercent, TierSet, ZonalClassifier};
use crate::processing::indices::{IndexCalculator, BSI, NDVI};

/// One-shot analysis of an AOI over a single date window: scene filtering,
/// median compositing, NDVI/BSI derivation and zonal area classification.
pub struct SinglePeriodAnalyzer<'a, C: ImageryCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: ImageryCatalog + ?Sized> SinglePeriodAnalyzer<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Any failure along the way aborts the whole analysis; partial reports
    /// are never returned.
    pub fn run(
        &self,
        aoi: &AreaOfInterest,
        range: &DateRange,
    ) -> Result<SingleReport, AnalysisError> {
        let collection = self
            .catalog
            .find_scenes(aoi, range, CLOUD_COVER_CEILING)?;
        let Some(best) = collection.least_cloudy() else {
            return Err(AnalysisError::NoImageryFound);
        };

        // The report date anchors on the best single observation even though
        // the analyzed pixels blend the whole collection. Known mismatch,
        // kept on purpose.
        let acquisition_date = best.acquired;
        info!(
            scenes = collection.len(),
            acquisition = %acquisition_date,
            range = %range,
            "analyzing filtered collection"
        );

        let composite = self.catalog.median(&collection, aoi)?;
        let ndvi = NDVI::default().calculate(&composite)?;
        let bsi = BSI::default().calculate(&composite)?;

        let classifier = ZonalClassifier::new(self.catalog, GROUND_SAMPLING_METERS);
        let vegetation = classifier.classify(&ndvi, aoi, &TierSet::vegetation())?;
        let bareness = classifier.classify(&bsi, aoi, &TierSet::bareness())?;

        Ok(SingleReport {
            acquisition_date,
            bounding_box: aoi.bounding_box(),
            vegetation: vegetation.percentages(),
            bareness: bareness.percentages(),
            previews: vec![PreviewSpec::ndvi(), PreviewSpec::bsi()],
        })
    }
}

/// Terminal payload of a single-period analysis. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleReport {
    pub acquisition_date: NaiveDate,
    pub bounding_box: BoundingBox,
    pub vegetation: Vec<TierPercent>,
    pub bareness: Vec<TierPercent>,
    pub previews: Vec<PreviewSpec>,
}

/// Rendering parameters for an external preview call: visualization range
/// plus a discrete hex color ramp. No imagery is produced here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSpec {
    pub index: &'static str,
    pub min: f64,
    pub max: f64,
    pub palette: Vec<&'static str>,
}

impl PreviewSpec {
    /// Red through green, the ramp the original map rendering used.
    pub fn ndvi() -> Self {
        Self {
            index: "NDVI",
            min: 0.1,
            max: 0.9,
            palette: vec!["d73027", "fee08b", "a6d96a", "1a9850"],
        }
    }

    /// Green through brown; higher means more exposed soil.
    pub fn bsi() -> Self {
        Self {
            index: "BSI",
            min: -0.5,
            max: 0.5,
            palette: vec!["1a9850", "fee08b", "d8b365", "8c510a"],
        }
    }
}
