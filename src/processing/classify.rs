// src/processing/classify.rs
use serde::Serialize;
use tracing::debug;

use crate::catalog::ImageryCatalog;
use crate::error::AnalysisError;
use crate::geometry::AreaOfInterest;
use crate::raster::{is_nodata, IndexRaster};
use crate::utils::round::round_to;

/// One labeled half-open interval [lower, upper) of an index's value range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub label: &'static str,
    pub lower: f32,
    pub upper: f32,
}

impl Tier {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.lower && value < self.upper
    }
}

/// Ordered, contiguous tier partition of an index's value domain.
#[derive(Debug, Clone)]
pub struct TierSet {
    name: &'static str,
    /// Plausible value range of the index, used by the coverage invariant.
    domain: (f32, f32),
    tiers: Vec<Tier>,
}

impl TierSet {
    /// Tiers must be ascending and contiguous with open outer bounds, so
    /// every finite value lands in exactly one tier. Tier sets are fixed
    /// per-index constants, so violations are programming errors.
    pub fn new(name: &'static str, domain: (f32, f32), tiers: Vec<Tier>) -> Self {
        assert!(!tiers.is_empty(), "tier set '{name}' is empty");
        assert_eq!(tiers[0].lower, f32::NEG_INFINITY);
        assert_eq!(tiers[tiers.len() - 1].upper, f32::INFINITY);
        for pair in tiers.windows(2) {
            assert!(
                pair[0].upper == pair[1].lower && pair[0].lower < pair[0].upper,
                "tier set '{name}' has a gap or overlap at {}",
                pair[0].upper
            );
        }
        Self { name, domain, tiers }
    }

    /// Health tiers for the vegetation index: poor < 0.2 <= moderate < 0.5 <= good.
    pub fn vegetation() -> Self {
        Self::new(
            "vegetation",
            (-1.0, 1.0),
            vec![
                Tier { label: "poor", lower: f32::NEG_INFINITY, upper: 0.2 },
                Tier { label: "moderate", lower: 0.2, upper: 0.5 },
                Tier { label: "good", lower: 0.5, upper: f32::INFINITY },
            ],
        )
    }

    /// Exposed-soil tiers for the bareness index: low < 0.0 <= medium < 0.25 <= high.
    pub fn bareness() -> Self {
        Self::new(
            "bareness",
            (-1.0, 1.0),
            vec![
                Tier { label: "low", lower: f32::NEG_INFINITY, upper: 0.0 },
                Tier { label: "medium", lower: 0.0, upper: 0.25 },
                Tier { label: "high", lower: 0.25, upper: f32::INFINITY },
            ],
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn domain(&self) -> (f32, f32) {
        self.domain
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// The unique tier holding `value`; None for NaN or NODATA.
    pub fn classify_value(&self, value: f32) -> Option<&Tier> {
        if is_nodata(value) {
            return None;
        }
        self.tiers.iter().find(|t| t.contains(value))
    }
}

/// Physical area (m²) per tier label, plus derived percentages. An
/// undefined reduction stays None and is excluded from totals and
/// percentages. Rounding happens only when percentages are materialized.
#[derive(Debug, Clone)]
pub struct AreaBreakdown {
    entries: Vec<(&'static str, Option<f64>)>,
}

impl AreaBreakdown {
    pub fn entries(&self) -> &[(&'static str, Option<f64>)] {
        &self.entries
    }

    pub fn total_area(&self) -> f64 {
        self.entries.iter().filter_map(|(_, area)| *area).sum()
    }

    /// Per-tier share of the total classified area, rounded to 2 decimal
    /// places at this presentation boundary. Tiers whose reduction was
    /// undefined are absent rather than reported as a synthetic zero.
    pub fn percentages(&self) -> Vec<TierPercent> {
        let total = self.total_area();
        self.entries
            .iter()
            .filter_map(|&(label, area)| {
                area.map(|area| TierPercent {
                    label,
                    percent: round_to(area / total * 100.0, 2),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierPercent {
    pub label: &'static str,
    pub percent: f64,
}

/// Partitions an index raster into tiers and totals the physical area per
/// tier via an area-weighted region reduction over the AOI.
pub struct ZonalClassifier<'a, C: ImageryCatalog + ?Sized> {
    catalog: &'a C,
    scale: f64,
}

impl<'a, C: ImageryCatalog + ?Sized> ZonalClassifier<'a, C> {
    /// `scale` is the linear ground sampling distance in meters used for
    /// area accounting.
    pub fn new(catalog: &'a C, scale: f64) -> Self {
        Self { catalog, scale }
    }

    /// Area per tier. No-data pixels contribute to no tier; an undefined
    /// reduction is excluded from the totals rather than coalesced to zero.
    /// A zero total means the AOI produced no analyzable pixels.
    pub fn classify(
        &self,
        raster: &IndexRaster,
        aoi: &AreaOfInterest,
        tiers: &TierSet,
    ) -> Result<AreaBreakdown, AnalysisError> {
        let mut entries = Vec::with_capacity(tiers.tiers().len());
        for tier in tiers.tiers() {
            let mask = raster.interval_mask(tier.lower, tier.upper);
            let area = self.catalog.reduce_area(&mask, aoi, self.scale)?;
            entries.push((tier.label, area));
        }

        let breakdown = AreaBreakdown { entries };
        debug!(
            index = raster.name(),
            tier_set = tiers.name(),
            total_m2 = breakdown.total_area(),
            "zonal classification"
        );
        if breakdown.total_area() == 0.0 {
            return Err(AnalysisError::NoAnalyzablePixels);
        }
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_sets_cover_their_domain_exactly_once() {
        for set in [TierSet::vegetation(), TierSet::bareness()] {
            let (lo, hi) = set.domain();
            let mut v = lo;
            while v <= hi {
                let hits = set.tiers().iter().filter(|t| t.contains(v)).count();
                assert_eq!(hits, 1, "{} value {v} hit {hits} tiers", set.name());
                v += 0.01;
            }
        }
    }

    #[test]
    fn vegetation_boundaries_are_half_open() {
        let set = TierSet::vegetation();
        assert_eq!(set.classify_value(0.19999).unwrap().label, "poor");
        assert_eq!(set.classify_value(0.2).unwrap().label, "moderate");
        assert_eq!(set.classify_value(0.5).unwrap().label, "good");
        assert!(set.classify_value(f32::NAN).is_none());
    }

    #[test]
    fn nodata_classifies_into_no_tier() {
        // The sentinel must not fall through into the open-ended bottom tier.
        for set in [TierSet::vegetation(), TierSet::bareness()] {
            assert!(set.classify_value(crate::raster::NODATA).is_none());
        }
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let breakdown = AreaBreakdown {
            entries: vec![
                ("poor", Some(3300.0)),
                ("moderate", Some(3300.0)),
                ("good", Some(3400.0)),
            ],
        };
        let sum: f64 = breakdown.percentages().iter().map(|p| p.percent).sum();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn undefined_reduction_is_excluded_not_zeroed() {
        let breakdown = AreaBreakdown {
            entries: vec![("poor", Some(600.0)), ("moderate", None), ("good", Some(200.0))],
        };
        assert_eq!(breakdown.total_area(), 800.0);
        let percentages = breakdown.percentages();
        assert_eq!(percentages.len(), 2);
        assert_eq!(percentages[0].percent, 75.0);
        assert_eq!(percentages[1].percent, 25.0);
    }
}
