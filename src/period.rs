// src/period.rs
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};

use crate::error::AnalysisError;

/// Half-open calendar window [start, end). Sliced, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalysisError> {
        if start >= end {
            return Err(AnalysisError::InvalidInput(format!(
                "date range start {start} must precede end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Split into consecutive sub-periods of the cadence length; the final
    /// sub-period is truncated at the range end. The result covers the whole
    /// range with no gaps or overlaps.
    pub fn partition(&self, cadence: Cadence) -> Vec<DateRange> {
        let step = Duration::days(cadence.days());
        let mut periods = Vec::new();
        let mut cursor = self.start;
        while cursor < self.end {
            let stop = (cursor + step).min(self.end);
            periods.push(DateRange {
                start: cursor,
                end: stop,
            });
            cursor = stop;
        }
        periods
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Fixed-length sampling step for the time-series mode. These are calendar
/// day counts, not true month or quarter boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    BiWeekly,
    Monthly,
    Quarterly,
}

impl Cadence {
    pub fn days(&self) -> i64 {
        match self {
            Cadence::BiWeekly => 14,
            Cadence::Monthly => 30,
            Cadence::Quarterly => 90,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Cadence::BiWeekly => "biweekly",
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
        }
    }
}

impl FromStr for Cadence {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "biweekly" => Ok(Cadence::BiWeekly),
            "monthly" => Ok(Cadence::Monthly),
            "quarterly" => Ok(Cadence::Quarterly),
            _ => Err(AnalysisError::InvalidCadence {
                token: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(DateRange::new(date(2024, 3, 1), date(2024, 3, 1)).is_err());
        assert!(DateRange::new(date(2024, 3, 2), date(2024, 3, 1)).is_err());
    }

    #[test]
    fn monthly_partition_over_65_days() {
        // 65 days => 30 + 30 + 5
        let range = DateRange::new(date(2024, 1, 1), date(2024, 3, 6)).unwrap();
        assert_eq!(range.num_days(), 65);
        let parts = range.partition(Cadence::Monthly);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].num_days(), 30);
        assert_eq!(parts[1].num_days(), 30);
        assert_eq!(parts[2].num_days(), 5);
    }

    #[test]
    fn partition_is_total_and_non_overlapping() {
        let range = DateRange::new(date(2023, 11, 20), date(2024, 5, 3)).unwrap();
        for cadence in [Cadence::BiWeekly, Cadence::Monthly, Cadence::Quarterly] {
            let parts = range.partition(cadence);
            let expected = (range.num_days() + cadence.days() - 1) / cadence.days();
            assert_eq!(parts.len() as i64, expected);
            assert_eq!(parts.first().unwrap().start(), range.start());
            assert_eq!(parts.last().unwrap().end(), range.end());
            for pair in parts.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
            }
        }
    }

    #[test]
    fn cadence_tokens_round_trip() {
        for token in ["biweekly", "monthly", "quarterly"] {
            assert_eq!(token.parse::<Cadence>().unwrap().token(), token);
        }
        assert!(matches!(
            "weekly".parse::<Cadence>(),
            Err(AnalysisError::InvalidCadence { .. })
        ));
    }
}
