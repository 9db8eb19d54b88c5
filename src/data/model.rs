use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// One entry of `monthlyVariance` as it appears on the wire.
/// `month` is one-based (1 = January).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawVariance {
    pub year: i32,
    pub month: u8,
    pub variance: f64,
}

// ---------------------------------------------------------------------------
// VarianceRecord – one heat map cell
// ---------------------------------------------------------------------------

/// A normalized monthly record. `month` is zero-based (0 = January) and
/// `temperature` is the absolute value `base + variance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VarianceRecord {
    pub year: i32,
    pub month: u8,
    pub variance: f64,
    pub temperature: f64,
}

impl VarianceRecord {
    /// Normalize a wire entry. Returns `None` when the month is outside 1..=12.
    pub fn from_raw(raw: &RawVariance, base_temperature: f64) -> Option<Self> {
        if !(1..=12).contains(&raw.month) {
            return None;
        }
        Some(VarianceRecord {
            year: raw.year,
            month: raw.month - 1,
            variance: raw.variance,
            temperature: base_temperature + raw.variance,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Base temperature plus every normalized record, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub base_temperature: f64,
    pub records: Vec<VarianceRecord>,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` year, `None` for an empty dataset.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// `(min, max)` absolute temperature, `None` for an empty dataset.
    pub fn temperature_extent(&self) -> Option<(f64, f64)> {
        if self.records.is_empty() {
            return None;
        }
        let (min, max) = self.records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), r| (lo.min(r.temperature), hi.max(r.temperature)),
        );
        Some((min, max))
    }

    /// Distinct years in ascending order.
    pub fn distinct_years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Subtitle line, e.g. `1753 - 2015: base temperature 8.66℃`.
    pub fn description(&self) -> Option<String> {
        let (first, last) = self.year_extent()?;
        Some(format!(
            "{first} - {last}: base temperature {}℃",
            self.base_temperature
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u8, variance: f64) -> VarianceRecord {
        let raw = RawVariance {
            year,
            month,
            variance,
        };
        VarianceRecord::from_raw(&raw, 8.66).unwrap()
    }

    #[test]
    fn from_raw_shifts_month_and_adds_base() {
        let r = record(1753, 1, -6.07);
        assert_eq!(r.year, 1753);
        assert_eq!(r.month, 0);
        assert!((r.temperature - 2.59).abs() < 1e-9);
        assert!((r.temperature - (8.66 + r.variance)).abs() < 1e-12);

        assert_eq!(record(1753, 12, 0.0).month, 11);
    }

    #[test]
    fn from_raw_rejects_out_of_range_months() {
        let raw = RawVariance {
            year: 1800,
            month: 0,
            variance: 0.1,
        };
        assert!(VarianceRecord::from_raw(&raw, 8.66).is_none());
        let raw = RawVariance {
            year: 1800,
            month: 13,
            variance: 0.1,
        };
        assert!(VarianceRecord::from_raw(&raw, 8.66).is_none());
    }

    #[test]
    fn extents_and_description() {
        let ds = Dataset {
            base_temperature: 8.66,
            records: vec![
                record(1760, 3, 1.0),
                record(1753, 1, -6.07),
                record(2015, 9, 2.5),
            ],
        };
        assert_eq!(ds.year_extent(), Some((1753, 2015)));
        let (lo, hi) = ds.temperature_extent().unwrap();
        assert!((lo - 2.59).abs() < 1e-9);
        assert!((hi - 11.16).abs() < 1e-9);
        assert_eq!(ds.distinct_years(), vec![1753, 1760, 2015]);
        assert_eq!(
            ds.description().as_deref(),
            Some("1753 - 2015: base temperature 8.66℃")
        );
    }

    #[test]
    fn empty_dataset_has_no_extents() {
        let ds = Dataset {
            base_temperature: 8.66,
            records: Vec::new(),
        };
        assert!(ds.is_empty());
        assert_eq!(ds.year_extent(), None);
        assert_eq!(ds.temperature_extent(), None);
        assert_eq!(ds.description(), None);
    }
}
