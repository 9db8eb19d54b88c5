use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color;
use crate::config::ChartConfig;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Band scale: discrete domain → equal-width slots
// ---------------------------------------------------------------------------

/// Maps each distinct domain value to the start of a fixed-width band.
/// Padding is always zero, so the bands tile the range exactly.
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    index: BTreeMap<T, usize>,
    range: [f32; 2],
    step: f32,
}

impl<T: Copy + Ord> BandScale<T> {
    /// Build from `domain` (duplicates dropped, first occurrence wins).
    /// A range with `range[1] < range[0]` assigns bands from the far end,
    /// so the first domain value lands at the high end of the range.
    pub fn new(domain: impl IntoIterator<Item = T>, range: [f32; 2]) -> Self {
        let mut values = Vec::new();
        let mut index = BTreeMap::new();
        for v in domain {
            if !index.contains_key(&v) {
                index.insert(v, values.len());
                values.push(v);
            }
        }
        let span = (range[1] - range[0]).abs();
        let step = if values.is_empty() {
            0.0
        } else {
            span / values.len() as f32
        };
        BandScale {
            domain: values,
            index,
            range,
            step,
        }
    }

    /// Band start for `value`, `None` when it is not in the domain.
    pub fn apply(&self, value: T) -> Option<f32> {
        let i = *self.index.get(&value)?;
        let start = self.range[0].min(self.range[1]);
        let slot = if self.is_reversed() {
            self.domain.len() - 1 - i
        } else {
            i
        };
        Some(start + self.step * slot as f32)
    }

    /// Centre of the band for `value`; where axis ticks go.
    pub fn center(&self, value: T) -> Option<f32> {
        self.apply(value).map(|x| x + self.bandwidth() / 2.0)
    }

    pub fn bandwidth(&self) -> f32 {
        self.step
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn range(&self) -> [f32; 2] {
        self.range
    }

    fn is_reversed(&self) -> bool {
        self.range[1] < self.range[0]
    }
}

// ---------------------------------------------------------------------------
// Linear scale: continuous domain → continuous range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f32; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f32; 2]) -> Self {
        LinearScale { domain, range }
    }

    /// Unclamped linear interpolation. A degenerate domain maps to the
    /// middle of the range.
    pub fn apply(&self, value: f64) -> f32 {
        let t = normalize(self.domain, value);
        self.range[0] + (self.range[1] - self.range[0]) * t as f32
    }
}

fn normalize(domain: [f64; 2], value: f64) -> f64 {
    let span = domain[1] - domain[0];
    if span == 0.0 {
        0.5
    } else {
        (value - domain[0]) / span
    }
}

// ---------------------------------------------------------------------------
// Sequential colour scale
// ---------------------------------------------------------------------------

/// Continuous domain → colour ramp.
#[derive(Clone, Copy)]
pub struct SequentialScale {
    pub domain: [f64; 2],
    interpolator: fn(f64) -> Color32,
}

impl std::fmt::Debug for SequentialScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialScale")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

impl SequentialScale {
    pub fn new(domain: [f64; 2], interpolator: fn(f64) -> Color32) -> Self {
        SequentialScale {
            domain,
            interpolator,
        }
    }

    pub fn apply(&self, value: f64) -> Color32 {
        (self.interpolator)(normalize(self.domain, value))
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain[0], self.domain[1], count)
    }
}

// ---------------------------------------------------------------------------
// Nice ticks
// ---------------------------------------------------------------------------

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Round half up, matching the usual tick arithmetic on negative halves.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Returns `(i1, i2, inc)`; a negative `inc` means ticks are `i / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (i1, i2, inc) = if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        let mut i1 = round_half_up(start * inv);
        let mut i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inv)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = round_half_up(start / inc);
        let mut i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Roughly `count` evenly spaced "nice" values (1, 2 or 5 × 10^k apart)
/// inside `[start, stop]`, in the same direction as the input.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            if reverse {
                value(i2 - i as f64)
            } else {
                value(i1 + i as f64)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ScaleSet
// ---------------------------------------------------------------------------

/// The four mappings the scene is drawn with.
#[derive(Debug, Clone)]
pub struct ScaleSet {
    pub year_to_x: BandScale<i32>,
    pub month_to_y: BandScale<u8>,
    pub temperature_to_color: SequentialScale,
    pub temperature_to_legend_x: LinearScale,
}

impl ScaleSet {
    /// `None` for an empty dataset; there is nothing to scale.
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }
        let (min_temp, max_temp) = dataset.temperature_extent()?;

        let year_to_x = BandScale::new(dataset.distinct_years(), [0.0, config.chart_width()]);
        let month_to_y = BandScale::new((0..12u8).rev(), [config.chart_height(), 0.0]);
        let temperature_to_color = SequentialScale::new([min_temp, max_temp], color::inferno);
        let temperature_to_legend_x =
            LinearScale::new(config.legend_domain, [0.0, config.legend_width]);

        Some(ScaleSet {
            year_to_x,
            month_to_y,
            temperature_to_color,
            temperature_to_legend_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::VarianceRecord;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn dataset(years: std::ops::RangeInclusive<i32>) -> Dataset {
        let mut records = Vec::new();
        for year in years {
            for month in 0..12u8 {
                let variance = (year % 7) as f64 * 0.3 - month as f64 * 0.1;
                records.push(VarianceRecord {
                    year,
                    month,
                    variance,
                    temperature: 8.66 + variance,
                });
            }
        }
        Dataset {
            base_temperature: 8.66,
            records,
        }
    }

    #[test]
    fn year_bands_are_injective_uniform_and_fill_width() {
        let ds = dataset(1753..=2015);
        let cfg = ChartConfig::default();
        let scales = ScaleSet::build(&ds, &cfg).unwrap();
        let x = &scales.year_to_x;

        assert_eq!(x.domain().len(), 263);
        let bw = x.bandwidth();
        assert!((bw * 263.0 - cfg.chart_width()).abs() < 1e-2);

        let mut prev: Option<f32> = None;
        for &year in x.domain() {
            let pos = x.apply(year).unwrap();
            if let Some(p) = prev {
                assert!((pos - p - bw).abs() < 1e-3, "non-uniform band at {year}");
            }
            prev = Some(pos);
        }
        assert_eq!(x.apply(1753), Some(0.0));
        assert_eq!(x.apply(1700), None);
    }

    #[test]
    fn band_scale_drops_duplicates() {
        let x = BandScale::new([3, 1, 3, 2, 1], [0.0, 30.0]);
        assert_eq!(x.domain(), &[3, 1, 2]);
        assert_eq!(x.bandwidth(), 10.0);
        assert_eq!(x.apply(3), Some(0.0));
        assert_eq!(x.apply(2), Some(20.0));
        assert_eq!(x.center(1), Some(15.0));
    }

    #[test]
    fn months_run_january_at_top_december_at_bottom() {
        let cfg = ChartConfig::default();
        let scales = ScaleSet::build(&dataset(1900..=1901), &cfg).unwrap();
        let y = &scales.month_to_y;
        assert_eq!(y.bandwidth(), 37.5);
        assert_eq!(y.apply(0), Some(0.0));
        assert_eq!(y.apply(11), Some(412.5));
        for m in 1..12u8 {
            assert!(y.apply(m).unwrap() > y.apply(m - 1).unwrap());
        }
    }

    #[test]
    fn color_extremes_hit_ramp_ends() {
        let ds = dataset(1800..=1850);
        let scales = ScaleSet::build(&ds, &ChartConfig::default()).unwrap();
        let (lo, hi) = ds.temperature_extent().unwrap();
        assert_eq!(scales.temperature_to_color.apply(lo), color::inferno(0.0));
        assert_eq!(scales.temperature_to_color.apply(hi), color::inferno(1.0));
    }

    #[test]
    fn legend_scale_uses_configured_domain() {
        let ds = dataset(1800..=1801);
        let scales = ScaleSet::build(&ds, &ChartConfig::default()).unwrap();
        let legend = scales.temperature_to_legend_x;
        assert_eq!(legend.apply(2.8), 0.0);
        assert_eq!(legend.apply(12.8), 400.0);
        assert!((legend.apply(7.8) - 200.0).abs() < 1e-4);
    }

    #[test]
    fn empty_dataset_builds_no_scales() {
        let ds = Dataset {
            base_temperature: 8.66,
            records: Vec::new(),
        };
        assert!(ScaleSet::build(&ds, &ChartConfig::default()).is_none());
    }

    #[test]
    fn degenerate_domains_map_to_middle() {
        let lin = LinearScale::new([5.0, 5.0], [0.0, 100.0]);
        assert_eq!(lin.apply(5.0), 50.0);
        let seq = SequentialScale::new([5.0, 5.0], color::inferno);
        assert_eq!(seq.apply(5.0), color::inferno(0.5));
    }

    #[test]
    fn nice_ticks() {
        let t = ticks(1.684, 13.888, 10);
        assert_eq!(t, (2..=13).map(f64::from).collect::<Vec<_>>());

        let t = ticks(0.0, 1.0, 10);
        assert_eq!(t.len(), 11);
        assert!(approx(t[3], 0.3));
        assert!(approx(t[10], 1.0));

        let t = ticks(0.0, 100.0, 5);
        assert_eq!(t, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let t = ticks(10.0, 0.0, 5);
        assert_eq!(t, vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);

        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn non_finite_bounds_have_no_ticks() {
        assert!(ticks(f64::NAN, 1.0, 10).is_empty());
        assert!(ticks(0.0, f64::NAN, 10).is_empty());
        assert!(ticks(0.0, f64::INFINITY, 10).is_empty());
        assert!(ticks(f64::NEG_INFINITY, 0.0, 10).is_empty());
    }
}
