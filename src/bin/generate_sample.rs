use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleDataset {
    base_temperature: f64,
    monthly_variance: Vec<MonthlyVariance>,
}

#[derive(Serialize)]
struct MonthlyVariance {
    year: i32,
    /// One-based, as on the wire.
    month: u8,
    variance: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const BASE_TEMPERATURE: f64 = 8.66;
const FIRST_YEAR: i32 = 1753;
const LAST_YEAR: i32 = 2015;

/// Seasonal swing around the base temperature, coldest in January.
fn seasonal(month: u8) -> f64 {
    let phase = (month as f64 - 1.0) / 12.0 * 2.0 * std::f64::consts::PI;
    -5.5 * phase.cos()
}

/// Slow warming, accelerating in the last century.
fn trend(year: i32) -> f64 {
    let t = (year - FIRST_YEAR) as f64 / (LAST_YEAR - FIRST_YEAR) as f64;
    -0.6 + 1.8 * t.powi(3)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut monthly_variance = Vec::new();

    for year in FIRST_YEAR..=LAST_YEAR {
        // Early instrumental records are noisier.
        let noise = if year < 1850 { 0.9 } else { 0.4 };
        for month in 1..=12u8 {
            let variance = seasonal(month) + trend(year) + rng.gauss(0.0, noise);
            monthly_variance.push(MonthlyVariance {
                year,
                month,
                variance: (variance * 1000.0).round() / 1000.0,
            });
        }
    }

    let dataset = SampleDataset {
        base_temperature: BASE_TEMPERATURE,
        monthly_variance,
    };

    let output_path = "sample_temperature.json";
    let json = serde_json::to_string_pretty(&dataset).context("serializing sample dataset")?;
    std::fs::write(output_path, json).with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} monthly records ({FIRST_YEAR} - {LAST_YEAR}) to {output_path}",
        dataset.monthly_variance.len()
    );
    Ok(())
}
