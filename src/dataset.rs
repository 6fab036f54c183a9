//! Embedded product-line dataset, seeded revenue noise and dataset manifest.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{KpiError, KpiResult};
use crate::model::{Observation, ProductLine, FIRST_PERIOD, LAST_PERIOD};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_NOISE_AMPLITUDE: u32 = 500;

const REVENUE_A: [f64; 12] = [
    50000.0, 52000.0, 48000.0, 49000.0, 51000.0, 47000.0, 46000.0, 45000.0, 44000.0, 43000.0,
    42000.0, 40000.0,
];
const REVENUE_B: [f64; 12] = [
    5000.0, 6000.0, 8000.0, 10000.0, 12000.0, 15000.0, 18000.0, 20000.0, 22000.0, 25000.0,
    28000.0, 30000.0,
];
const REVENUE_C: [f64; 12] = [
    20000.0, 20000.0, 20500.0, 19500.0, 20000.0, 20000.0, 20000.0, 20100.0, 19900.0, 20000.0,
    20000.0, 20000.0,
];

/// Per-line constants: (monthly revenue, production cost, marketing budget, return rate).
fn line_profile(line: ProductLine) -> (&'static [f64; 12], f64, f64, f64) {
    match line {
        ProductLine::A => (&REVENUE_A, 35000.0, 5000.0, 0.25),
        ProductLine::B => (&REVENUE_B, 4000.0, 15000.0, 0.05),
        ProductLine::C => (&REVENUE_C, 10000.0, 1000.0, 0.02),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub seed: u64,
    /// Noise is drawn from [-amplitude, amplitude). Zero disables it.
    pub noise_amplitude: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
        }
    }
}

impl DatasetConfig {
    pub fn noiseless() -> Self {
        Self {
            seed: DEFAULT_SEED,
            noise_amplitude: 0,
        }
    }
}

/// The unperturbed table, line-major (A months 1..12, then B, then C).
pub fn baseline() -> Vec<Observation> {
    let mut rows = Vec::with_capacity(ProductLine::ALL.len() * LAST_PERIOD as usize);
    for line in ProductLine::ALL {
        let (revenue, cost, marketing, return_rate) = line_profile(line);
        for (idx, rev) in revenue.iter().enumerate() {
            rows.push(Observation {
                period: FIRST_PERIOD + idx as u8,
                line,
                revenue: *rev,
                production_cost: cost,
                marketing_budget: marketing,
                return_rate,
            });
        }
    }
    rows
}

/// Baseline table with seeded integer noise added to each revenue, in row order.
pub fn generate(cfg: &DatasetConfig) -> Vec<Observation> {
    let mut rows = baseline();
    if cfg.noise_amplitude == 0 {
        return rows;
    }
    let amp = cfg.noise_amplitude as i64;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    for row in rows.iter_mut() {
        let noise: i64 = rng.gen_range(-amp..amp);
        row.revenue += noise as f64;
    }
    rows
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub rows: usize,
    pub lines: Vec<ProductLine>,
    pub period_min: u8,
    pub period_max: u8,
    pub seed: u64,
    pub noise_amplitude: u32,
    pub hash_sha256: String,
    pub generated_at: String,
}

/// SHA-256 over the canonical JSON encoding of the rows.
pub fn fingerprint(observations: &[Observation]) -> KpiResult<String> {
    let bytes = serde_json::to_vec(observations)
        .map_err(|e| KpiError::invalid(format!("cannot encode observations: {}", e)))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

pub fn manifest(cfg: &DatasetConfig, observations: &[Observation]) -> KpiResult<DatasetManifest> {
    if observations.is_empty() {
        return Err(KpiError::invalid("empty observation set"));
    }
    let mut lines: Vec<ProductLine> = observations.iter().map(|o| o.line).collect();
    lines.sort();
    lines.dedup();
    let period_min = observations.iter().map(|o| o.period).min().unwrap_or(FIRST_PERIOD);
    let period_max = observations.iter().map(|o| o.period).max().unwrap_or(LAST_PERIOD);
    Ok(DatasetManifest {
        rows: observations.len(),
        lines,
        period_min,
        period_max,
        seed: cfg.seed,
        noise_amplitude: cfg.noise_amplitude,
        hash_sha256: fingerprint(observations)?,
        generated_at: crate::logging::ts_now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_shape() {
        let rows = baseline();
        assert_eq!(rows.len(), 36);
        assert_eq!(rows[0].line, ProductLine::A);
        assert_eq!(rows[0].period, 1);
        assert_eq!(rows[11].period, 12);
        assert_eq!(rows[12].line, ProductLine::B);
        assert_eq!(rows[35].line, ProductLine::C);
        assert!(rows.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_baseline_totals() {
        let rows = baseline();
        let a_revenue: f64 = rows.iter().filter(|r| r.line == ProductLine::A).map(|r| r.revenue).sum();
        assert_eq!(a_revenue, 557_000.0);
        let b_marketing: f64 = rows
            .iter()
            .filter(|r| r.line == ProductLine::B)
            .map(|r| r.marketing_budget)
            .sum();
        assert_eq!(b_marketing, 180_000.0);
    }

    #[test]
    fn test_same_seed_same_data() {
        let cfg = DatasetConfig::default();
        assert_eq!(generate(&cfg), generate(&cfg));
        assert_eq!(
            fingerprint(&generate(&cfg)).unwrap(),
            fingerprint(&generate(&cfg)).unwrap()
        );
    }

    #[test]
    fn test_different_seed_changes_data() {
        let a = generate(&DatasetConfig { seed: 1, noise_amplitude: 500 });
        let b = generate(&DatasetConfig { seed: 2, noise_amplitude: 500 });
        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_noise_is_bounded() {
        let base = baseline();
        let noisy = generate(&DatasetConfig { seed: 7, noise_amplitude: 500 });
        for (b, n) in base.iter().zip(noisy.iter()) {
            let delta = n.revenue - b.revenue;
            assert!((-500.0..500.0).contains(&delta), "delta {}", delta);
            assert_eq!(delta.fract(), 0.0);
            assert_eq!(b.production_cost, n.production_cost);
        }
    }

    #[test]
    fn test_zero_amplitude_is_baseline() {
        assert_eq!(generate(&DatasetConfig::noiseless()), baseline());
    }

    #[test]
    fn test_manifest() {
        let cfg = DatasetConfig::default();
        let rows = generate(&cfg);
        let m = manifest(&cfg, &rows).unwrap();
        assert_eq!(m.rows, 36);
        assert_eq!(m.lines, ProductLine::ALL.to_vec());
        assert_eq!((m.period_min, m.period_max), (1, 12));
        assert_eq!(m.hash_sha256.len(), 64);
        assert!(manifest(&cfg, &[]).is_err());
    }
}
