//! Descriptive statistics for the revenue distribution view.

use serde::Serialize;

use crate::error::{KpiError, KpiResult};

pub fn mean(values: &[f64]) -> KpiResult<f64> {
    if values.is_empty() {
        return Err(KpiError::invalid("mean of empty sample"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with the n-1 denominator.
pub fn sample_std(values: &[f64]) -> KpiResult<f64> {
    if values.len() < 2 {
        return Err(KpiError::invalid(format!(
            "sample std needs at least 2 values, got {}",
            values.len()
        )));
    }
    let mu = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

pub fn min_max(values: &[f64]) -> KpiResult<(f64, f64)> {
    if values.is_empty() {
        return Err(KpiError::invalid("min/max of empty sample"));
    }
    Ok(values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v))))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// count / (n * width); densities integrate to 1 over the bins.
    pub density: f64,
}

/// Equal-width bins over [min, max]. The last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> KpiResult<Vec<HistogramBin>> {
    if bins == 0 {
        return Err(KpiError::invalid("histogram needs at least one bin"));
    }
    let (mut lo, mut hi) = min_max(values)?;
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let n = values.len() as f64;
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
            count,
            density: count as f64 / (n * width),
        })
        .collect())
}

pub fn normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}

/// `n` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i + 1 == n { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
