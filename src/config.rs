use crate::dataset::{DatasetConfig, DEFAULT_NOISE_AMPLITUDE, DEFAULT_SEED};
use crate::render::OutputFormat;

#[derive(Debug, Clone)]
pub struct Config {
    pub seed: u64,
    pub noise_amplitude: u32,
    pub hist_bins: usize,
    pub curve_points: usize,
    pub marker_scale: f64,
    pub output: OutputFormat,
    pub page_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            hist_bins: 6,
            curve_points: 200,
            marker_scale: 300.0,
            output: OutputFormat::Text,
            page_path: "out/dashboard/index.html".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset, unparseable or out-of-range values fall back to the defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        Self {
            seed: get("SEED").and_then(|v| v.parse().ok()).unwrap_or(d.seed),
            noise_amplitude: get("NOISE_AMPLITUDE").and_then(|v| v.parse().ok()).unwrap_or(d.noise_amplitude),
            hist_bins: get("HIST_BINS").and_then(|v| v.parse().ok()).filter(|b: &usize| *b > 0).unwrap_or(d.hist_bins),
            curve_points: get("CURVE_POINTS").and_then(|v| v.parse().ok()).unwrap_or(d.curve_points),
            marker_scale: get("MARKER_SCALE").and_then(|v| v.parse().ok()).filter(|s: &f64| *s > 0.0).unwrap_or(d.marker_scale),
            output: get("OUTPUT").and_then(|v| v.parse().ok()).unwrap_or(d.output),
            page_path: get("PAGE_PATH").unwrap_or(d.page_path),
        }
    }

    pub fn dataset(&self) -> DatasetConfig {
        DatasetConfig {
            seed: self.seed,
            noise_amplitude: self.noise_amplitude,
        }
    }
}
