//! Monthly revenue distribution with a fitted normal curve.

use serde::Serialize;

use super::{Render, ViewOptions};
use crate::board::Board;
use crate::error::KpiResult;
use crate::render::{bar, format_eur, heading};
use crate::stats::{self, HistogramBin};

#[derive(Debug, Clone, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionView {
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub bins: Vec<HistogramBin>,
    pub normal_fit: Vec<CurvePoint>,
}

pub fn build(board: &Board, opts: &ViewOptions) -> KpiResult<DistributionView> {
    let revenues = board.revenues();
    let mean = stats::mean(&revenues)?;
    let std_dev = stats::sample_std(&revenues)?;
    let (min, max) = stats::min_max(&revenues)?;
    let bins = stats::histogram(&revenues, opts.hist_bins)?;
    let normal_fit = if std_dev > 0.0 {
        stats::linspace(min, max, opts.curve_points)
            .into_iter()
            .map(|x| CurvePoint {
                x,
                density: stats::normal_pdf(x, mean, std_dev),
            })
            .collect()
    } else {
        Vec::new()
    };
    Ok(DistributionView {
        samples: revenues.len(),
        mean,
        std_dev,
        min,
        max,
        bins,
        normal_fit,
    })
}

impl DistributionView {
    /// Fitted density at the midpoint of a bin.
    fn fitted_at(&self, bin: &HistogramBin) -> f64 {
        if self.std_dev > 0.0 {
            stats::normal_pdf((bin.lower + bin.upper) / 2.0, self.mean, self.std_dev)
        } else {
            0.0
        }
    }
}

impl Render for DistributionView {
    fn title(&self) -> &'static str {
        "Monthly revenue distribution (normal approximation)"
    }

    fn render_text(&self) -> String {
        let mut out = heading(self.title());
        out.push_str(&format!(
            "\nn = {}   mean = {}   std = {}   range = {} .. {}\n\n",
            self.samples,
            format_eur(self.mean),
            format_eur(self.std_dev),
            format_eur(self.min),
            format_eur(self.max)
        ));
        let peak = self
            .bins
            .iter()
            .map(|b| b.density.max(self.fitted_at(b)))
            .fold(0.0, f64::max);
        for b in &self.bins {
            out.push_str(&format!(
                "{:>10} - {:<10} {:>3} | {:<40} fit {:.2e}\n",
                format_eur(b.lower),
                format_eur(b.upper),
                b.count,
                bar(b.density, peak, 40),
                self.fitted_at(b)
            ));
        }
        out
    }
}
