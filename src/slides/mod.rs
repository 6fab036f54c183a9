//! Dashboard slides.
//!
//! `Slide` names the five views; `Slide::build` dispatches to one pure
//! builder per slide. Every built view implements `Render` and serializes
//! to JSON tagged with its slide name.

pub mod decisions;
pub mod distribution;
pub mod marketing;
pub mod matrix;
pub mod time_series;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::board::Board;
use crate::config::Config;
use crate::error::{KpiError, KpiResult};

pub use decisions::DecisionsView;
pub use distribution::DistributionView;
pub use marketing::MarketingSavView;
pub use matrix::StrategyMatrixView;
pub use time_series::TimeSeriesView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slide {
    Decisions,
    TimeSeries,
    Distribution,
    MarketingSav,
    StrategyMatrix,
}

impl Slide {
    /// Navigation order.
    pub const ALL: [Slide; 5] = [
        Slide::Decisions,
        Slide::TimeSeries,
        Slide::Distribution,
        Slide::MarketingSav,
        Slide::StrategyMatrix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Slide::Decisions => "decisions",
            Slide::TimeSeries => "time-series",
            Slide::Distribution => "distribution",
            Slide::MarketingSav => "marketing-sav",
            Slide::StrategyMatrix => "strategy-matrix",
        }
    }

    /// Navigation label.
    pub fn label(&self) -> &'static str {
        match self {
            Slide::Decisions => "Decisions",
            Slide::TimeSeries => "Time analysis",
            Slide::Distribution => "Distribution",
            Slide::MarketingSav => "Marketing & after-sales",
            Slide::StrategyMatrix => "Strategy matrix",
        }
    }

    pub fn build(&self, board: &Board, opts: &ViewOptions) -> KpiResult<SlideView> {
        Ok(match self {
            Slide::Decisions => SlideView::Decisions(decisions::build(board)?),
            Slide::TimeSeries => SlideView::TimeSeries(time_series::build(board)?),
            Slide::Distribution => SlideView::Distribution(distribution::build(board, opts)?),
            Slide::MarketingSav => SlideView::MarketingSav(marketing::build(board)?),
            Slide::StrategyMatrix => SlideView::StrategyMatrix(matrix::build(board, opts)?),
        })
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slide {
    type Err = KpiError;

    fn from_str(s: &str) -> KpiResult<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Slide::ALL
            .into_iter()
            .find(|slide| slide.name() == wanted)
            .ok_or_else(|| KpiError::invalid(format!("unknown slide: {:?}", s)))
    }
}

/// Tunables for the chart-bearing slides.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub hist_bins: usize,
    pub curve_points: usize,
    /// Annual marketing budget is divided by this to get the marker size.
    pub marker_scale: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            hist_bins: 6,
            curve_points: 200,
            marker_scale: 300.0,
        }
    }
}

impl From<&Config> for ViewOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            hist_bins: cfg.hist_bins,
            curve_points: cfg.curve_points,
            marker_scale: cfg.marker_scale,
        }
    }
}

/// Shared rendering capability of every slide view.
pub trait Render {
    fn title(&self) -> &'static str;
    fn render_text(&self) -> String;
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "slide", rename_all = "kebab-case")]
pub enum SlideView {
    Decisions(DecisionsView),
    TimeSeries(TimeSeriesView),
    Distribution(DistributionView),
    MarketingSav(MarketingSavView),
    StrategyMatrix(StrategyMatrixView),
}

impl SlideView {
    pub fn slide(&self) -> Slide {
        match self {
            SlideView::Decisions(_) => Slide::Decisions,
            SlideView::TimeSeries(_) => Slide::TimeSeries,
            SlideView::Distribution(_) => Slide::Distribution,
            SlideView::MarketingSav(_) => Slide::MarketingSav,
            SlideView::StrategyMatrix(_) => Slide::StrategyMatrix,
        }
    }

    fn inner(&self) -> &dyn Render {
        match self {
            SlideView::Decisions(v) => v,
            SlideView::TimeSeries(v) => v,
            SlideView::Distribution(v) => v,
            SlideView::MarketingSav(v) => v,
            SlideView::StrategyMatrix(v) => v,
        }
    }
}

impl Render for SlideView {
    fn title(&self) -> &'static str {
        self.inner().title()
    }

    fn render_text(&self) -> String {
        self.inner().render_text()
    }
}

/// Build every slide in navigation order.
pub fn build_all(board: &Board, opts: &ViewOptions) -> KpiResult<Vec<SlideView>> {
    Slide::ALL.iter().map(|slide| slide.build(board, opts)).collect()
}
