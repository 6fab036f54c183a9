//! Strategy matrix: annual revenue against annual margin, coloured by ROI.

use serde::Serialize;

use super::{Render, ViewOptions};
use crate::board::Board;
use crate::error::{KpiError, KpiResult};
use crate::model::ProductLine;
use crate::render::{format_eur, heading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    HighRevenueProfitable,
    LowRevenueProfitable,
    HighRevenueLossMaking,
    LowRevenueLossMaking,
}

impl Quadrant {
    /// A point on a reference line counts as high revenue / profitable.
    pub fn classify(revenue: f64, margin: f64, revenue_reference: f64) -> Self {
        match (revenue >= revenue_reference, margin >= 0.0) {
            (true, true) => Quadrant::HighRevenueProfitable,
            (false, true) => Quadrant::LowRevenueProfitable,
            (true, false) => Quadrant::HighRevenueLossMaking,
            (false, false) => Quadrant::LowRevenueLossMaking,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::HighRevenueProfitable => "high revenue, profitable",
            Quadrant::LowRevenueProfitable => "low revenue, profitable",
            Quadrant::HighRevenueLossMaking => "high revenue, loss-making",
            Quadrant::LowRevenueLossMaking => "low revenue, loss-making",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixPoint {
    pub line: ProductLine,
    pub label: &'static str,
    pub annual_revenue: f64,
    pub annual_margin: f64,
    pub roi: f64,
    pub marker_size: f64,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyMatrixView {
    pub points: Vec<MatrixPoint>,
    /// Vertical reference line: mean annual revenue across lines.
    pub revenue_reference: f64,
    /// Horizontal reference line.
    pub margin_reference: f64,
    pub roi_min: f64,
    pub roi_max: f64,
}

pub fn build(board: &Board, opts: &ViewOptions) -> KpiResult<StrategyMatrixView> {
    if opts.marker_scale <= 0.0 {
        return Err(KpiError::invalid(format!(
            "marker scale must be positive, got {}",
            opts.marker_scale
        )));
    }
    let revenue_reference = board.totals.mean_annual_revenue;
    let points: Vec<MatrixPoint> = board
        .summaries
        .iter()
        .map(|s| MatrixPoint {
            line: s.line,
            label: s.line.label(),
            annual_revenue: s.annual_revenue,
            annual_margin: s.annual_margin,
            roi: s.roi,
            marker_size: s.annual_marketing_budget / opts.marker_scale,
            quadrant: Quadrant::classify(s.annual_revenue, s.annual_margin, revenue_reference),
        })
        .collect();
    let roi_min = points.iter().map(|p| p.roi).fold(f64::INFINITY, f64::min);
    let roi_max = points.iter().map(|p| p.roi).fold(f64::NEG_INFINITY, f64::max);
    Ok(StrategyMatrixView {
        points,
        revenue_reference,
        margin_reference: 0.0,
        roi_min,
        roi_max,
    })
}

const GRID_W: usize = 48;
const GRID_H: usize = 14;

fn padded_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((hi - lo) * 0.08).max(1.0);
    (lo - pad, hi + pad)
}

impl StrategyMatrixView {
    fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let xs = self.points.iter().map(|p| p.annual_revenue).chain([self.revenue_reference]);
        let ys = self.points.iter().map(|p| p.annual_margin).chain([self.margin_reference]);
        (padded_span(xs), padded_span(ys))
    }

    /// Character grid with reference lines and one letter per line.
    fn grid(&self) -> Vec<String> {
        let ((x0, x1), (y0, y1)) = self.bounds();
        let col = |x: f64| (((x - x0) / (x1 - x0)) * (GRID_W - 1) as f64).round() as usize;
        let row = |y: f64| (((y1 - y) / (y1 - y0)) * (GRID_H - 1) as f64).round() as usize;
        let mut cells = vec![vec![' '; GRID_W]; GRID_H];
        let zero_row = row(self.margin_reference).min(GRID_H - 1);
        for c in cells[zero_row].iter_mut() {
            *c = '-';
        }
        let ref_col = col(self.revenue_reference).min(GRID_W - 1);
        for r in cells.iter_mut() {
            r[ref_col] = if r[ref_col] == '-' { '+' } else { '|' };
        }
        for p in &self.points {
            let r = row(p.annual_margin).min(GRID_H - 1);
            let c = col(p.annual_revenue).min(GRID_W - 1);
            cells[r][c] = p.line.code().chars().next().unwrap_or('?');
        }
        cells.into_iter().map(|r| r.into_iter().collect()).collect()
    }
}

impl Render for StrategyMatrixView {
    fn title(&self) -> &'static str {
        "Strategy matrix: revenue vs margin"
    }

    fn render_text(&self) -> String {
        let mut out = heading(self.title());
        out.push_str("\nmargin ^\n");
        for line in self.grid() {
            out.push_str(&format!("       |{}\n", line));
        }
        out.push_str(&format!("       +{}> revenue\n", "-".repeat(GRID_W)));
        out.push_str(&format!(
            "\nreference lines: margin = 0, revenue = {} (mean)\n\n",
            format_eur(self.revenue_reference)
        ));
        out.push_str(&format!(
            "{:<22} {:>13} {:>13} {:>7} {:>7}  {}\n",
            "Line", "Revenue", "Margin", "ROI", "Size", "Quadrant"
        ));
        for p in &self.points {
            out.push_str(&format!(
                "{:<22} {:>13} {:>13} {:>7.2} {:>7.0}  {}\n",
                p.label,
                format_eur(p.annual_revenue),
                format_eur(p.annual_margin),
                p.roi,
                p.marker_size,
                p.quadrant.label()
            ));
        }
        out
    }
}
