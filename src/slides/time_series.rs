//! Monthly revenue per product line.

use serde::Serialize;

use super::Render;
use crate::board::Board;
use crate::error::{KpiError, KpiResult};
use crate::model::{ProductLine, FIRST_PERIOD, LAST_PERIOD};
use crate::render::{format_eur, heading, sparkline};

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub period: u8,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    pub line: ProductLine,
    pub label: &'static str,
    pub points: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesView {
    pub periods: Vec<u8>,
    pub series: Vec<LineSeries>,
}

pub fn build(board: &Board) -> KpiResult<TimeSeriesView> {
    let series: Vec<LineSeries> = board
        .lines()
        .into_iter()
        .map(|line| LineSeries {
            line,
            label: line.label(),
            points: board
                .series(line)
                .into_iter()
                .map(|o| RevenuePoint {
                    period: o.period,
                    revenue: o.revenue,
                })
                .collect(),
        })
        .collect();
    if series.is_empty() {
        return Err(KpiError::invalid("no series to plot"));
    }
    Ok(TimeSeriesView {
        periods: (FIRST_PERIOD..=LAST_PERIOD).collect(),
        series,
    })
}

impl TimeSeriesView {
    fn revenue_at(series: &LineSeries, period: u8) -> Option<f64> {
        series.points.iter().find(|p| p.period == period).map(|p| p.revenue)
    }
}

impl Render for TimeSeriesView {
    fn title(&self) -> &'static str {
        "Monthly revenue by line"
    }

    fn render_text(&self) -> String {
        let mut out = heading(self.title());
        out.push('\n');
        out.push_str(&format!("{:>6}", "Month"));
        for s in &self.series {
            out.push_str(&format!(" {:>12}", format!("Line {}", s.line.code())));
        }
        out.push('\n');
        for period in &self.periods {
            out.push_str(&format!("{:>6}", period));
            for s in &self.series {
                let cell = Self::revenue_at(s, *period)
                    .map(format_eur)
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(" {:>12}", cell));
            }
            out.push('\n');
        }
        out.push('\n');
        for s in &self.series {
            let values: Vec<f64> = s.points.iter().map(|p| p.revenue).collect();
            out.push_str(&format!("{:<22} {}\n", s.label, sparkline(&values)));
        }
        out
    }
}
