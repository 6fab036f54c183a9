//! Marketing spend and after-sales return rate per line.

use serde::Serialize;

use super::Render;
use crate::board::Board;
use crate::error::KpiResult;
use crate::model::ProductLine;
use crate::render::{bar, format_eur, format_pct, heading};

#[derive(Debug, Clone, Serialize)]
pub struct LineBar {
    pub line: ProductLine,
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketingSavView {
    /// Summed marketing budget per line.
    pub marketing_budget: Vec<LineBar>,
    /// Mean return rate per line.
    pub return_rate: Vec<LineBar>,
}

pub fn build(board: &Board) -> KpiResult<MarketingSavView> {
    let bars = |value: fn(&crate::model::LineSummary) -> f64| -> Vec<LineBar> {
        board
            .summaries
            .iter()
            .map(|s| LineBar {
                line: s.line,
                label: s.line.label(),
                value: value(s),
            })
            .collect()
    };
    Ok(MarketingSavView {
        marketing_budget: bars(|s| s.annual_marketing_budget),
        return_rate: bars(|s| s.mean_return_rate),
    })
}

fn render_bars(out: &mut String, caption: &str, bars: &[LineBar], fmt: fn(f64) -> String) {
    out.push_str(&format!("\n{}\n", caption));
    let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    for b in bars {
        out.push_str(&format!(
            "  {:<22} {:<30} {}\n",
            b.label,
            bar(b.value, max, 30),
            fmt(b.value)
        ));
    }
}

impl Render for MarketingSavView {
    fn title(&self) -> &'static str {
        "Marketing and quality"
    }

    fn render_text(&self) -> String {
        let mut out = heading(self.title());
        render_bars(&mut out, "Total marketing budget by line", &self.marketing_budget, format_eur);
        render_bars(&mut out, "After-sales return rate", &self.return_rate, format_pct);
        out
    }
}
