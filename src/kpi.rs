//! KPI aggregation: per-line margin and annual rollup with marketing ROI.
//!
//! Single pass, order independent. Output is ordered by `ProductLine`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{KpiError, KpiResult};
use crate::model::{LineSummary, Observation, ProductLine};

#[derive(Debug, Default)]
struct LineAccumulator {
    revenue: f64,
    margin: f64,
    marketing_budget: f64,
    return_rate_sum: f64,
    count: usize,
}

impl LineAccumulator {
    fn push(&mut self, obs: &Observation) {
        self.revenue += obs.revenue;
        self.margin += obs.margin();
        self.marketing_budget += obs.marketing_budget;
        self.return_rate_sum += obs.return_rate;
        self.count += 1;
    }

    fn finish(self, line: ProductLine) -> KpiResult<LineSummary> {
        if self.marketing_budget == 0.0 {
            return Err(KpiError::DivisionUndefined { line });
        }
        Ok(LineSummary {
            line,
            annual_revenue: self.revenue,
            annual_margin: self.margin,
            annual_marketing_budget: self.marketing_budget,
            mean_return_rate: self.return_rate_sum / self.count as f64,
            roi: self.margin / self.marketing_budget,
            periods: self.count,
        })
    }
}

/// Roll monthly observations up into one summary per distinct line.
pub fn aggregate(observations: &[Observation]) -> KpiResult<Vec<LineSummary>> {
    if observations.is_empty() {
        return Err(KpiError::invalid("empty observation set"));
    }

    let mut by_line: BTreeMap<ProductLine, LineAccumulator> = BTreeMap::new();
    for obs in observations {
        obs.validate()?;
        by_line.entry(obs.line).or_default().push(obs);
    }

    by_line
        .into_iter()
        .map(|(line, acc)| acc.finish(line))
        .collect()
}

/// Totals across all lines of an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioTotals {
    pub revenue: f64,
    pub margin: f64,
    pub marketing_budget: f64,
    /// Mean of the per-line annual revenues.
    pub mean_annual_revenue: f64,
    pub lines: usize,
}

pub fn portfolio_totals(summaries: &[LineSummary]) -> KpiResult<PortfolioTotals> {
    if summaries.is_empty() {
        return Err(KpiError::invalid("no line summaries"));
    }
    let revenue: f64 = summaries.iter().map(|s| s.annual_revenue).sum();
    Ok(PortfolioTotals {
        revenue,
        margin: summaries.iter().map(|s| s.annual_margin).sum(),
        marketing_budget: summaries.iter().map(|s| s.annual_marketing_budget).sum(),
        mean_annual_revenue: revenue / summaries.len() as f64,
        lines: summaries.len(),
    })
}

/// Look up one line's summary.
pub fn summary_for(summaries: &[LineSummary], line: ProductLine) -> Option<&LineSummary> {
    summaries.iter().find(|s| s.line == line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(period: u8, line: ProductLine, revenue: f64, cost: f64, mkt: f64, rr: f64) -> Observation {
        Observation::new(period, line, revenue, cost, mkt, rr).unwrap()
    }

    #[test]
    fn test_single_line_rollup() {
        let rows = vec![
            obs(1, ProductLine::C, 20_000.0, 10_000.0, 1_000.0, 0.02),
            obs(2, ProductLine::C, 20_500.0, 10_000.0, 1_000.0, 0.04),
        ];
        let out = aggregate(&rows).unwrap();
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.annual_revenue, 40_500.0);
        assert_eq!(c.annual_margin, 18_500.0);
        assert_eq!(c.annual_marketing_budget, 2_000.0);
        assert!((c.mean_return_rate - 0.03).abs() < 1e-12);
        assert!((c.roi - 9.25).abs() < 1e-12);
        assert_eq!(c.periods, 2);
    }

    #[test]
    fn test_output_is_ordered_by_line() {
        let rows = vec![
            obs(1, ProductLine::C, 1.0, 0.0, 1.0, 0.0),
            obs(1, ProductLine::A, 1.0, 0.0, 1.0, 0.0),
            obs(1, ProductLine::B, 1.0, 0.0, 1.0, 0.0),
        ];
        let lines: Vec<_> = aggregate(&rows).unwrap().iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![ProductLine::A, ProductLine::B, ProductLine::C]);
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(matches!(aggregate(&[]), Err(KpiError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_budget_is_division_undefined() {
        let rows = vec![
            obs(1, ProductLine::A, 10.0, 5.0, 1.0, 0.1),
            obs(1, ProductLine::B, 10.0, 5.0, 0.0, 0.1),
        ];
        assert_eq!(
            aggregate(&rows),
            Err(KpiError::DivisionUndefined { line: ProductLine::B })
        );
    }

    #[test]
    fn test_malformed_row_is_invalid() {
        let mut bad = obs(1, ProductLine::A, 10.0, 5.0, 1.0, 0.1);
        bad.period = 40;
        assert!(matches!(aggregate(&[bad]), Err(KpiError::InvalidInput(_))));
    }

    #[test]
    fn test_portfolio_totals() {
        let rows = vec![
            obs(1, ProductLine::A, 100.0, 50.0, 10.0, 0.1),
            obs(1, ProductLine::B, 300.0, 100.0, 20.0, 0.1),
        ];
        let summaries = aggregate(&rows).unwrap();
        let totals = portfolio_totals(&summaries).unwrap();
        assert_eq!(totals.revenue, 400.0);
        assert_eq!(totals.margin, 220.0);
        assert_eq!(totals.marketing_budget, 30.0);
        assert_eq!(totals.mean_annual_revenue, 200.0);
        assert!(portfolio_totals(&[]).is_err());
        assert!(summary_for(&summaries, ProductLine::C).is_none());
    }
}
