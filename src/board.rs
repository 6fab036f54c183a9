//! Per-invocation dashboard context: the observations and their rollup.

use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::{self, DatasetConfig};
use crate::error::{KpiError, KpiResult};
use crate::kpi::{self, PortfolioTotals};
use crate::logging::{self, ProfileScope};
use crate::model::{LineSummary, Observation, ProductLine};

#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub observations: Vec<Observation>,
    pub summaries: Vec<LineSummary>,
    pub totals: PortfolioTotals,
}

impl Board {
    /// Generate the dataset and aggregate it.
    pub fn load(cfg: &DatasetConfig) -> KpiResult<Self> {
        let observations = dataset::generate(cfg);
        let hash = dataset::fingerprint(&observations)?;
        logging::log_dataset_loaded(observations.len(), cfg.seed, cfg.noise_amplitude, &hash);
        Self::from_observations(observations)
    }

    /// Rejects a second observation for the same line and period.
    pub fn from_observations(observations: Vec<Observation>) -> KpiResult<Self> {
        let mut seen = HashSet::with_capacity(observations.len());
        if let Some(dup) = observations.iter().find(|o| !seen.insert((o.line, o.period))) {
            let err = KpiError::invalid(format!("duplicate observation for {} period {}", dup.line, dup.period));
            logging::log_kpi_error("load", &err);
            return Err(err);
        }
        let _scope = ProfileScope::with_context(
            "aggregate",
            &[("rows", serde_json::json!(observations.len()))],
        );
        let summaries = kpi::aggregate(&observations).map_err(|err| {
            logging::log_kpi_error("aggregate", &err);
            err
        })?;
        for summary in &summaries {
            logging::log_line_summary(summary);
        }
        let totals = kpi::portfolio_totals(&summaries)?;
        Ok(Self {
            observations,
            summaries,
            totals,
        })
    }

    pub fn summary(&self, line: ProductLine) -> Option<&LineSummary> {
        kpi::summary_for(&self.summaries, line)
    }

    /// Observations of one line, in period order.
    pub fn series(&self, line: ProductLine) -> Vec<&Observation> {
        let mut rows: Vec<&Observation> = self.observations.iter().filter(|o| o.line == line).collect();
        rows.sort_by_key(|o| o.period);
        rows
    }

    pub fn lines(&self) -> Vec<ProductLine> {
        self.summaries.iter().map(|s| s.line).collect()
    }

    pub fn revenues(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.revenue).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_board() {
        let board = Board::load(&DatasetConfig::default()).unwrap();
        assert_eq!(board.observations.len(), 36);
        assert_eq!(board.lines(), ProductLine::ALL.to_vec());
        assert_eq!(board.totals.lines, 3);
    }

    #[test]
    fn test_noiseless_board_figures() {
        let board = Board::load(&DatasetConfig::noiseless()).unwrap();
        let a = board.summary(ProductLine::A).unwrap();
        assert_eq!(a.annual_revenue, 557_000.0);
        assert_eq!(a.annual_margin, 557_000.0 - 420_000.0 - 60_000.0);
        let b = board.summary(ProductLine::B).unwrap();
        assert!(b.annual_margin < 0.0);
        let c = board.summary(ProductLine::C).unwrap();
        assert!(c.roi > a.roi);
    }

    #[test]
    fn test_series_sorted_by_period() {
        let mut rows = dataset::baseline();
        rows.reverse();
        let board = Board::from_observations(rows).unwrap();
        let periods: Vec<u8> = board.series(ProductLine::B).iter().map(|o| o.period).collect();
        assert_eq!(periods, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_empty_board_is_invalid() {
        assert!(matches!(Board::from_observations(Vec::new()), Err(KpiError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_period_is_invalid() {
        let mut rows = dataset::baseline();
        let extra = rows[0].clone();
        rows.push(extra);
        let err = Board::from_observations(rows).unwrap_err();
        assert!(matches!(err, KpiError::InvalidInput(ref msg) if msg.contains("period 1")), "{:?}", err);
    }
}
