//! Core records: product lines, monthly observations and annual summaries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KpiError, KpiResult};

pub const FIRST_PERIOD: u8 = 1;
pub const LAST_PERIOD: u8 = 12;

/// Product line (grouping key for aggregation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    A, // Best-seller
    B, // Innovation
    C, // Classic
}

impl ProductLine {
    pub const ALL: [ProductLine; 3] = [ProductLine::A, ProductLine::B, ProductLine::C];

    pub fn code(&self) -> &'static str {
        match self {
            ProductLine::A => "A",
            ProductLine::B => "B",
            ProductLine::C => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductLine::A => "Line A (Best-Seller)",
            ProductLine::B => "Line B (Innovation)",
            ProductLine::C => "Line C (Classic)",
        }
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductLine {
    type Err = KpiError;

    fn from_str(s: &str) -> KpiResult<Self> {
        let trimmed = s.trim();
        ProductLine::ALL
            .into_iter()
            .find(|line| {
                trimmed.eq_ignore_ascii_case(line.code()) || trimmed.eq_ignore_ascii_case(line.label())
            })
            .ok_or_else(|| KpiError::invalid(format!("unrecognized product line: {:?}", s)))
    }
}

/// One line's figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: u8,
    pub line: ProductLine,
    pub revenue: f64,
    pub production_cost: f64,
    pub marketing_budget: f64,
    /// Fraction of units returned to after-sales service, in [0, 1].
    pub return_rate: f64,
}

impl Observation {
    pub fn new(
        period: u8,
        line: ProductLine,
        revenue: f64,
        production_cost: f64,
        marketing_budget: f64,
        return_rate: f64,
    ) -> KpiResult<Self> {
        let obs = Self {
            period,
            line,
            revenue,
            production_cost,
            marketing_budget,
            return_rate,
        };
        obs.validate()?;
        Ok(obs)
    }

    /// Revenue minus production cost minus marketing spend.
    pub fn margin(&self) -> f64 {
        self.revenue - self.production_cost - self.marketing_budget
    }

    pub fn validate(&self) -> KpiResult<()> {
        if !(FIRST_PERIOD..=LAST_PERIOD).contains(&self.period) {
            return Err(KpiError::invalid(format!(
                "period {} outside {}..={} for {}",
                self.period, FIRST_PERIOD, LAST_PERIOD, self.line
            )));
        }
        let fields = [
            ("revenue", self.revenue),
            ("production_cost", self.production_cost),
            ("marketing_budget", self.marketing_budget),
            ("return_rate", self.return_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(KpiError::invalid(format!(
                    "{} is not finite for {} period {}",
                    name, self.line, self.period
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.return_rate) {
            return Err(KpiError::invalid(format!(
                "return_rate {} outside [0, 1] for {} period {}",
                self.return_rate, self.line, self.period
            )));
        }
        Ok(())
    }
}

/// Annual rollup for one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    pub line: ProductLine,
    pub annual_revenue: f64,
    pub annual_margin: f64,
    pub annual_marketing_budget: f64,
    pub mean_return_rate: f64,
    /// annual_margin / annual_marketing_budget
    pub roi: f64,
    pub periods: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin() {
        let obs = Observation::new(1, ProductLine::A, 50_000.0, 35_000.0, 5_000.0, 0.25).unwrap();
        assert_eq!(obs.margin(), 10_000.0);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!("a".parse::<ProductLine>().unwrap(), ProductLine::A);
        assert_eq!(" C ".parse::<ProductLine>().unwrap(), ProductLine::C);
        assert_eq!("Line B (Innovation)".parse::<ProductLine>().unwrap(), ProductLine::B);
        assert!(matches!("D".parse::<ProductLine>(), Err(KpiError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_out_of_range_period() {
        assert!(Observation::new(0, ProductLine::A, 1.0, 0.0, 1.0, 0.1).is_err());
        assert!(Observation::new(13, ProductLine::A, 1.0, 0.0, 1.0, 0.1).is_err());
        assert!(Observation::new(12, ProductLine::A, 1.0, 0.0, 1.0, 0.1).is_ok());
    }

    #[test]
    fn test_rejects_bad_return_rate() {
        assert!(Observation::new(3, ProductLine::B, 1.0, 0.0, 1.0, 1.5).is_err());
        assert!(Observation::new(3, ProductLine::B, 1.0, 0.0, 1.0, -0.01).is_err());
        assert!(Observation::new(3, ProductLine::B, 1.0, 0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_non_finite_amounts() {
        assert!(Observation::new(3, ProductLine::C, f64::INFINITY, 0.0, 1.0, 0.1).is_err());
    }

    #[test]
    fn test_lines_sort_in_canonical_order() {
        let mut lines = vec![ProductLine::C, ProductLine::A, ProductLine::B];
        lines.sort();
        assert_eq!(lines, ProductLine::ALL.to_vec());
    }
}
