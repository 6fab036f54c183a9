//! Properties of the KPI rollup over randomly generated observation sets.

use std::collections::BTreeSet;

use lineboard::error::KpiError;
use lineboard::kpi::aggregate;
use lineboard::model::{Observation, ProductLine};
use rand::{rngs::StdRng, Rng, SeedableRng};

const TRIALS: u64 = 200;

/// Random non-empty observation set; every marketing budget is positive.
fn random_observations(rng: &mut StdRng) -> Vec<Observation> {
    let n = rng.gen_range(1..=36);
    (0..n)
        .map(|_| {
            let line = ProductLine::ALL[rng.gen_range(0..ProductLine::ALL.len())];
            Observation::new(
                rng.gen_range(1..=12),
                line,
                rng.gen_range(0..60_000) as f64,
                rng.gen_range(0..40_000) as f64,
                rng.gen_range(1..20_000) as f64,
                rng.gen_range(0.0..=1.0),
            )
            .unwrap()
        })
        .collect()
}

fn obs(line: ProductLine, period: u8, revenue: f64, cost: f64, marketing: f64) -> Observation {
    Observation::new(period, line, revenue, cost, marketing, 0.25).unwrap()
}

#[test]
fn one_summary_per_distinct_line() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..TRIALS {
        let rows = random_observations(&mut rng);
        let distinct: BTreeSet<ProductLine> = rows.iter().map(|o| o.line).collect();
        let out = aggregate(&rows).unwrap();
        assert_eq!(out.len(), distinct.len());
        let lines: BTreeSet<ProductLine> = out.iter().map(|s| s.line).collect();
        assert_eq!(lines, distinct);
    }
}

#[test]
fn revenue_is_conserved() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..TRIALS {
        let rows = random_observations(&mut rng);
        let input: f64 = rows.iter().map(|o| o.revenue).sum();
        let output: f64 = aggregate(&rows).unwrap().iter().map(|s| s.annual_revenue).sum();
        // integer-valued amounts well below 2^53: sums are exact
        assert_eq!(input, output);
    }
}

#[test]
fn mean_return_rate_within_observed_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..TRIALS {
        let rows = random_observations(&mut rng);
        for s in aggregate(&rows).unwrap() {
            let rates: Vec<f64> = rows.iter().filter(|o| o.line == s.line).map(|o| o.return_rate).collect();
            let lo = rates.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(
                s.mean_return_rate >= lo - 1e-12 && s.mean_return_rate <= hi + 1e-12,
                "{} not in [{}, {}]",
                s.mean_return_rate,
                lo,
                hi
            );
        }
    }
}

#[test]
fn aggregate_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..TRIALS {
        let rows = random_observations(&mut rng);
        assert_eq!(aggregate(&rows).unwrap(), aggregate(&rows).unwrap());
    }
}

#[test]
fn aggregate_is_order_independent() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..TRIALS {
        let rows = random_observations(&mut rng);
        let mut reversed = rows.clone();
        reversed.reverse();
        let a = aggregate(&rows).unwrap();
        let b = aggregate(&reversed).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.line, y.line);
            assert_eq!(x.annual_revenue, y.annual_revenue);
            assert_eq!(x.annual_marketing_budget, y.annual_marketing_budget);
            assert!((x.mean_return_rate - y.mean_return_rate).abs() < 1e-12);
        }
    }
}

#[test]
fn roi_matches_margin_over_budget() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..TRIALS {
        let rows = random_observations(&mut rng);
        for s in aggregate(&rows).unwrap() {
            assert_eq!(s.roi, s.annual_margin / s.annual_marketing_budget);
            assert!(s.roi.is_finite());
        }
    }
}

#[test]
fn line_a_scenario() {
    // 12 months summing to revenue 554979, cost 480000, marketing 60000
    let mut rows: Vec<Observation> = (1..=12)
        .map(|p| obs(ProductLine::A, p, 46_000.0, 40_000.0, 5_000.0))
        .collect();
    rows[11].revenue += 554_979.0 - 46_000.0 * 12.0;
    let out = aggregate(&rows).unwrap();
    assert_eq!(out.len(), 1);
    let a = &out[0];
    assert_eq!(a.annual_revenue, 554_979.0);
    assert_eq!(a.annual_marketing_budget, 60_000.0);
    assert_eq!(a.annual_margin, 14_979.0);
    assert!((a.roi - 0.24965).abs() < 1e-12);
}

#[test]
fn zero_marketing_budget_is_division_undefined() {
    let rows = vec![
        obs(ProductLine::A, 1, 50_000.0, 35_000.0, 5_000.0),
        obs(ProductLine::C, 1, 20_000.0, 10_000.0, 0.0),
        obs(ProductLine::C, 2, 20_000.0, 10_000.0, 0.0),
    ];
    let err = aggregate(&rows).unwrap_err();
    assert_eq!(err, KpiError::DivisionUndefined { line: ProductLine::C });
}

#[test]
fn empty_input_is_invalid() {
    assert!(matches!(aggregate(&[]), Err(KpiError::InvalidInput(_))));
}

#[test]
fn unrecognized_line_is_invalid() {
    let err = "Line Z".parse::<ProductLine>().unwrap_err();
    assert!(matches!(err, KpiError::InvalidInput(_)));
}
