//! Strategic recommendations per product line.
//!
//! The verdicts and their arguments are fixed editorial content; the
//! supporting figures come from the current rollup.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::Render;
use crate::board::Board;
use crate::error::{KpiError, KpiResult};
use crate::model::ProductLine;
use crate::render::{format_eur, format_pct, heading};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Invest,
    Optimize,
    Abandon,
}

impl Verdict {
    pub fn kind(&self) -> &'static str {
        match self {
            Verdict::Invest => "invest",
            Verdict::Optimize => "optimize",
            Verdict::Abandon => "abandon",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Invest => "INVEST / ACCELERATE",
            Verdict::Optimize => "OPTIMIZE",
            Verdict::Abandon => "ABANDON / PIVOT",
        }
    }

    /// Severity of the callout box the verdict is shown in.
    pub fn tone(&self) -> Tone {
        match self {
            Verdict::Invest => Tone::Success,
            Verdict::Optimize => Tone::Warning,
            Verdict::Abandon => Tone::Error,
        }
    }
}

/// Serialized with its headline and tone so every renderer reads the same wording.
impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Verdict", 3)?;
        st.serialize_field("kind", self.kind())?;
        st.serialize_field("headline", self.headline())?;
        st.serialize_field("tone", &self.tone())?;
        st.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn marker(&self) -> &'static str {
        match self {
            Tone::Success => "[OK]  ",
            Tone::Warning => "[WARN]",
            Tone::Error => "[STOP]",
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Recommendation {
    pub line: ProductLine,
    pub label: &'static str,
    pub verdict: Verdict,
    pub arguments: Vec<&'static str>,
    pub takeaway: &'static str,
    pub annual_revenue: f64,
    pub annual_margin: f64,
    pub roi: f64,
    pub mean_return_rate: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DecisionsView {
    pub recommendations: Vec<Recommendation>,
}

/// Display order: C, A, B.
const PLAYBOOK: [(ProductLine, Verdict, &[&str], &str); 3] = [
    (
        ProductLine::C,
        Verdict::Invest,
        &[
            "Stable, concentrated distribution",
            "High margin",
            "Very strong marketing ROI",
        ],
        "Controlled scaling",
    ),
    (
        ProductLine::A,
        Verdict::Optimize,
        &[
            "High but volatile revenue",
            "Weak ROI",
            "Heavy after-sales load",
        ],
        "Reduce variance before growing",
    ),
    (
        ProductLine::B,
        Verdict::Abandon,
        &[
            "Unstable revenue",
            "Negative margin",
            "Ineffective marketing budget",
        ],
        "Value destruction",
    ),
];

pub fn build(board: &Board) -> KpiResult<DecisionsView> {
    let mut recommendations = Vec::with_capacity(PLAYBOOK.len());
    for (line, verdict, arguments, takeaway) in PLAYBOOK {
        let summary = board
            .summary(line)
            .ok_or_else(|| KpiError::invalid(format!("no observations for {}", line)))?;
        recommendations.push(Recommendation {
            line,
            label: line.label(),
            verdict,
            arguments: arguments.to_vec(),
            takeaway,
            annual_revenue: summary.annual_revenue,
            annual_margin: summary.annual_margin,
            roi: summary.roi,
            mean_return_rate: summary.mean_return_rate,
        });
    }
    Ok(DecisionsView { recommendations })
}

impl Render for DecisionsView {
    fn title(&self) -> &'static str {
        "Strategic decisions"
    }

    fn render_text(&self) -> String {
        let mut out = heading(self.title());
        for rec in &self.recommendations {
            out.push('\n');
            out.push_str(&format!("{} {} -> {}\n", rec.verdict.tone().marker(), rec.label, rec.verdict.headline()));
            for arg in &rec.arguments {
                out.push_str(&format!("       - {}\n", arg));
            }
            out.push_str(&format!("       => {}\n", rec.takeaway));
            out.push_str(&format!(
                "       revenue {} | margin {} | ROI {:.2} | returns {}\n",
                format_eur(rec.annual_revenue),
                format_eur(rec.annual_margin),
                rec.roi,
                format_pct(rec.mean_return_rate)
            ));
        }
        out
    }
}
