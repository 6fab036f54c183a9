//! Output formats and terminal chart primitives.

use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::logging;
use crate::slides::{Render, SlideView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Render one slide view in the requested format.
pub fn render_view(view: &SlideView, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Text => view.render_text(),
        OutputFormat::Json => to_json(view)?,
    };
    logging::log_slide_rendered(view.slide().name(), format.as_str(), out.len());
    Ok(out)
}

/// Render several views; text views are separated by a rule, JSON is one array.
pub fn render_views(views: &[SlideView], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&views),
        OutputFormat::Text => {
            let mut parts = Vec::with_capacity(views.len());
            for view in views {
                parts.push(render_view(view, format)?);
            }
            let rule = format!("\n{}\n\n", "=".repeat(72));
            Ok(parts.join(rule.as_str()))
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing dashboard view")
}

// =============================================================================
// Text primitives
// =============================================================================

/// Whole euros with thousands separators, e.g. `-1 234 567 €`.
pub fn format_eur(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{} €", grouped)
    } else {
        format!("{} €", grouped)
    }
}

pub fn format_pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Horizontal bar scaled so that `max` fills `width` cells.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.min(width))
}

const SPARK_TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn sparkline(values: &[f64]) -> String {
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            if span <= 0.0 {
                SPARK_TICKS[3]
            } else {
                let idx = ((v - lo) / span * (SPARK_TICKS.len() - 1) as f64).round() as usize;
                SPARK_TICKS[idx.min(SPARK_TICKS.len() - 1)]
            }
        })
        .collect()
}

/// Title underlined with `=`.
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(0.0), "0 €");
        assert_eq!(format_eur(999.4), "999 €");
        assert_eq!(format_eur(554_979.0), "554 979 €");
        assert_eq!(format_eur(-1_234_567.0), "-1 234 567 €");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.25), "25.0%");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(50.0, 100.0, 10).chars().count(), 5);
        assert_eq!(bar(100.0, 100.0, 10).chars().count(), 10);
        assert_eq!(bar(-5.0, 100.0, 10), "");
        assert_eq!(bar(5.0, 0.0, 10), "");
    }

    #[test]
    fn test_sparkline() {
        let s = sparkline(&[1.0, 2.0, 3.0]);
        assert_eq!(s.chars().count(), 3);
        assert!(s.starts_with('▁'));
        assert!(s.ends_with('█'));
        assert_eq!(sparkline(&[4.0, 4.0]), "▄▄");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
