//! Terminal dashboard.
//!
//! Usage: lineboard [all | slide <name> | summary | manifest] [--json]

use anyhow::{anyhow, Result};
use lineboard::board::Board;
use lineboard::config::Config;
use lineboard::dataset;
use lineboard::logging::{log, obj, v_str, Domain, Level, ProfileScope};
use lineboard::render::{self, format_eur, format_pct, heading, OutputFormat};
use lineboard::slides::{self, Slide, ViewOptions};

const USAGE: &str = "usage: lineboard [all | slide <name> | summary | manifest] [--json]
slides: decisions, time-series, distribution, marketing-sav, strategy-matrix";

#[derive(Debug, PartialEq)]
enum Command {
    All,
    One(Slide),
    Summary,
    Manifest,
}

fn parse_args(args: &[String], default_format: OutputFormat) -> Result<(Command, OutputFormat)> {
    let mut format = default_format;
    let mut words = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "--text" => format = OutputFormat::Text,
            other => words.push(other),
        }
    }
    let command = match words.as_slice() {
        [] | ["all"] => Command::All,
        ["summary"] => Command::Summary,
        ["manifest"] => Command::Manifest,
        ["slide", name] => Command::One(name.parse()?),
        _ => return Err(anyhow!("unrecognized arguments: {:?}", words)),
    };
    Ok((command, format))
}

fn summary_text(board: &Board) -> String {
    let mut out = heading("Annual rollup by line");
    out.push_str(&format!(
        "\n{:<22} {:>13} {:>13} {:>13} {:>8} {:>8}\n",
        "Line", "Revenue", "Margin", "Marketing", "Returns", "ROI"
    ));
    for s in &board.summaries {
        out.push_str(&format!(
            "{:<22} {:>13} {:>13} {:>13} {:>8} {:>8.3}\n",
            s.line.label(),
            format_eur(s.annual_revenue),
            format_eur(s.annual_margin),
            format_eur(s.annual_marketing_budget),
            format_pct(s.mean_return_rate),
            s.roi
        ));
    }
    out.push_str(&format!(
        "{:<22} {:>13} {:>13} {:>13}\n",
        "Total",
        format_eur(board.totals.revenue),
        format_eur(board.totals.margin),
        format_eur(board.totals.marketing_budget)
    ));
    out
}

fn run(cfg: &Config, command: Command, format: OutputFormat) -> Result<String> {
    let dataset_cfg = cfg.dataset();
    let board = Board::load(&dataset_cfg)?;
    let opts = ViewOptions::from(cfg);
    match command {
        Command::All => {
            let views = {
                let _scope = ProfileScope::new("build_views");
                slides::build_all(&board, &opts)?
            };
            render::render_views(&views, format)
        }
        Command::One(slide) => {
            let view = {
                let _scope = ProfileScope::new("build_views");
                slide.build(&board, &opts)?
            };
            render::render_view(&view, format)
        }
        Command::Summary => match format {
            OutputFormat::Text => Ok(summary_text(&board)),
            OutputFormat::Json => render::to_json(&board.summaries),
        },
        Command::Manifest => {
            let manifest = dataset::manifest(&dataset_cfg, &board.observations)?;
            render::to_json(&manifest)
        }
    }
}

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, format) = match parse_args(&args, cfg.output) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{}\n{}", err, USAGE);
            std::process::exit(2);
        }
    };
    log(
        Level::Info,
        Domain::System,
        "start",
        obj(&[
            ("command", v_str(&format!("{:?}", command))),
            ("format", v_str(format.as_str())),
        ]),
    );
    let out = run(&cfg, command, format).map_err(|err| {
        log(
            Level::Error,
            Domain::System,
            "failed",
            obj(&[("msg", v_str(&err.to_string()))]),
        );
        err
    })?;
    println!("{}", out);
    log(Level::Info, Domain::System, "done", obj(&[("bytes", serde_json::json!(out.len()))]));
    Ok(())
}
