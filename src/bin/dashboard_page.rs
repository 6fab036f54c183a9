//! Writes the dashboard as a single self-contained HTML page.
//!
//! Output: first argument, else PAGE_PATH, else out/dashboard/index.html

use std::path::PathBuf;

use anyhow::Result;
use lineboard::board::Board;
use lineboard::config::Config;
use lineboard::dataset;
use lineboard::logging::{log, obj, v_str, Domain, Level, ProfileScope};
use lineboard::page;
use lineboard::slides::{build_all, ViewOptions};

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let path = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| cfg.page_path.clone()));

    let dataset_cfg = cfg.dataset();
    let board = Board::load(&dataset_cfg)?;
    let manifest = dataset::manifest(&dataset_cfg, &board.observations)?;
    let views = {
        let _scope = ProfileScope::new("build_views");
        build_all(&board, &ViewOptions::from(&cfg))?
    };
    let html = page::render_page(&board, &manifest, &views)?;
    page::write_page(&path, &html)?;

    log(
        Level::Info,
        Domain::Render,
        "page_written",
        obj(&[
            ("path", v_str(&path.display().to_string())),
            ("bytes", serde_json::json!(html.len())),
        ]),
    );
    println!("{} written ({:.1} KB)", path.display(), html.len() as f64 / 1024.0);
    Ok(())
}
