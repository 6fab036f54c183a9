//! Self-contained HTML dashboard page.
//!
//! All slide views are embedded as one JSON blob and drawn client-side as
//! inline SVG, with a tab bar for navigation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::board::Board;
use crate::dataset::DatasetManifest;
use crate::kpi::PortfolioTotals;
use crate::model::LineSummary;
use crate::slides::{Render, SlideView};

#[derive(Debug, Serialize)]
struct TabEntry {
    name: &'static str,
    label: &'static str,
    title: &'static str,
}

#[derive(Debug, Serialize)]
struct PageData<'a> {
    generated: String,
    manifest: &'a DatasetManifest,
    summaries: &'a [LineSummary],
    totals: &'a PortfolioTotals,
    tabs: Vec<TabEntry>,
    views: &'a [SlideView],
}

pub fn render_page(board: &Board, manifest: &DatasetManifest, views: &[SlideView]) -> Result<String> {
    let data = PageData {
        generated: crate::logging::ts_now(),
        manifest,
        summaries: &board.summaries,
        totals: &board.totals,
        tabs: views
            .iter()
            .map(|v| TabEntry {
                name: v.slide().name(),
                label: v.slide().label(),
                title: v.title(),
            })
            .collect(),
        views,
    };
    // `</` would close the script element early
    let json_blob = serde_json::to_string(&data)
        .context("serializing dashboard data")?
        .replace("</", "<\\/");
    Ok(TEMPLATE.replace("__DASHBOARD_DATA__", &json_blob))
}

pub fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, html).with_context(|| format!("writing {}", path.display()))
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Product line strategy</title>
  <style>
    :root { --bg:#0d1117; --fg:#e6edf3; --muted:#8b949e; --border:#30363d; --accent:#58a6ff;
            --green:#3fb950; --yellow:#d29922; --red:#f85149; }
    body { margin:0; background:var(--bg); color:var(--fg); font:14px/1.5 system-ui, sans-serif; }
    header { padding:1rem 1.5rem; border-bottom:1px solid var(--border); }
    header small { color:var(--muted); }
    nav { display:flex; gap:0.5rem; padding:0.75rem 1.5rem; border-bottom:1px solid var(--border); flex-wrap:wrap; }
    nav button { background:none; border:1px solid var(--border); color:var(--fg); padding:0.35rem 0.8rem;
                 border-radius:6px; cursor:pointer; }
    nav button.active { border-color:var(--accent); color:var(--accent); }
    main { padding:1.5rem; max-width:1100px; }
    .callout { border-left:4px solid; padding:0.5rem 1rem; margin:1rem 0; background:#161b22; }
    .callout.success { border-color:var(--green); } .callout.warning { border-color:var(--yellow); }
    .callout.error { border-color:var(--red); }
    .figures { color:var(--muted); font-size:0.9em; }
    svg text { fill:var(--fg); font-size:11px; }
    svg .axis { stroke:var(--muted); } svg .ref { stroke:var(--muted); stroke-dasharray:4 4; }
    .charts { display:flex; gap:2rem; flex-wrap:wrap; }
  </style>
</head>
<body>
  <header><h1>Product line strategy</h1><small id="meta"></small></header>
  <nav id="tabs"></nav>
  <main id="slide"></main>
  <script id="dashboard-data" type="application/json">__DASHBOARD_DATA__</script>
  <script>
  const DATA = JSON.parse(document.getElementById('dashboard-data').textContent);
  const COLORS = ['#58a6ff', '#f0883e', '#3fb950', '#bc8cff', '#ff7b72', '#d2a8ff'];
  const eur = v => Math.round(v).toLocaleString('fr-FR') + ' €';
  const pct = v => (v * 100).toFixed(1) + '%';

  function frame(w, h, x0, x1, y0, y1) {
    const pad = 48;
    return {
      w, h,
      sx: x => pad + (x - x0) / ((x1 - x0) || 1) * (w - 2 * pad),
      sy: y => h - pad - (y - y0) / ((y1 - y0) || 1) * (h - 2 * pad),
      axes: `<line class="axis" x1="${pad}" y1="${h - pad}" x2="${w - pad}" y2="${h - pad}"/>` +
            `<line class="axis" x1="${pad}" y1="${pad}" x2="${pad}" y2="${h - pad}"/>`,
    };
  }
  const svg = (f, body) => `<svg width="${f.w}" height="${f.h}">${f.axes}${body}</svg>`;

  function decisions(v) {
    return v.recommendations.map(r => `<div class="callout ${r.verdict.tone}">
      <strong>${r.label} → ${r.verdict.headline}</strong>
      <ul>${r.arguments.map(a => `<li>${a}</li>`).join('')}</ul>
      <p>👉 ${r.takeaway}</p>
      <p class="figures">revenue ${eur(r.annual_revenue)} · margin ${eur(r.annual_margin)} ·
        ROI ${r.roi.toFixed(2)} · returns ${pct(r.mean_return_rate)}</p></div>`).join('');
  }

  function timeSeries(v) {
    const all = v.series.flatMap(s => s.points.map(p => p.revenue));
    const f = frame(900, 420, 1, 12, Math.min(0, ...all), Math.max(...all));
    let body = v.periods.map(p => `<text x="${f.sx(p)}" y="${f.h - 30}" text-anchor="middle">${p}</text>`).join('');
    v.series.forEach((s, i) => {
      const pts = s.points.map(p => `${f.sx(p.period)},${f.sy(p.revenue)}`).join(' ');
      body += `<polyline fill="none" stroke="${COLORS[i]}" stroke-width="2" points="${pts}"/>`;
      body += s.points.map(p => `<circle cx="${f.sx(p.period)}" cy="${f.sy(p.revenue)}" r="3" fill="${COLORS[i]}"/>`).join('');
      body += `<text x="${f.w - 200}" y="${20 + i * 16}" style="fill:${COLORS[i]}">${s.label}</text>`;
    });
    return svg(f, body);
  }

  function distribution(v) {
    const top = Math.max(...v.bins.map(b => b.density), ...v.normal_fit.map(p => p.density));
    const f = frame(800, 420, v.bins[0].lower, v.bins[v.bins.length - 1].upper, 0, top);
    let body = v.bins.map(b => `<rect x="${f.sx(b.lower)}" y="${f.sy(b.density)}"
      width="${f.sx(b.upper) - f.sx(b.lower) - 1}" height="${f.sy(0) - f.sy(b.density)}" fill="#6e7681"/>`).join('');
    const pts = v.normal_fit.map(p => `${f.sx(p.x)},${f.sy(p.density)}`).join(' ');
    body += `<polyline fill="none" stroke="${COLORS[0]}" stroke-width="2" points="${pts}"/>`;
    body += `<text x="60" y="20">mean ${eur(v.mean)} · std ${eur(v.std_dev)} · n = ${v.samples}</text>`;
    return svg(f, body);
  }

  function bars(series, fmt, caption) {
    const top = Math.max(...series.map(b => b.value));
    const f = frame(420, 320, 0, series.length, 0, top);
    const bw = (f.sx(1) - f.sx(0)) * 0.6;
    const body = series.map((b, i) => `<rect x="${f.sx(i + 0.2)}" y="${f.sy(b.value)}" width="${bw}"
      height="${f.sy(0) - f.sy(b.value)}" fill="${COLORS[i]}"/>
      <text x="${f.sx(i + 0.5)}" y="${f.sy(b.value) - 4}" text-anchor="middle">${fmt(b.value)}</text>
      <text x="${f.sx(i + 0.5)}" y="${f.h - 30}" text-anchor="middle">${b.line}</text>`).join('');
    return `<div><h3>${caption}</h3>${svg(f, body)}</div>`;
  }

  function marketingSav(v) {
    return `<div class="charts">${bars(v.marketing_budget, eur, 'Total marketing budget by line')}
      ${bars(v.return_rate, pct, 'After-sales return rate')}</div>`;
  }

  function strategyMatrix(v) {
    const xs = v.points.map(p => p.annual_revenue).concat([v.revenue_reference]);
    const ys = v.points.map(p => p.annual_margin).concat([v.margin_reference]);
    const padX = (Math.max(...xs) - Math.min(...xs)) * 0.1 || 1;
    const padY = (Math.max(...ys) - Math.min(...ys)) * 0.15 || 1;
    const f = frame(820, 480, Math.min(...xs) - padX, Math.max(...xs) + padX,
                    Math.min(...ys) - padY, Math.max(...ys) + padY);
    const shade = roi => {
      const t = (roi - v.roi_min) / ((v.roi_max - v.roi_min) || 1);
      return `hsl(${260 - t * 200}, 70%, 55%)`;
    };
    let body = `<line class="ref" x1="${f.sx(Math.min(...xs) - padX)}" x2="${f.sx(Math.max(...xs) + padX)}"
      y1="${f.sy(0)}" y2="${f.sy(0)}"/>`;
    body += `<line class="ref" x1="${f.sx(v.revenue_reference)}" x2="${f.sx(v.revenue_reference)}"
      y1="${f.sy(Math.max(...ys) + padY)}" y2="${f.sy(Math.min(...ys) - padY)}"/>`;
    body += v.points.map(p => `<circle cx="${f.sx(p.annual_revenue)}" cy="${f.sy(p.annual_margin)}"
      r="${Math.sqrt(p.marker_size) * 1.5}" fill="${shade(p.roi)}" fill-opacity="0.75"/>
      <text x="${f.sx(p.annual_revenue) + 8}" y="${f.sy(p.annual_margin) - 6}">${p.label} (ROI ${p.roi.toFixed(2)})</text>`).join('');
    return svg(f, body);
  }

  const RENDERERS = {
    'decisions': decisions,
    'time-series': timeSeries,
    'distribution': distribution,
    'marketing-sav': marketingSav,
    'strategy-matrix': strategyMatrix,
  };

  function show(idx) {
    const tab = DATA.tabs[idx];
    const view = DATA.views[idx];
    document.querySelectorAll('nav button').forEach((b, i) => b.classList.toggle('active', i === idx));
    document.getElementById('slide').innerHTML = `<h2>${tab.title}</h2>` + RENDERERS[view.slide](view);
  }

  document.getElementById('meta').textContent =
    `generated ${DATA.generated} · ${DATA.manifest.rows} rows · seed ${DATA.manifest.seed} · ` +
    `sha256 ${DATA.manifest.hash_sha256.slice(0, 12)}`;
  document.getElementById('tabs').innerHTML =
    DATA.tabs.map((t, i) => `<button onclick="show(${i})">${t.label}</button>`).join('');
  show(0);
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{self, DatasetConfig};
    use crate::slides::{build_all, ViewOptions};

    #[test]
    fn test_page_embeds_all_views() {
        let cfg = DatasetConfig::default();
        let board = Board::load(&cfg).unwrap();
        let manifest = dataset::manifest(&cfg, &board.observations).unwrap();
        let views = build_all(&board, &ViewOptions::default()).unwrap();
        let html = render_page(&board, &manifest, &views).unwrap();
        assert!(!html.contains("__DASHBOARD_DATA__"));
        for name in ["decisions", "time-series", "distribution", "marketing-sav", "strategy-matrix"] {
            assert!(html.contains(&format!("\"slide\":\"{}\"", name)), "missing {}", name);
        }
        assert!(html.contains(&manifest.hash_sha256));
        for headline in ["INVEST / ACCELERATE", "OPTIMIZE", "ABANDON / PIVOT"] {
            assert!(html.contains(&format!("\"headline\":\"{}\"", headline)), "missing {}", headline);
        }
        assert!(html.contains("${r.verdict.headline}"));
    }
}
