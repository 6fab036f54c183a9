//! Structured JSON-lines logging for the dashboard.
//!
//! Every record carries a run id and a sequence number so that one CLI
//! invocation can be followed end to end. Records go to stderr (stdout is
//! reserved for the rendered dashboard) and, when `LOG_DIR` is set, to
//! `events.jsonl` / `trace.jsonl` under `LOG_DIR/<run_id>/`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::error::KpiError;
use crate::model::LineSummary;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            Ok("fatal") => Level::Fatal,
            _ => Level::Warn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Data,    // Dataset generation, manifest
    Kpi,     // Aggregation results and failures
    Render,  // Slide building and output
    System,  // Startup, exit
    Profile, // Timing
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Data => "data",
            Domain::Kpi => "kpi",
            Domain::Render => "render",
            Domain::System => "system",
            Domain::Profile => "profile",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS: comma-separated list or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct FileSinks {
    events: Mutex<BufWriter<File>>,
    trace: Mutex<BufWriter<File>>,
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    files: Option<FileSinks>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let files = std::env::var("LOG_DIR")
            .ok()
            .and_then(|base| open_file_sinks(&base, &run_id));
        RunContext { run_id, files }
    })
}

fn open_file_sinks(base: &str, run_id: &str) -> Option<FileSinks> {
    let mut run_dir = PathBuf::from(base);
    run_dir.push(run_id);
    if let Err(err) = create_dir_all(&run_dir) {
        eprintln!("[log] failed to create run dir: {}", err);
        return None;
    }
    let _ = std::fs::write(
        run_dir.join("manifest.json"),
        json!({
            "run_id": run_id,
            "ts": ts_now(),
            "pid": process::id(),
            "log_dir": run_dir.to_string_lossy(),
        })
        .to_string(),
    );
    let open = |name: &str| match File::create(run_dir.join(name)) {
        Ok(f) => Some(Mutex::new(BufWriter::new(f))),
        Err(err) => {
            eprintln!("[log] failed to create {}: {}", name, err);
            None
        }
    };
    Some(FileSinks {
        events: open("events.jsonl")?,
        trace: open("trace.jsonl")?,
    })
}

fn write_line(writer: &Mutex<BufWriter<File>>, line: &str) {
    if let Ok(mut w) = writer.lock() {
        let _ = writeln!(w, "{}", line);
        let _ = w.flush();
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let ctx = ensure_run_context();
    let line = format_record(&ctx.run_id, next_seq(), level, domain, event, fields);
    if let Some(files) = &ctx.files {
        match level {
            Level::Trace | Level::Debug => write_line(&files.trace, &line),
            _ => write_line(&files.events, &line),
        }
    }
    eprintln!("{}", line);
}

fn format_record(
    run_id: &str,
    seq: u64,
    level: Level,
    domain: Domain,
    event: &str,
    mut fields: Map<String, Value>,
) -> String {
    let msg = fields.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(run_id));
    entry.insert("seq".to_string(), json!(seq));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    entry.insert("data".to_string(), Value::Object(fields));
    Value::Object(entry).to_string()
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_dataset_loaded(rows: usize, seed: u64, noise_amplitude: u32, hash: &str) {
    log(
        Level::Info,
        Domain::Data,
        "dataset_loaded",
        obj(&[
            ("rows", json!(rows)),
            ("seed", json!(seed)),
            ("noise_amplitude", json!(noise_amplitude)),
            ("hash_sha256", v_str(hash)),
        ]),
    );
}

pub fn log_line_summary(summary: &LineSummary) {
    log(
        Level::Debug,
        Domain::Kpi,
        "line_summary",
        obj(&[
            ("line", v_str(summary.line.code())),
            ("annual_revenue", v_num(summary.annual_revenue)),
            ("annual_margin", v_num(summary.annual_margin)),
            ("annual_marketing_budget", v_num(summary.annual_marketing_budget)),
            ("mean_return_rate", v_num(summary.mean_return_rate)),
            ("roi", v_num(summary.roi)),
        ]),
    );
}

pub fn log_kpi_error(stage: &str, err: &KpiError) {
    log(
        Level::Error,
        Domain::Kpi,
        "kpi_error",
        obj(&[
            ("stage", v_str(stage)),
            ("kind", v_str(err.kind())),
            ("msg", v_str(&err.to_string())),
        ]),
    );
}

pub fn log_slide_rendered(slide: &str, format: &str, bytes: usize) {
    log(
        Level::Info,
        Domain::Render,
        "slide_rendered",
        obj(&[
            ("slide", v_str(slide)),
            ("format", v_str(format)),
            ("bytes", json!(bytes)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Profiling Scope
// =============================================================================

/// Emits structured timing on drop.
pub struct ProfileScope {
    label: &'static str,
    context: Option<Map<String, Value>>,
    started: Instant,
}

impl ProfileScope {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            context: None,
            started: Instant::now(),
        }
    }

    pub fn with_context(label: &'static str, fields: &[(&str, Value)]) -> Self {
        Self {
            label,
            context: Some(obj(fields)),
            started: Instant::now(),
        }
    }

    fn fields(&mut self) -> Map<String, Value> {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut fields = self.context.take().unwrap_or_default();
        fields.insert("label".to_string(), v_str(self.label));
        fields.insert("elapsed_ms".to_string(), v_num(elapsed_ms));
        fields
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        let fields = self.fields();
        log(Level::Trace, Domain::Profile, "profile", fields);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }

    #[test]
    fn test_record_shape() {
        let line = format_record(
            "r-test",
            7,
            Level::Info,
            Domain::Kpi,
            "line_summary",
            obj(&[("msg", v_str("hello")), ("roi", v_num(0.5))]),
        );
        let v: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["run_id"], "r-test");
        assert_eq!(v["seq"], 7);
        assert_eq!(v["lvl"], "INFO");
        assert_eq!(v["component"], "kpi");
        assert_eq!(v["msg"], "hello");
        assert_eq!(v["data"]["roi"], 0.5);
        assert!(v["data"].get("msg").is_none());
    }

    #[test]
    fn test_profile_scope_fields() {
        let mut plain = ProfileScope::new("build_views");
        let fields = plain.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["label"], "build_views");
        assert!(fields["elapsed_ms"].as_f64().unwrap() >= 0.0);

        let mut scoped = ProfileScope::with_context("aggregate", &[("rows", serde_json::json!(36))]);
        let fields = scoped.fields();
        assert_eq!(fields["label"], "aggregate");
        assert_eq!(fields["rows"], 36);
    }
}
