//! Tracing setup
//!
//! Logs always go to stderr (stdout carries the MCP protocol). When a log
//! directory is configured, the same events are appended to a daily
//! `<dir>/<YYYY-MM-DD>.log` file as well.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize tracing for the server
///
/// - Default level is `info` for `crate_name`; a valid `RUST_LOG` replaces it
/// - `LOG_FORMAT=json` switches both outputs to JSON lines
/// - The log file switches to a new `<date>.log` at local midnight
pub fn init_tracing(crate_name: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(crate_name, rust_log.as_deref())?;

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);
    layers.push(if use_json {
        stderr.json().boxed()
    } else {
        stderr.boxed()
    });

    let daily = match log_dir {
        Some(dir) => Some(
            DailyLog::open(dir, Local::now().date_naive())
                .with_context(|| format!("failed to open log file in {}", dir.display()))?,
        ),
        None => None,
    };
    let log_path = daily.as_ref().map(DailyLog::current_path);
    if let Some(daily) = daily {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(daily)
            .with_ansi(false);
        layers.push(if use_json {
            file_layer.json().boxed()
        } else {
            file_layer.boxed()
        });
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .init();

    if let Some(path) = log_path {
        tracing::info!("Writing logs to {}", path.display());
    }
    Ok(())
}

/// `RUST_LOG` when set and valid, otherwise `<crate_name>=info`
pub fn env_filter(crate_name: &str, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return Ok(filter),
            Err(e) => eprintln!("ignoring invalid RUST_LOG '{}': {}", directives, e),
        }
    }

    EnvFilter::try_new(format!("{}=info", crate_name))
        .with_context(|| format!("invalid crate name for log filter: '{}'", crate_name))
}

/// Path of the log file for `date` inside `dir`
pub fn log_file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.log", date.format("%Y-%m-%d")))
}

fn open_log_file(dir: &Path, date: NaiveDate) -> io::Result<File> {
    std::fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(dir, date))
}

/// Append-only log file that follows the local date
struct DailyLog {
    dir: PathBuf,
    current: Mutex<(NaiveDate, File)>,
}

impl DailyLog {
    fn open(dir: &Path, date: NaiveDate) -> io::Result<Self> {
        let file = open_log_file(dir, date)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            current: Mutex::new((date, file)),
        })
    }

    fn current_path(&self) -> PathBuf {
        let current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        log_file_path(&self.dir, current.0)
    }

    fn write_at(&self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        if current.0 != date {
            *current = (date, open_log_file(&self.dir, date)?);
        }
        current.1.write(buf)
    }
}

impl Write for &DailyLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_at(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        current.1.flush()
    }
}

impl<'a> MakeWriter<'a> for DailyLog {
    type Writer = &'a DailyLog;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}
