//! Process-wide log setup for lane servoing binaries.
//!
//! Both back ends read the level from `LANE_SERVO_LOG`:
//! - `init_from_env` / `init_with_level` install a stderr logger printing
//!   `[elapsed LEVEL stage] message`, where `stage` is the last path segment
//!   of the record target (`fusion`, `blur`, ...).
//! - `init_tracing` (feature `tracing`) installs a `tracing-subscriber`
//!   whose filter is `LANE_SERVO_LOG`, then `RUST_LOG`, then `info`.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable naming the log level or filter.
pub const LOG_ENV_VAR: &str = "LANE_SERVO_LOG";

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {}
}

/// Last `::` segment of a log target.
fn stage_of(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn format_line(
    elapsed_s: f64,
    level: log::Level,
    target: &str,
    args: &std::fmt::Arguments<'_>,
) -> String {
    format!(
        "[{:7.3}s {:>5} {}] {}\n",
        elapsed_s,
        level,
        stage_of(target),
        args
    )
}

/// Level named by `raw` (`error`, `warn`, `info`, `debug`, `trace`, `off`),
/// case-insensitive and trimmed.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(raw.trim()).ok()
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stderr logger at `level`.
///
/// Only the first call installs anything; later calls return `Ok(())`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StageLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install the stderr logger at the level in `LANE_SERVO_LOG`, or `fallback`.
pub fn init_from_env(fallback: LevelFilter) -> Result<(), log::SetLoggerError> {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(fallback);
    init_with_level(level)
}

#[cfg(feature = "tracing")]
fn tracing_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a `tracing` subscriber that closes spans with their timings.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(tracing_filter())
        .with_span_events(FmtSpan::CLOSE);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
