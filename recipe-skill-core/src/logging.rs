use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::schema::LoggingConfig;

const LOG_FILE_PREFIX: &str = "recipe-skill.log";
const SECS_PER_DAY: u64 = 24 * 3600;

/// Initialize the logging system
///
/// Logs go to stderr and to a daily rolling file in `config.dir`. The
/// returned guard must be held for the lifetime of the process so buffered
/// file output is flushed.
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level_str));

    for (module, level) in &config.overrides {
        if let Ok(directive) = format!("{}={}", module, level).parse() {
            filter = filter.add_directive(directive);
        } else {
            eprintln!("Invalid log directive: {}={}", module, level);
        }
    }

    let format_str = std::env::var("LOG_FORMAT").unwrap_or_else(|_| config.format.clone());
    let is_json = format_str.eq_ignore_ascii_case("json");

    // Produces recipe-skill.log.YYYY-MM-DD
    let file_appender = tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Console output goes to stderr; stdout carries spoken dialogs.
    let console_layer = if is_json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let file_layer = if is_json {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Err(e) = cleanup_old_logs(Path::new(&config.dir), config.retention_days) {
        eprintln!("Failed to clean up old logs: {}", e);
    }

    guard
}

/// Remove rotated log files older than `days` days
fn cleanup_old_logs(dir: &Path, days: u64) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let now = SystemTime::now();
    let threshold = Duration::from_secs(days.saturating_mul(SECS_PER_DAY));
    let mut removed = 0;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX));
        if !is_log {
            continue;
        }

        let age = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok());

        if age.is_some_and(|age| age > threshold) {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => eprintln!("Failed to remove old log file {:?}: {}", path, e),
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 7).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_keeps_fresh_and_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("recipe-skill.log.2026-10-17"), "x").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(cleanup_old_logs(temp_dir.path(), 7).unwrap(), 0);
        assert!(temp_dir.path().join("recipe-skill.log.2026-10-17").exists());
        assert!(temp_dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_cleanup_with_huge_retention_keeps_logs() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("recipe-skill.log.2026-10-17"), "x").unwrap();

        assert_eq!(cleanup_old_logs(temp_dir.path(), u64::MAX / 1000).unwrap(), 0);
        assert_eq!(cleanup_old_logs(temp_dir.path(), u64::MAX).unwrap(), 0);
        assert!(temp_dir.path().join("recipe-skill.log.2026-10-17").exists());
    }

    #[test]
    fn test_cleanup_with_zero_retention_removes_only_logs() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("recipe-skill.log.2026-10-01"), "x").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cleanup_old_logs(temp_dir.path(), 0).unwrap(), 1);
        assert!(!temp_dir.path().join("recipe-skill.log.2026-10-01").exists());
        assert!(temp_dir.path().join("notes.txt").exists());
    }
}
