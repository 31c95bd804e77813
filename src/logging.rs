//! File-backed `tracing` subscriber. The terminal is owned by the UI, so log
//! output never goes to stdout or stderr.

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use tracing::Level;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Parse a case-insensitive level name.
pub fn parse_level(level: &str) -> Result<Level, LoggingError> {
    Level::from_str(level.trim()).map_err(|_| LoggingError::UnknownLevel(level.to_string()))
}

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when no log file is configured and nothing was
/// installed.
pub fn init(config: &LoggingConfig) -> Result<bool, LoggingError> {
    let Some(path) = &config.file else {
        return Ok(false);
    };
    let level = parse_level(&config.level)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_level("WARN").unwrap(), Level::WARN);
        assert!(matches!(
            parse_level("chatty"),
            Err(LoggingError::UnknownLevel(_))
        ));
    }

    #[test]
    fn test_init_without_file_is_noop() {
        let config = LoggingConfig::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_init_reports_bad_level_before_opening() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("game.log")),
            level: "loud".to_string(),
        };
        assert!(matches!(init(&config), Err(LoggingError::UnknownLevel(_))));
        assert!(!dir.path().join("game.log").exists());
    }
}
