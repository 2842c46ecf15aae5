//! Tracing setup for the TUI session.
//!
//! Once the alternate screen is up, stderr belongs to the terminal UI, so
//! diagnostics go to a file sink when one was requested and are otherwise
//! discarded.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. With a log file, events are
/// appended there, filtered by `BRUME_LOG` (default `info`). Without one,
/// no subscriber is installed and tracing macros are no-ops.
pub fn init(log_file: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env("BRUME_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    tracing::info!("logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_log_file_installs_nothing() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn second_init_reports_the_existing_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brume.log");
        let path = path.to_str().unwrap();
        assert!(init(Some(path)).is_ok());
        assert!(init(Some(path)).is_err());
    }
}
