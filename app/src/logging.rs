use std::fs::{self, File};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

// The TUI owns stdout/stderr, so logs go to a file; when no writable
// location exists the session simply runs unlogged.
pub fn init_file_logging() {
    let log_path = log_file_path();
    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(log_file) = File::create(&log_path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

#[must_use]
pub fn log_file_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("sqlpane").join("sqlpane.log");
    }
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("sqlpane").join("sqlpane.log");
    }
    std::env::temp_dir().join("sqlpane.log")
}

#[cfg(test)]
mod tests {
    use super::log_file_path;

    #[test]
    fn log_path_is_absolute_and_named_after_the_app() {
        let path = log_file_path();
        assert!(path.is_absolute());
        assert!(path.ends_with("sqlpane.log"));
    }
}
