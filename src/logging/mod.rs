use std::{
    fs::{create_dir_all, File, OpenOptions},
    io,
    path::Path,
};

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::{config, config_error, core::ChainResult};

/// Open `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            create_dir_all(parent)?;
        }
    }

    OpenOptions::new().append(true).create(true).open(path)
}

pub struct Logger {
    config: Option<config::Log>,
}

impl Logger {
    pub fn new(config: Option<config::Log>) -> Self {
        Self { config }
    }

    fn builder() -> Builder {
        let mut builder = Builder::new();
        builder.filter(None, LevelFilter::Info);
        // RUST_LOG still wins over the default level
        builder.parse_env(Env::default());
        builder
    }

    /// Install the global logger. Logs go to stderr unless a log file is
    /// configured.
    ///
    /// # Errors
    /// `ChainError::Io` if the log file cannot be opened,
    /// `ChainError::Configuration` if a logger is already installed.
    pub fn init_env_logger(&self) -> ChainResult<()> {
        let mut builder = Self::builder();
        if let Some(log) = &self.config {
            let file = open_log_file(&log.path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        builder
            .try_init()
            .map_err(|e| config_error!("Failed to install logger: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write, path::PathBuf};

    use crate::core::ChainError;

    use super::*;

    #[test]
    fn test_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/carechain.log");

        open_log_file(&path).unwrap().write_all(b"first\n").unwrap();
        open_log_file(&path).unwrap().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_unopenable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // The target is a directory, so opening it for append fails before
        // any global logger is installed.
        let logger = Logger::new(Some(config::Log {
            path: PathBuf::from(dir.path()),
        }));
        assert!(matches!(logger.init_env_logger(), Err(ChainError::Io(_))));
    }
}
