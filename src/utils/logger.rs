use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Result;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a config-file level name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// File logger for diagnostics the terminal should not show
#[derive(Clone)]
pub struct Logger {
    log_file_path: PathBuf,
    min_level: LogLevel,
    file_handle: Arc<Mutex<Option<std::fs::File>>>,
}

impl Logger {
    /// Open the default log file under `~/.nota/logs/`
    pub fn new(min_level: LogLevel) -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        let log_file_path = home_dir.join(".nota").join("logs").join("latest.log");
        Self::to_path(&log_file_path, min_level)
    }

    /// Open a logger at an explicit path
    pub fn to_path(path: &Path, min_level: LogLevel) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            log_file_path: path.to_path_buf(),
            min_level,
            file_handle: Arc::new(Mutex::new(Some(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_file_path
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp: DateTime<Utc> = Utc::now();
        let formatted_timestamp = timestamp.format("%Y-%m-%d %H:%M:%S%.3f UTC");

        let log_line = format!("[{}] [{}] {}\n", formatted_timestamp, level, message);

        if let Ok(mut file_guard) = self.file_handle.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.write_all(log_line.as_bytes());
                let _ = file.flush();
            }
        }
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_global_logger(min_level: LogLevel) -> Result<()> {
    let logger = Logger::new(min_level)?;
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| anyhow::anyhow!("Logger already initialized"))?;
    Ok(())
}

pub fn get_global_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

// Convenience functions for global logging
pub fn log(level: LogLevel, message: &str) {
    if let Some(logger) = get_global_logger() {
        logger.log(level, message);
    }
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn warn(message: &str) {
    log(LogLevel::Warn, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}
