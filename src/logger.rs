use chrono::Utc;
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;

static STDERR_LOGGER: Lazy<StderrLogger> = Lazy::new(StderrLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    STDERR_LOGGER.update_config(config.clone());

    if let Err(e) = log::set_logger(&*STDERR_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(config.min_level.to_log_level_filter());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Convert to log crate's LevelFilter
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }

    /// Convert from log crate's Level
    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_timestamps: bool,
    pub show_module: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            min_level: LogLevel::Info,
            show_colors: true,
            show_timestamps: true,
            show_module: false,
        }
    }
}

impl LoggerConfig {
    pub fn development() -> Self {
        LoggerConfig {
            min_level: LogLevel::Debug,
            show_colors: true,
            show_timestamps: true,
            show_module: true,
        }
    }

    pub fn production() -> Self {
        LoggerConfig {
            min_level: LogLevel::Info,
            show_colors: false,
            show_timestamps: true,
            show_module: false,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

// All output goes to stderr: stdout carries the MCP transport.
struct StderrLogger {
    config: Mutex<LoggerConfig>,
}

impl StderrLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    fn update_config(&self, config: LoggerConfig) {
        if let Ok(mut guard) = self.config.lock() {
            *guard = config;
        }
    }

    fn format_line(&self, record: &Record) -> String {
        let config = match self.config.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => LoggerConfig::default(),
        };

        let level = LogLevel::from_log_level(record.level());
        let mut parts: Vec<String> = Vec::with_capacity(4);

        if config.show_timestamps {
            parts.push(Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string());
        }

        let tag = format!("[{}]", level.as_str());
        if config.show_colors {
            parts.push(tag.color(level.color()).to_string());
        } else {
            parts.push(tag);
        }

        if config.show_module {
            parts.push(record.module_path().unwrap_or("unknown").to_string());
        }

        parts.push(record.args().to_string());
        parts.join(" ")
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let min_level = self
            .config
            .lock()
            .map(|c| c.min_level)
            .unwrap_or(LogLevel::Info);
        LogLevel::from_log_level(metadata.level()) >= min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record);
        let _ = writeln!(io::stderr(), "{}", line);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
