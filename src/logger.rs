use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

pub struct Logger {
    pub write_to_std: Option<LogOutput>,
    pub severity: Level,
    pub file: Option<Arc<Mutex<File>>>,
    pub enable_colors: bool,
}

impl Logger {
    /// Create a new logger. File output is enabled when `file_path` is set
    /// and the file can be opened for appending.
    pub fn new(
        file_path: Option<PathBuf>,
        severity: Option<Level>,
        write_to_std: Option<LogOutput>,
        enable_colors: bool,
    ) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()
                .map(|f| Arc::new(Mutex::new(f)))
        });

        Logger {
            write_to_std,
            severity: severity.unwrap_or(Level::Info),
            file,
            enable_colors,
        }
    }

    fn timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_default()
    }

    fn color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }

    /// Parse a level name, defaulting to `Info`.
    pub fn parse_level(value: &str) -> Level {
        value.trim().parse::<Level>().unwrap_or(Level::Info)
    }

    /// Stdout when the switch is set to anything but `0`/`false`, else stderr
    pub fn output_for(switch: Option<&str>) -> LogOutput {
        match switch.map(str::trim) {
            None | Some("") | Some("0") => LogOutput::Stderr,
            Some(v) if v.eq_ignore_ascii_case("false") => LogOutput::Stderr,
            Some(_) => LogOutput::Stdout,
        }
    }

    /// Initialize logger with environment variables
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("WIKI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(|v| Self::parse_level(&v))
            .unwrap_or(Level::Info);

        let file_path = std::env::var("WIKI_LOG_FILE").ok().map(PathBuf::from);
        let enable_colors = std::env::var("NO_COLOR").is_err();
        let output = Self::output_for(std::env::var("WIKI_LOG_STDOUT").ok().as_deref());

        let logger = Logger::new(file_path, Some(severity), Some(output), enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }

    fn format_line(&self, record: &Record, colored: bool) -> String {
        let timestamp = Self::timestamp();
        let level = record.level().as_str();
        let args = record.args();
        if colored {
            let color = Self::color(record.level());
            format!("{color}[{timestamp}] {level}\x1b[0m {args}\n")
        } else {
            format!("[{timestamp}] {level} {args}\n")
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(out) = &self.write_to_std {
            let line = self.format_line(record, self.enable_colors);
            let _ = match out {
                LogOutput::Stdout => std::io::stdout().write_all(line.as_bytes()),
                LogOutput::Stderr => std::io::stderr().write_all(line.as_bytes()),
            };
        }

        // File output never carries colors
        if let Some(file) = &self.file {
            if let Ok(mut guard) = file.lock() {
                let _ = guard.write_all(self.format_line(record, false).as_bytes());
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut guard) = file.lock() {
                let _ = guard.flush();
            }
        }
    }
}
