//! # Logger
//!
//! Subscriber setup for binaries and tests: console output, optional rolling
//! file output with non-blocking I/O, and environment-based filtering.
//!
//! File-only options (rotation, retention, JSON) live on the builder returned
//! by [`LoggerBuilder::file`], so they cannot be set without a file output.
//! Use [`LoggerBuilder::env_filter`] for module-directed filters
//! (e.g. `"ohub=debug,hyper=info"`), in addition to `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! # use ohub_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder("ohub")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Configures console output and filtering for the global subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
}

impl LoggerBuilder {
    /// Enables or disables console output.
    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Minimum level emitted when no filter directive says otherwise.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Programmatic filter default (e.g. `ohub=debug,hyper=info`).
    /// `RUST_LOG` still overrides it; an invalid filter fails `init`.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Adds a rolling file output under `directory` and unlocks the
    /// file-specific options.
    pub fn file(self, directory: impl Into<PathBuf>) -> FileLoggerBuilder {
        FileLoggerBuilder {
            base: self,
            directory: directory.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }

    /// Installs the global subscriber with console output only.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for bad settings,
    /// [`LoggerError::Subscriber`] when a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;

        let env_filter = self.build_env_filter()?;
        let console_layer = self.console_layer().ok_or_else(|| {
            LoggerError::InvalidConfiguration {
                message: "no output enabled, turn on console or add a file".to_owned(),
            }
        })?;

        tracing_subscriber::registry().with(env_filter).with(console_layer).try_init()?;
        Ok(Logger { guard: None })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".to_owned(),
            });
        }
        Ok(())
    }

    fn console_layer<S>(&self) -> Option<Box<dyn Layer<S> + Send + Sync>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.console.then(|| layer().compact().with_ansi(true).boxed())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("invalid env filter `{filter}`: {e}"),
                })
            },
        )
    }
}

/// Builder stage with a file output configured.
#[derive(Debug)]
pub struct FileLoggerBuilder {
    base: LoggerBuilder,
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileLoggerBuilder {
    /// Log file rotation strategy; daily by default.
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Number of rotated files to keep.
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Switches the file output to JSON lines.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Installs the global subscriber with console and file outputs.
    ///
    /// # Returns
    /// A [`Logger`] handle holding the non-blocking worker guard; keep it
    /// alive for the lifetime of the program so buffered logs get flushed.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for bad settings,
    /// [`LoggerError::Directory`] / [`LoggerError::Appender`] for file output
    /// problems, [`LoggerError::Subscriber`] when a global subscriber is
    /// already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.base.validate()?;
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".to_owned(),
            });
        }

        let env_filter = self.base.build_env_filter()?;

        fs::create_dir_all(&self.directory).map_err(|e| LoggerError::Directory {
            path: self.directory.display().to_string(),
            message: e.to_string(),
        })?;

        let file_appender = RollingFileAppender::builder()
            .rotation(self.rotation)
            .filename_prefix(&self.base.name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.directory)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = layer().with_writer(non_blocking).with_ansi(false);
        let file_layer = if self.json { file_layer.json().boxed() } else { file_layer.boxed() };

        let mut layers = Vec::new();
        if let Some(console_layer) = self.base.console_layer() {
            layers.push(console_layer);
        }
        layers.push(file_layer);

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;
        Ok(Logger { guard: Some(guard) })
    }
}

/// A handle to the initialized logging system.
///
/// Holds the background worker guard for file output. Drop this struct only
/// when the application is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] for the global tracing subscriber.
    ///
    /// The `name` identifies the program and prefixes rolling log files
    /// (e.g. `ohub.2026-08-29.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
        }
    }

    /// Worker guard of the file output, if one was configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("logging system shutting down, flushing buffers");
        }
    }
}
