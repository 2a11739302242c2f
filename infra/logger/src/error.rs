use ohub_derive::error_code;

/// Failures during logger initialization. These happen before any subscriber
/// exists, so they are returned rather than logged.
#[error_code]
pub enum LoggerError {
    /// The rolling file appender rejected its configuration (e.g. a bad path).
    #[error("rolling file appender: {source}")]
    Appender {
        #[from]
        source: tracing_appender::rolling::InitError,
    },

    /// A global tracing subscriber is already installed in this process.
    #[error("tracing subscriber: {source}")]
    Subscriber {
        #[from]
        source: tracing_subscriber::util::TryInitError,
    },

    /// Could not create the log directory.
    #[error("log directory `{path}`: {message}")]
    Directory { path: String, message: String },

    /// Invalid settings supplied to the builder.
    #[error("invalid logger configuration: {message}")]
    InvalidConfiguration { message: String },
}
