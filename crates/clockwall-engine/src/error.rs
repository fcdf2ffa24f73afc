//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the run
//! loop so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: clockwall_core::ConfigError,
    },

    /// Waiting for the interrupt signal failed.
    #[error("signal error: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The heartbeat task panicked or was cancelled.
    #[error("heartbeat error: {message}")]
    Heartbeat {
        /// Description of the task failure.
        message: String,
    },
}
