//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// IO error while talking to the spooler
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The print-queue command could not be started or rejected the job
    #[error("Spooler failed: {0}")]
    Spooler(String),

    /// No default print device is configured on this host
    #[error("No default printer configured")]
    NoDefaultPrinter,

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Windows-specific printing error
    #[cfg(windows)]
    #[error("Windows printer error: {0}")]
    WindowsPrinter(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
