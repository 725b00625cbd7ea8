//! Application error types

use crate::receipt::Receipt;
use std::path::PathBuf;
use thiserror::Error;
use till_client::ClientError;
use till_printer::PrintError;

/// Receipt rendering errors
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Footer template could not be read
    #[error("Error loading footer template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of one order-to-receipt run, tagged with the stage that failed
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error getting token: {0}")]
    Auth(#[source] ClientError),

    #[error("Error fetching order: {0}")]
    Fetch(#[source] ClientError),

    /// The service answered with its logical failure flag set
    #[error("Error: Invalid order data for order {0}")]
    OrderUnavailable(String),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// The receipt was rendered but the printer refused it
    #[error("Error printing receipt: {source}")]
    Print {
        receipt: Receipt,
        #[source]
        source: PrintError,
    },
}
