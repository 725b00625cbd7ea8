//! Till - turns order IDs into printed receipts
//!
//! ```text
//! order ID → TokenProvider → OrderClient → ReceiptRenderer → Printer
//! ```
//!
//! The HTTP side lives in `till-client`, ESC/POS bytes and spooling in
//! `till-printer`. This crate owns the receipt layout, money formatting
//! and the pipeline tying them together.

pub mod config;
pub mod console;
pub mod error;
pub mod logger;
pub mod money;
pub mod pipeline;
pub mod receipt;

pub use config::{AppConfig, StoreConfig};
pub use error::{PipelineError, ReceiptError};
pub use money::format_money;
pub use pipeline::Till;
pub use receipt::{FooterTemplate, Receipt, ReceiptRenderer};
