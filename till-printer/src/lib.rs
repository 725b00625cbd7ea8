//! # till-printer
//!
//! ESC/POS receipt printing - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building (alignment, emphasis, paper cut)
//! - Fixed-width column helpers for receipt rows
//! - Spooling raw bytes to the host's default print device
//!   (`lp` on Unix-like hosts, the Win32 spooler on Windows)
//!
//! Business logic (WHAT to print) stays in the `till` application crate.
//!
//! ## Example
//!
//! ```ignore
//! use till_printer::{EscPosBuilder, Printer, SystemPrinter};
//!
//! let mut builder = EscPosBuilder::new(45);
//! builder.center();
//! builder.bold().line("Corner Store").bold_off();
//! builder.left();
//! builder.line("Order ID: #123");
//! builder.cut_feed(0);
//!
//! let printer = SystemPrinter::detect(None)?;
//! printer.print(&builder.build()).await?;
//! ```

mod error;
mod escpos;
mod printer;
mod text;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosBuilder, commands};
pub use printer::{LpPrinter, Printer, SystemPrinter};
pub use text::{pad_chars, truncate_chars};

#[cfg(windows)]
pub use printer::WindowsPrinter;
