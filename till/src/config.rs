//! Application configuration
//!
//! # Environment variables
//!
//! Order service variables are documented on [`ClientConfig`]. In addition:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | STORE_NAME | (empty) | Store name printed in the receipt header |
//! | STORE_ADDRESS | (empty) | Store address printed under the name |
//! | STORE_LINK | (empty) | Replaces `{{LINK}}` in the footer template |
//! | FOOTER_TEMPLATE | footer_template.txt | Footer template path |
//! | PRINTER_COMMAND | (unset) | Spooler command line, e.g. `lp -d receipts` |
//! | LOG_LEVEL | warn | Log filter when `RUST_LOG` is unset |
//! | LOG_DIR | (unset) | Directory for daily rolling log files |

use std::path::PathBuf;
use till_client::{ClientConfig, ClientResult};

/// Default footer template path, relative to the working directory
pub const DEFAULT_FOOTER_TEMPLATE: &str = "footer_template.txt";

/// Store identity printed on every receipt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub name: String,
    pub address: String,
    pub link: String,
}

impl StoreConfig {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            link: link.into(),
        }
    }
}

/// Everything the till needs at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub store: StoreConfig,
    pub footer_template: PathBuf,
    pub printer_command: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = ClientConfig::from_lookup(&lookup)?;
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            client,
            store: StoreConfig::new(
                lookup("STORE_NAME").unwrap_or_default(),
                lookup("STORE_ADDRESS").unwrap_or_default(),
                lookup("STORE_LINK").unwrap_or_default(),
            ),
            footer_template: optional("FOOTER_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_FOOTER_TEMPLATE.to_string())
                .into(),
            printer_command: optional("PRINTER_COMMAND"),
            log_level: optional("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            log_dir: optional("LOG_DIR"),
        })
    }
}
