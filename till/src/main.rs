//! Interactive till
//!
//! Prompts for order IDs until stdin closes. Each ID is fetched, rendered
//! and printed; the receipt is echoed to the console as well.

use anyhow::Context;
use till::{AppConfig, Till, console, logger};
use till_printer::SystemPrinter;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let printer = SystemPrinter::detect(config.printer_command.as_deref())
        .context("Failed to set up printer")?;
    let till = Till::new(&config, printer).context("Failed to build HTTP client")?;

    tracing::info!(footer = %config.footer_template.display(), "Till ready");
    console::run(&till, BufReader::new(tokio::io::stdin()))
        .await
        .context("Failed to read from stdin")
}
