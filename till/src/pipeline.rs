//! Order-to-receipt pipeline
//!
//! One run per order ID: credential → order fetch → footer load → render →
//! print. A stage failure stops the run; nothing reaches the printer unless
//! every earlier stage succeeded. A rejected credential is dropped from
//! the cache so the next order logs in again.

use crate::config::{AppConfig, StoreConfig};
use crate::error::PipelineError;
use crate::receipt::{FooterTemplate, Receipt, ReceiptRenderer};
use std::path::PathBuf;
use till_client::{ClientResult, OrderClient, TokenProvider};
use till_printer::Printer;
use tracing::{info, instrument, warn};

/// The till: fetches orders and prints their receipts
pub struct Till<P> {
    tokens: TokenProvider,
    orders: OrderClient,
    store: StoreConfig,
    footer_path: PathBuf,
    printer: P,
}

impl<P: Printer> Till<P> {
    /// Build a till sharing one HTTP client between auth and order calls
    pub fn new(config: &AppConfig, printer: P) -> ClientResult<Self> {
        let http = config.client.build_http_client()?;
        Ok(Self::from_parts(
            TokenProvider::new(http.clone(), &config.client),
            OrderClient::new(http, &config.client),
            config.store.clone(),
            config.footer_template.clone(),
            printer,
        ))
    }

    pub fn from_parts(
        tokens: TokenProvider,
        orders: OrderClient,
        store: StoreConfig,
        footer_path: PathBuf,
        printer: P,
    ) -> Self {
        Self {
            tokens,
            orders,
            store,
            footer_path,
            printer,
        }
    }

    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Fetch one order and print its receipt
    ///
    /// Returns the printed receipt. A printer failure still carries the
    /// rendered receipt in [`PipelineError::Print`].
    #[instrument(skip(self))]
    pub async fn process_order(&self, order_id: &str) -> Result<Receipt, PipelineError> {
        let token = self.tokens.token().await.map_err(PipelineError::Auth)?;

        let envelope = match self.orders.fetch_order(&token.value, order_id).await {
            Ok(envelope) => envelope,
            Err(e) => {
                if e.is_unauthorized() {
                    warn!("Credential rejected, dropping cached token");
                    self.tokens.invalidate().await;
                }
                return Err(PipelineError::Fetch(e));
            }
        };
        let Some(order) = envelope.into_order() else {
            warn!("Order service reported a failure");
            return Err(PipelineError::OrderUnavailable(order_id.trim().to_string()));
        };

        let footer = FooterTemplate::load(&self.footer_path)?;
        let receipt = ReceiptRenderer::new(&self.store, &footer).render(&order);
        info!(order = order.id, items = order.items.len(), bytes = receipt.len(), "Receipt rendered");

        match self.printer.print(receipt.as_bytes()).await {
            Ok(()) => {
                info!(order = order.id, "Receipt printed");
                Ok(receipt)
            }
            Err(source) => Err(PipelineError::Print { receipt, source }),
        }
    }
}
