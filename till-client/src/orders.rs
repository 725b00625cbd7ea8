//! Authenticated order retrieval

use crate::config::ORDER_ID_PLACEHOLDER;
use crate::http::read_json;
use crate::{ClientConfig, ClientError, ClientResult, OrderEnvelope};
use tracing::{info, instrument};

/// Client for the order endpoint
#[derive(Debug, Clone)]
pub struct OrderClient {
    http: reqwest::Client,
    url_template: String,
}

impl OrderClient {
    /// Create a client sharing `http` (which carries the custom header)
    pub fn new(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            url_template: config.order_url.clone(),
        }
    }

    /// Fetch one order
    ///
    /// The envelope's `failed` flag is returned as-is; callers decide what
    /// a logical failure means for them.
    #[instrument(skip(self, token))]
    pub async fn fetch_order(&self, token: &str, order_id: &str) -> ClientResult<OrderEnvelope> {
        let order_id = validate_order_id(order_id)?;
        let url = self.url_template.replace(ORDER_ID_PLACEHOLDER, order_id);

        info!("Fetching order");
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let envelope: OrderEnvelope = read_json(&url, response).await?;

        info!(failed = envelope.failed, "Order response decoded");
        Ok(envelope)
    }
}

/// Trim the identifier and make sure it is safe to place in a URL path
fn validate_order_id(order_id: &str) -> ClientResult<&str> {
    let trimmed = order_id.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(trimmed)
    } else {
        Err(ClientError::InvalidOrderId(order_id.to_string()))
    }
}
