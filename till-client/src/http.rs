//! Shared response handling for the order service endpoints

use crate::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read the whole body, then decode it as JSON
///
/// The HTTP status is not interpreted: the service signals logical
/// failures in the body, so only the body shape decides success. Reading
/// the body first keeps transport failures (`Transport`) apart from shape
/// mismatches (`Decode`).
pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> ClientResult<T> {
    let status = response.status();
    let body = response.text().await?;
    debug!(endpoint, status = status.as_u16(), body_len = body.len(), "response received");

    serde_json::from_str(&body).map_err(|source| ClientError::Decode {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        source,
    })
}
