//! Till Client - HTTP client for the remote order service
//!
//! Obtains a bearer credential from the token endpoint, caches it for a
//! fixed TTL, and fetches single orders wrapped in the service's
//! `{ data, err }` envelope.

pub mod auth;
pub mod config;
pub mod error;
mod http;
pub mod models;
pub mod orders;

pub use auth::{Credential, DEFAULT_TOKEN_TTL_HOURS, TokenProvider};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use models::{Address, Item, Order, OrderEnvelope, OrderItem, OrderStatus};
pub use orders::OrderClient;
