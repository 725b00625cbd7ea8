//! Wire models for the order service
//!
//! The envelope is strict, the order inside it lenient: absent order
//! fields take their zero value, so a sparse payload still renders. Amounts are decoded from JSON numbers into
//! [`Decimal`] without going through binary floating point arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order service response wrapper
///
/// `err` is required. A response without the flag, or one that reports
/// success without an order, fails to decode rather than looking like a
/// logical failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "WireEnvelope")]
pub struct OrderEnvelope {
    /// Order payload, `None` when `failed` is set
    pub data: Option<Order>,

    /// Logical failure flag (e.g. unknown order), independent of HTTP status
    #[serde(rename = "err")]
    pub failed: bool,
}

impl OrderEnvelope {
    /// The usable order, or `None` for a logical failure
    pub fn into_order(self) -> Option<Order> {
        if self.failed { None } else { self.data }
    }
}

/// Envelope as sent; `data` is only decoded when `err` is false
#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(rename = "err", alias = "failed")]
    failed: bool,
}

impl TryFrom<WireEnvelope> for OrderEnvelope {
    type Error = String;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        if wire.failed {
            return Ok(Self {
                data: None,
                failed: true,
            });
        }

        match wire.data {
            Some(value) if !value.is_null() => {
                let order = serde_json::from_value(value).map_err(|e| format!("data: {e}"))?;
                Ok(Self {
                    data: Some(order),
                    failed: false,
                })
            }
            _ => Err("missing order data in successful response".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Order {
    pub id: i64,
    pub date: String,
    pub status: OrderStatus,
    pub address: Address,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub vat: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderStatus {
    pub name: String,
}

/// Shipping address
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Address {
    #[serde(alias = "houseNo")]
    pub house_no: String,
    pub street: String,
    pub city: String,
}

/// One order line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderItem {
    pub item: Item,
    pub qty: u32,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderItem {
    /// Display name of the product
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Line amount (quantity × unit price), computed on demand
    pub fn line_amount(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Item {
    pub name: String,
}
