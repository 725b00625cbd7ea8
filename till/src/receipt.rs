//! Receipt rendering
//!
//! Turns a fetched [`Order`] into the ESC/POS byte stream sent to the
//! printer. Layout, top to bottom:
//!
//! - centered store header (bold name, address, `=` rule)
//! - order id, date and status
//! - shipping address
//! - item table (`name qty amount`) between dash rules
//! - total row
//! - centered footer from the template, then a paper cut

use crate::config::StoreConfig;
use crate::error::ReceiptError;
use crate::money::format_money;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::path::Path;
use till_client::{Order, OrderItem};
use till_printer::{EscPosBuilder, pad_chars};

/// Characters per row for the item table and its rules
pub const RECEIPT_WIDTH: usize = 45;

/// Marker in the footer template replaced by the store link
pub const LINK_PLACEHOLDER: &str = "{{LINK}}";

const NAME_WIDTH: usize = 30;
const QTY_WIDTH: usize = 3;
const AMOUNT_WIDTH: usize = 10;
const HEADER_RULE_LEN: usize = 22;

/// Footer text with a `{{LINK}}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterTemplate {
    text: String,
}

impl FooterTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read the template from disk
    pub fn load(path: &Path) -> Result<Self, ReceiptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReceiptError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Footer template loaded");
        Ok(Self { text })
    }

    /// Replace every placeholder occurrence with `link`
    pub fn fill(&self, link: &str) -> String {
        self.text.replace(LINK_PLACEHOLDER, link)
    }
}

/// A rendered receipt, ready for the printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    bytes: Vec<u8>,
}

impl Receipt {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Receipt as text, control bytes included
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Renders orders for one store
pub struct ReceiptRenderer<'a> {
    store: &'a StoreConfig,
    footer: &'a FooterTemplate,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(store: &'a StoreConfig, footer: &'a FooterTemplate) -> Self {
        Self { store, footer }
    }

    pub fn render(&self, order: &Order) -> Receipt {
        let mut b = EscPosBuilder::new(RECEIPT_WIDTH);

        self.render_header(&mut b);
        Self::render_order_info(&mut b, order);
        Self::render_address(&mut b, order);
        Self::render_items(&mut b, order);
        Self::render_total(&mut b, order.total);
        self.render_footer(&mut b);

        Receipt { bytes: b.build() }
    }

    fn render_header(&self, b: &mut EscPosBuilder) {
        b.center();
        // Address gets its own line below the bold name
        b.bold().text(&self.store.name).bold_off().newline();
        b.line(&self.store.address);
        b.rule('=', HEADER_RULE_LEN);
        b.newline();
    }

    fn render_order_info(b: &mut EscPosBuilder, order: &Order) {
        b.left();
        b.line(&format!("Order ID: #{}", order.id));
        b.line(&format!("Date: {}", order.date));
        b.line(&format!("Status: {}", order.status.name));
        b.newline();
    }

    fn render_address(b: &mut EscPosBuilder, order: &Order) {
        let address = &order.address;
        b.line("Shipping Address:");
        b.line(&format!("{} {}", address.house_no, address.street));
        b.line(&address.city);
        b.newline();
    }

    fn render_items(b: &mut EscPosBuilder, order: &Order) {
        b.line(&row("Item", "Qty", "Amount"));
        b.sep_single();
        for item in &order.items {
            b.line(&item_row(item));
        }
        b.sep_single();
    }

    fn render_total(b: &mut EscPosBuilder, total: Decimal) {
        b.line(&format!(
            "{} {:>aw$}",
            pad_chars("Total:", NAME_WIDTH, false),
            format_money(total),
            aw = AMOUNT_WIDTH
        ));
    }

    fn render_footer(&self, b: &mut EscPosBuilder) {
        b.center();
        b.text(&self.footer.fill(&self.store.link));
        b.left();
        b.cut_feed(0);
    }
}

fn item_row(item: &OrderItem) -> String {
    row(
        item.name(),
        &item.qty.to_string(),
        &format_money(item.line_amount()),
    )
}

/// Name is cut to its column, quantity and amount only pad
fn row(name: &str, qty: &str, amount: &str) -> String {
    format!(
        "{} {:<qw$} {:>aw$}",
        pad_chars(name, NAME_WIDTH, false),
        qty,
        amount,
        qw = QTY_WIDTH,
        aw = AMOUNT_WIDTH
    )
}
