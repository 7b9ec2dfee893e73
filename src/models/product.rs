use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product placed in a client's cart. Ids carry the owning client's
/// namespace: `"{username}${n}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
    pub price: Price,
}

/// Immutable currency/amount pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub currency: String,
    pub amount: Decimal,
}

impl Price {
    pub fn new(currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            timestamp: chrono::Utc::now().timestamp_millis(),
            price,
        }
    }
}

/// Synthetic benchmark pricing: an all-digit product id prices as its numeric
/// value, anything else as 1.0, always in EUR. This looks like a defect but is
/// part of the upstream benchmark contract; do not infer real pricing intent.
pub fn derive_price(id: &str) -> Price {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(amount) = id.parse::<i64>() {
            return Price::new("EUR", Decimal::from(amount));
        }
    }
    Price::new("EUR", Decimal::ONE)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Six fractional digits, matching the upstream "%f" format
        write!(
            f,
            "Price = {{ currency = {}, amount = {:.6} }}",
            self.currency, self.amount
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product = {{ id = {}, name = {}, quantity = {}, timestamp = {}, price = {} }}",
            self.id, self.name, self.quantity, self.timestamp, self.price
        )
    }
}
