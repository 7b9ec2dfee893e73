use serde::{Deserialize, Serialize};
use std::fmt;

/// A shop client identified by a unique username, owning exactly one cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub username: String,
    pub name: String,
    pub cart: ShoppingCart,
}

/// Per-client cart counters. Product ids are never reused, so the id counter
/// only ever grows while the product count tracks what is currently present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub next_product_id: u32,
    pub number_products: u32,
}

impl Client {
    /// Create a new client with an empty cart
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            cart: ShoppingCart::new(),
        }
    }
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self {
            next_product_id: 0,
            number_products: 0,
        }
    }

    /// Allocate the id for the next product added to this cart.
    pub fn next_product_id(&self) -> u32 {
        self.next_product_id
    }

    /// Record a newly added product: the id counter advances together with the
    /// active-product count.
    pub fn add_product(&mut self) {
        self.next_product_id += 1;
        self.number_products += 1;
    }

    /// Record a removed product. Only the active-product count drops; the id
    /// counter stays put so ids are never handed out twice.
    pub fn remove_product(&mut self) {
        self.number_products = self.number_products.saturating_sub(1);
    }

    pub fn is_empty(&self) -> bool {
        self.number_products == 0
    }
}

// The string representations are the wire format of the benchmark: responses
// are these exact strings, so the field labels are part of the contract.
impl fmt::Display for ShoppingCart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShoppingCart = {{ nextProductId = {}, numberProducts = {} }}",
            self.next_product_id, self.number_products
        )
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Client = {{ username = {}, name = {}, cart = {} }}",
            self.username, self.name, self.cart
        )
    }
}
