//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` so it can be handed directly to the UI
//! layer as a plain snapshot.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_shared::constants::{MAX_ADD_QUANTITY, MIN_ADD_QUANTITY, ORDER_STATUS_PENDING};
use storefront_shared::Product;

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// A product waiting in the cart, with the price captured when it was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Local auto-increment id.
    pub id: i64,
    /// Remote product id; unique across the cart.
    pub product_id: i64,
    pub product_name: String,
    pub barcode: String,
    pub unit: String,
    /// Unit price at the time the product was added.
    pub price: Decimal,
    /// Always at least one.
    pub quantity: i64,
    /// Refreshed every time the quantity is merged.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// `price * quantity`, or `None` when it does not fit in a [`Decimal`].
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// A cart entry that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_id: i64,
    pub product_name: String,
    pub barcode: String,
    pub unit: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl NewCartItem {
    /// Build a cart entry from a catalog product. The quantity is clamped to
    /// the range the product picker allows.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id,
            product_name: product.product_name.clone(),
            barcode: product.barcode.clone(),
            unit: product.unit.clone(),
            price: product.price,
            quantity: quantity.clamp(MIN_ADD_QUANTITY, MAX_ADD_QUANTITY),
        }
    }
}

/// Cart contents and totals read in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    /// Newest first.
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub total_amount: Decimal,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// The last customer used at checkout, kept for auto-fill only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Contact details entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<Customer> for NewCustomer {
    fn from(c: Customer) -> Self {
        Self {
            name: c.name,
            phone: c.phone,
            email: c.email,
            address: c.address,
        }
    }
}

// ---------------------------------------------------------------------------
// Order history
// ---------------------------------------------------------------------------

/// Summary of an order placed from this device. Never updated once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalOrder {
    pub id: i64,
    /// Id assigned by the server when the order was created.
    pub api_order_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub total_amount: Decimal,
    pub total_items: i64,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewLocalOrder {
    pub api_order_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub total_amount: Decimal,
    pub total_items: i64,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

impl NewLocalOrder {
    /// A freshly placed order, snapshotting the customer's details.
    pub fn pending(
        api_order_id: i64,
        customer: &NewCustomer,
        total_amount: Decimal,
        total_items: i64,
    ) -> Self {
        Self {
            api_order_id,
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            customer_email: customer.email.clone(),
            customer_address: customer.address.clone(),
            total_amount,
            total_items,
            status: ORDER_STATUS_PENDING.to_string(),
            order_date: Utc::now().trunc_subsecs(6),
        }
    }
}
