//! Order placement.
//!
//! A checkout attempt runs strictly in order, each step gating the next:
//!
//! 1. validate the customer's name and phone and that the cart has items;
//! 2. save the customer locally for auto-fill (best effort);
//! 3. create the customer on the server (required);
//! 4. create the order on the server from the cart snapshot (required);
//! 5. record the order in local history (best effort);
//! 6. take the ordered items out of the cart (best effort).
//!
//! A failure at 3 or 4 ends the attempt and leaves the cart alone. A customer
//! created at 3 is not removed if 4 fails. Step 6 removes exactly what was
//! ordered: lines added or merged while the order was in flight stay.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use storefront_api::StorefrontApi;
use storefront_shared::constants::ORDER_STATUS_PENDING;
use storefront_shared::{CreateCustomerRequest, CreateOrderRequest, OrderItemRequest};
use storefront_store::{CartSummary, NewCustomer, NewLocalOrder};
use tracing::{info, warn};

use crate::error::CheckoutError;
use crate::repositories::{CartRepository, CustomerRepository, OrderHistoryRepository};

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOutcome {
    pub order_id: i64,
    pub customer_id: i64,
    /// Whether the order summary made it into local history.
    pub saved_locally: bool,
    /// Whether the ordered items were taken out of the cart.
    pub cart_cleared: bool,
}

/// What the checkout screen starts from: the cart and any remembered customer.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutDraft {
    pub cart: CartSummary,
    pub customer: Option<NewCustomer>,
}

pub struct Checkout<A> {
    cart: CartRepository,
    customers: CustomerRepository,
    orders: OrderHistoryRepository<A>,
    api: Arc<A>,
}

impl<A> Clone for Checkout<A> {
    fn clone(&self) -> Self {
        Self {
            cart: self.cart.clone(),
            customers: self.customers.clone(),
            orders: self.orders.clone(),
            api: self.api.clone(),
        }
    }
}

impl<A: StorefrontApi> Checkout<A> {
    pub fn new(
        cart: CartRepository,
        customers: CustomerRepository,
        orders: OrderHistoryRepository<A>,
        api: Arc<A>,
    ) -> Self {
        Self {
            cart,
            customers,
            orders,
            api,
        }
    }

    /// Current cart plus the last customer, for pre-filling the form.
    pub fn load(&self) -> CheckoutDraft {
        CheckoutDraft {
            cart: self.cart.snapshot(),
            customer: self.customers.get_last().map(NewCustomer::from),
        }
    }

    pub async fn place_order(
        &self,
        customer: &NewCustomer,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if customer.name.trim().is_empty() {
            return Err(CheckoutError::MissingName);
        }
        if customer.phone.trim().is_empty() {
            return Err(CheckoutError::MissingPhone);
        }
        let snapshot = self.cart.snapshot();
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        // A readable snapshot already has in-range subtotals.
        let Some(lines) = order_lines(&snapshot) else {
            return Err(CheckoutError::EmptyCart);
        };

        if !self.customers.save(customer) {
            warn!("could not remember customer locally, continuing");
        }

        let remote_customer = self
            .api
            .create_customer(&CreateCustomerRequest {
                name: customer.name.clone(),
                phone: customer.phone.clone(),
                email: customer.email.clone(),
                address: customer.address.clone(),
            })
            .await
            .ok_or(CheckoutError::CustomerCreationFailed)?;

        let request = CreateOrderRequest {
            customer_id: remote_customer.id,
            order_date: Utc::now(),
            status: ORDER_STATUS_PENDING.to_string(),
            total_amount: snapshot.total_amount,
            discount_amount: Decimal::ZERO,
            items: lines,
        };
        let Some(order) = self.api.create_order(&request).await else {
            warn!(
                customer_id = remote_customer.id,
                "order creation failed; remote customer left without an order"
            );
            return Err(CheckoutError::OrderCreationFailed {
                customer_id: remote_customer.id,
            });
        };

        let saved_locally = self.orders.save(&NewLocalOrder::pending(
            order.id,
            customer,
            snapshot.total_amount,
            snapshot.total_items,
        ));
        if !saved_locally {
            warn!(order_id = order.id, "order placed but not recorded in local history");
        }

        let cart_cleared = self.cart.remove_ordered(&snapshot.items);
        if !cart_cleared {
            warn!(
                order_id = order.id,
                "order placed but its items are still in the cart"
            );
        }

        info!(
            order_id = order.id,
            customer_id = remote_customer.id,
            total_items = snapshot.total_items,
            total_amount = %snapshot.total_amount,
            "order placed"
        );

        Ok(CheckoutOutcome {
            order_id: order.id,
            customer_id: remote_customer.id,
            saved_locally,
            cart_cleared,
        })
    }
}

fn order_lines(cart: &CartSummary) -> Option<Vec<OrderItemRequest>> {
    cart.items
        .iter()
        .map(|item| {
            Some(OrderItemRequest {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
                subtotal: item.subtotal()?,
            })
        })
        .collect()
}
