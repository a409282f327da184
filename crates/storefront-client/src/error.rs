use storefront_api::ApiError;
use storefront_store::StoreError;
use thiserror::Error;

/// Terminal outcome of a checkout attempt that did not place an order.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Please enter the customer's name")]
    MissingName,

    #[error("Please enter a phone number")]
    MissingPhone,

    #[error("The cart is empty")]
    EmptyCart,

    #[error("Could not create the customer. Please try again.")]
    CustomerCreationFailed,

    /// The remote customer exists but has no order attached.
    #[error("Could not create the order. Please try again.")]
    OrderCreationFailed { customer_id: i64 },
}

/// Failures that stop the client from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Local store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("Remote client setup failed: {0}")]
    Api(#[from] ApiError),

    #[error("Initialisation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
