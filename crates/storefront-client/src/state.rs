//! Application state shared by every screen or command.
//!
//! [`Storefront`] owns the local database handle and the remote client and
//! hands out the repositories and the checkout flow built on top of them.
//! All of it is cheap to clone and safe to share between tasks.

use std::sync::Arc;

use storefront_api::{RemoteClient, StorefrontApi};
use storefront_shared::{filter_products, Product};
use storefront_store::Database;
use tracing::info;

use crate::checkout::Checkout;
use crate::config::ClientConfig;
use crate::error::StartupError;
use crate::repositories::{CartRepository, CustomerRepository, OrderHistoryRepository};

/// Central application state.
pub struct Storefront<A = RemoteClient> {
    config: ClientConfig,
    db: Arc<Database>,
    api: Arc<A>,

    /// The single local cart.
    pub cart: CartRepository,

    /// Last customer, for checkout auto-fill.
    pub customers: CustomerRepository,

    /// Orders placed from this device.
    pub orders: OrderHistoryRepository<A>,

    pub checkout: Checkout<A>,
}

impl Storefront<RemoteClient> {
    /// Open the local store and build the remote client described by `config`.
    pub async fn init(config: ClientConfig) -> Result<Self, StartupError> {
        let db_path = config.db_path.clone();
        let db = tokio::task::spawn_blocking(move || Database::open_with(db_path.as_deref()))
            .await??;
        let api = RemoteClient::new(config.api_base_url.clone(), config.request_timeout)?;

        info!(
            target_kind = ?config.target,
            api_base_url = %config.api_base_url,
            db_path = ?db.path(),
            "storefront initialised"
        );
        Ok(Self::from_parts(config, Arc::new(db), Arc::new(api)))
    }
}

impl<A: StorefrontApi> Storefront<A> {
    /// Wire up already-constructed dependencies.
    pub fn from_parts(config: ClientConfig, db: Arc<Database>, api: Arc<A>) -> Self {
        let cart = CartRepository::new(db.clone());
        let customers = CustomerRepository::new(db.clone());
        let orders = OrderHistoryRepository::new(db.clone(), api.clone());
        let checkout = Checkout::new(cart.clone(), customers.clone(), orders.clone(), api.clone());
        Self {
            config,
            db,
            api,
            cart,
            customers,
            orders,
            checkout,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// One page of the catalog at the configured page size.
    pub async fn list_products(&self, page: u32) -> Vec<Product> {
        self.api.list_products(page.max(1), self.config.page_size).await
    }

    /// One page of the catalog narrowed to products matching `query`.
    pub async fn search_products(&self, page: u32, query: &str) -> Vec<Product> {
        let products = self.list_products(page).await;
        filter_products(&products, query)
    }

    pub async fn get_product(&self, id: i64) -> Option<Product> {
        self.api.get_product(id).await
    }
}
