use std::sync::Arc;

use storefront_api::StorefrontApi;
use storefront_shared::OrderDetailData;
use storefront_store::{Database, LocalOrder, NewLocalOrder, StoreError};
use tracing::{error, info};

use super::or_log;

/// Local order history, plus on-demand order detail from the server.
#[derive(Debug)]
pub struct OrderHistoryRepository<A> {
    db: Arc<Database>,
    api: Arc<A>,
}

impl<A> Clone for OrderHistoryRepository<A> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            api: self.api.clone(),
        }
    }
}

impl<A: StorefrontApi> OrderHistoryRepository<A> {
    pub fn new(db: Arc<Database>, api: Arc<A>) -> Self {
        Self { db, api }
    }

    /// Every order placed from this device, most recent first.
    pub fn list_all(&self) -> Vec<LocalOrder> {
        or_log(self.db.list_orders(), "orders.list_all", Vec::new())
    }

    /// Look up a recorded order by its local id.
    pub fn get(&self, local_id: i64) -> Option<LocalOrder> {
        match self.db.get_order(local_id) {
            Ok(order) => Some(order),
            Err(StoreError::NotFound) => None,
            Err(e) => or_log(Err(e), "orders.get", None),
        }
    }

    /// Append `order` to the history.
    pub fn save(&self, order: &NewLocalOrder) -> bool {
        match self.db.insert_order(order) {
            Ok(saved) => {
                info!(local_id = saved.id, api_order_id = saved.api_order_id, "order saved locally");
                true
            }
            Err(e) => {
                error!(api_order_id = order.api_order_id, error = %e, "save order failed");
                false
            }
        }
    }

    /// Full order (lines, customer, staff) straight from the server.
    pub async fn get_detail(&self, remote_order_id: i64) -> Option<OrderDetailData> {
        self.api.get_order_detail(remote_order_id).await
    }
}
