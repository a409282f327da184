//! In-memory stand-in for the remote API, recording every call it receives.

use std::sync::{Arc, Mutex};

use storefront_api::StorefrontApi;
use storefront_shared::{
    CreateCustomerRequest, CreateOrderRequest, CustomerData, OrderData, OrderDetailData, Product,
};

/// Side effect run inside `create_order`, before it answers.
pub(crate) type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub(crate) struct FakeApi {
    /// Id handed out by `create_customer`; `None` makes the call fail.
    pub customer_id: Option<i64>,
    /// Id handed out by `create_order`; `None` makes the call fail.
    pub order_id: Option<i64>,
    pub products: Vec<Product>,
    pub detail: Option<OrderDetailData>,
    pub during_order: Option<Hook>,
    pub calls: Mutex<Vec<&'static str>>,
    pub order_requests: Mutex<Vec<CreateOrderRequest>>,
}

impl FakeApi {
    pub fn accepting(customer_id: i64, order_id: i64) -> Self {
        Self {
            customer_id: Some(customer_id),
            order_id: Some(order_id),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn order_requests(&self) -> Vec<CreateOrderRequest> {
        self.order_requests.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StorefrontApi for FakeApi {
    async fn list_products(&self, _page: u32, _page_size: u32) -> Vec<Product> {
        self.record("list_products");
        self.products.clone()
    }

    async fn get_product(&self, id: i64) -> Option<Product> {
        self.record("get_product");
        self.products.iter().find(|p| p.id == id).cloned()
    }

    async fn create_customer(&self, request: &CreateCustomerRequest) -> Option<CustomerData> {
        self.record("create_customer");
        self.customer_id.map(|id| CustomerData {
            id,
            name: request.name.clone(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            address: request.address.clone(),
        })
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Option<OrderData> {
        self.record("create_order");
        self.order_requests.lock().unwrap().push(request.clone());
        if let Some(hook) = &self.during_order {
            hook();
        }
        self.order_id.map(|id| OrderData {
            id,
            customer_id: request.customer_id,
            status: request.status.clone(),
            total_amount: request.total_amount,
            ..Default::default()
        })
    }

    async fn get_order_detail(&self, id: i64) -> Option<OrderDetailData> {
        self.record("get_order_detail");
        self.detail.clone().filter(|d| d.id == id)
    }
}
