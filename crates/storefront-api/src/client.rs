//! reqwest-backed implementation of [`StorefrontApi`].

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_shared::{
    ApiEnvelope, CreateCustomerRequest, CreateOrderRequest, CustomerData, OrderData,
    OrderDetailData, Product,
};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::service::StorefrontApi;

/// Stateless wrapper around one base URL.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Build a client for `base_url` (e.g. `http://localhost:5052/api/v1`)
    /// with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        info!(base_url = %base_url, timeout_secs = timeout.as_secs(), "remote client ready");
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ------------------------------------------------------------------
    // Fallible calls
    // ------------------------------------------------------------------

    /// `GET /products?page={page}&pageSize={page_size}`
    pub async fn try_list_products(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Product>, ApiError> {
        let request = self
            .http
            .get(self.url("/products"))
            .query(&[("page", page), ("pageSize", page_size)]);
        send(request).await
    }

    /// `GET /products/{id}`
    pub async fn try_get_product(&self, id: i64) -> Result<Product, ApiError> {
        send(self.http.get(self.url(&format!("/products/{id}")))).await
    }

    /// `POST /customers`
    pub async fn try_create_customer(
        &self,
        request: &CreateCustomerRequest,
    ) -> Result<CustomerData, ApiError> {
        post(&self.http, self.url("/customers"), request).await
    }

    /// `POST /orders`
    pub async fn try_create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderData, ApiError> {
        post(&self.http, self.url("/orders"), request).await
    }

    /// `GET /orders/{id}`
    pub async fn try_get_order_detail(&self, id: i64) -> Result<OrderDetailData, ApiError> {
        send(self.http.get(self.url(&format!("/orders/{id}")))).await
    }
}

async fn post<B: Serialize, T: DeserializeOwned>(
    http: &reqwest::Client,
    url: String,
    body: &B,
) -> Result<T, ApiError> {
    send(http.post(url).json(body)).await
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    read_envelope(response).await
}

/// Unwrap the uniform envelope. A non-2xx status or `success: false` is a
/// failure whatever the body says.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "response received");

    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(&body)?;
    if !envelope.success {
        return Err(ApiError::Rejected {
            status: envelope.status,
            message: envelope.message,
        });
    }
    envelope.into_payload().ok_or(ApiError::MissingPayload)
}

// ---------------------------------------------------------------------------
// Fail-soft surface
// ---------------------------------------------------------------------------

impl StorefrontApi for RemoteClient {
    async fn list_products(&self, page: u32, page_size: u32) -> Vec<Product> {
        match self.try_list_products(page, page_size).await {
            Ok(products) => {
                debug!(page, page_size, count = products.len(), "products listed");
                products
            }
            Err(e) => {
                warn!(page, page_size, error = %e, timeout = e.is_timeout(), "list products failed");
                Vec::new()
            }
        }
    }

    async fn get_product(&self, id: i64) -> Option<Product> {
        self.try_get_product(id)
            .await
            .map_err(|e| warn!(product_id = id, error = %e, "get product failed"))
            .ok()
    }

    async fn create_customer(&self, request: &CreateCustomerRequest) -> Option<CustomerData> {
        match self.try_create_customer(request).await {
            Ok(customer) => {
                info!(customer_id = customer.id, "customer created");
                Some(customer)
            }
            Err(e) => {
                warn!(name = %request.name, error = %e, "create customer failed");
                None
            }
        }
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Option<OrderData> {
        match self.try_create_order(request).await {
            Ok(order) => {
                info!(order_id = order.id, customer_id = request.customer_id, "order created");
                Some(order)
            }
            Err(e) => {
                warn!(customer_id = request.customer_id, error = %e, "create order failed");
                None
            }
        }
    }

    async fn get_order_detail(&self, id: i64) -> Option<OrderDetailData> {
        self.try_get_order_detail(id)
            .await
            .map_err(|e| warn!(order_id = id, error = %e, "get order detail failed"))
            .ok()
    }
}
