use std::future::Future;

use storefront_shared::{
    CreateCustomerRequest, CreateOrderRequest, CustomerData, OrderData, OrderDetailData, Product,
};

/// Remote operations the storefront depends on.
///
/// Implementations never surface errors: a failed call of any kind yields
/// `None` or an empty list, after the implementation has logged why.
pub trait StorefrontApi {
    fn list_products(&self, page: u32, page_size: u32)
        -> impl Future<Output = Vec<Product>> + Send;

    fn get_product(&self, id: i64) -> impl Future<Output = Option<Product>> + Send;

    fn create_customer(
        &self,
        request: &CreateCustomerRequest,
    ) -> impl Future<Output = Option<CustomerData>> + Send;

    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Option<OrderData>> + Send;

    fn get_order_detail(&self, id: i64) -> impl Future<Output = Option<OrderDetailData>> + Send;
}
