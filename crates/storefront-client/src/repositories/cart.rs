use std::sync::Arc;

use rust_decimal::Decimal;
use storefront_store::{CartItem, CartSummary, Database, NewCartItem};
use tracing::info;

use super::or_log;

/// Shopping cart backed by the `cart_items` table.
#[derive(Debug, Clone)]
pub struct CartRepository {
    db: Arc<Database>,
}

impl CartRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All items, newest first.
    pub fn list_all(&self) -> Vec<CartItem> {
        or_log(self.db.list_cart_items(), "cart.list_all", Vec::new())
    }

    pub fn find_by_product(&self, product_id: i64) -> Option<CartItem> {
        or_log(
            self.db.find_cart_item_by_product(product_id),
            "cart.find_by_product",
            None,
        )
    }

    /// Add `item`, merging into the existing row for the same product.
    pub fn add_or_merge(&self, item: &NewCartItem) -> bool {
        match self.db.add_or_merge_cart_item(item) {
            Ok(stored) => {
                info!(
                    product_id = stored.product_id,
                    quantity = stored.quantity,
                    "added {} to cart",
                    stored.product_name
                );
                true
            }
            Err(e) => {
                tracing::error!(product_id = item.product_id, error = %e, "add to cart failed");
                false
            }
        }
    }

    /// Overwrite the quantity; zero or less behaves exactly like [`remove`](Self::remove).
    pub fn set_quantity(&self, cart_item_id: i64, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(cart_item_id);
        }
        or_log(
            self.db.set_cart_item_quantity(cart_item_id, quantity),
            "cart.set_quantity",
            false,
        )
    }

    pub fn remove(&self, cart_item_id: i64) -> bool {
        or_log(self.db.delete_cart_item(cart_item_id), "cart.remove", false)
    }

    /// Take checked-out items out of the cart, leaving anything added since.
    pub fn remove_ordered(&self, ordered: &[CartItem]) -> bool {
        match self.db.remove_ordered_cart_items(ordered) {
            Ok(removed) => {
                info!(removed, "ordered items removed from cart");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "removing ordered items failed");
                false
            }
        }
    }

    pub fn clear(&self) -> bool {
        match self.db.clear_cart() {
            Ok(removed) => {
                info!(removed, "cart cleared");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "clear cart failed");
                false
            }
        }
    }

    pub fn total_item_count(&self) -> i64 {
        or_log(self.db.cart_item_count(), "cart.total_item_count", 0)
    }

    pub fn total_amount(&self) -> Decimal {
        or_log(self.db.cart_total_amount(), "cart.total_amount", Decimal::ZERO)
    }

    /// Items and totals from one consistent read.
    pub fn snapshot(&self) -> CartSummary {
        or_log(self.db.cart_summary(), "cart.snapshot", CartSummary::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> CartRepository {
        CartRepository::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn item(product_id: i64, quantity: i64, price: i64) -> NewCartItem {
        NewCartItem {
            product_id,
            product_name: format!("Product {product_id}"),
            barcode: String::new(),
            unit: "pcs".into(),
            price: Decimal::from(price),
            quantity,
        }
    }

    #[test]
    fn totals_for_two_products() {
        let cart = repo();
        assert!(cart.add_or_merge(&item(1, 2, 100)));
        assert!(cart.add_or_merge(&item(2, 1, 50)));

        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_amount(), Decimal::from(250));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total_items, 3);
        assert_eq!(snapshot.total_amount, Decimal::from(250));
    }

    #[test]
    fn merge_keeps_a_single_row() {
        let cart = repo();
        cart.add_or_merge(&item(1, 2, 100));
        cart.add_or_merge(&item(1, 4, 100));

        let items = cart.list_all();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 6);
        assert_eq!(cart.find_by_product(1).map(|i| i.quantity), Some(6));
        assert!(cart.find_by_product(2).is_none());
    }

    #[test]
    fn set_quantity_zero_is_remove() {
        let a = repo();
        let b = repo();
        a.add_or_merge(&item(1, 2, 100));
        b.add_or_merge(&item(1, 2, 100));
        let id_a = a.list_all()[0].id;
        let id_b = b.list_all()[0].id;

        assert_eq!(a.set_quantity(id_a, 0), b.remove(id_b));
        assert_eq!(a.list_all(), b.list_all());
        assert_eq!(a.set_quantity(id_a, 0), b.remove(id_b));
    }

    #[test]
    fn set_quantity_overwrites() {
        let cart = repo();
        cart.add_or_merge(&item(1, 2, 100));
        let id = cart.list_all()[0].id;

        assert!(cart.set_quantity(id, 7));
        assert_eq!(cart.total_item_count(), 7);
        assert!(!cart.set_quantity(id + 100, 7));
    }

    #[test]
    fn clear_zeroes_totals() {
        let cart = repo();
        cart.add_or_merge(&item(1, 2, 100));
        assert!(cart.clear());
        assert!(cart.list_all().is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
        assert!(cart.clear());
    }

    #[test]
    fn storage_failure_yields_neutral_values() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let cart = CartRepository::new(db.clone());
        db.with_conn(|conn| Ok(conn.execute_batch("DROP TABLE cart_items")?))
            .unwrap();

        assert!(cart.list_all().is_empty());
        assert!(!cart.add_or_merge(&item(1, 1, 10)));
        assert!(!cart.remove(1));
        assert!(!cart.clear());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn non_positive_add_is_rejected() {
        let cart = repo();
        assert!(!cart.add_or_merge(&item(1, 0, 10)));
        assert!(cart.list_all().is_empty());
    }

    #[test]
    fn overflowing_totals_degrade_without_poisoning_the_store() {
        let cart = repo();
        cart.add_or_merge(&item(1, 1, 100_000_000_000));
        cart.add_or_merge(&item(2, 1, 1));
        for line in cart.list_all() {
            assert!(cart.set_quantity(line.id, i64::MAX));
        }

        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
        assert!(cart.snapshot().is_empty());

        assert_eq!(cart.list_all().len(), 2);
        let big = cart.find_by_product(1).unwrap();
        assert!(cart.remove(big.id));
        let small = cart.find_by_product(2).unwrap();
        assert!(cart.set_quantity(small.id, 3));
        assert_eq!(cart.snapshot().total_amount, Decimal::from(3));
    }

    #[test]
    fn remove_ordered_spares_new_lines() {
        let cart = repo();
        cart.add_or_merge(&item(1, 2, 100));
        let ordered = cart.list_all();
        cart.add_or_merge(&item(2, 1, 50));

        assert!(cart.remove_ordered(&ordered));
        let left = cart.list_all();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].product_id, 2);
    }
}
