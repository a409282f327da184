use crate::types::Product;

/// Case-insensitive substring search over name, barcode and category name.
///
/// A blank query matches everything.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| {
            p.product_name.to_lowercase().contains(&needle)
                || p.barcode.to_lowercase().contains(&needle)
                || p.category
                    .as_ref()
                    .is_some_and(|c| c.category_name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
