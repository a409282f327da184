//! CRUD operations for [`CartItem`] records.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;

use crate::database::{decode_decimal, decode_ts, encode_ts, Database};
use crate::error::{Result, StoreError};
use crate::models::{CartItem, CartSummary, NewCartItem};

const SELECT_CART_ITEM: &str = "SELECT id, product_id, product_name, barcode, unit, price, quantity, added_at
     FROM cart_items";

impl Database {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// List every cart item, newest first.
    pub fn list_cart_items(&self) -> Result<Vec<CartItem>> {
        self.with_conn(|conn| list_in(conn))
    }

    /// Fetch a single cart item by its local id.
    pub fn find_cart_item(&self, id: i64) -> Result<CartItem> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("{SELECT_CART_ITEM} WHERE id = ?1"),
                params![id],
                row_to_cart_item,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
        })
    }

    /// Fetch the cart item holding `product_id`, if any.
    pub fn find_cart_item_by_product(&self, product_id: i64) -> Result<Option<CartItem>> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    &format!("{SELECT_CART_ITEM} WHERE product_id = ?1"),
                    params![product_id],
                    row_to_cart_item,
                )
                .optional()?)
        })
    }

    /// Sum of quantities across the cart.
    pub fn cart_item_count(&self) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COALESCE(SUM(quantity), 0) FROM cart_items",
                [],
                |row| row.get(0),
            )?)
        })
    }

    /// Sum of `price * quantity` across the cart.
    pub fn cart_total_amount(&self) -> Result<Decimal> {
        self.with_conn(|conn| total_amount(&list_in(conn)?))
    }

    /// Items and both totals from a single locked read.
    pub fn cart_summary(&self) -> Result<CartSummary> {
        self.with_conn(|conn| {
            let items = list_in(conn)?;
            let total_items = items
                .iter()
                .try_fold(0i64, |acc, i| acc.checked_add(i.quantity))
                .ok_or(StoreError::Overflow)?;
            Ok(CartSummary {
                total_items,
                total_amount: total_amount(&items)?,
                items,
            })
        })
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    /// Add `item` to the cart. If the product is already there its quantity
    /// grows by `item.quantity` and its timestamp is refreshed; otherwise a
    /// new row is inserted. Returns the stored row.
    pub fn add_or_merge_cart_item(&self, item: &NewCartItem) -> Result<CartItem> {
        if item.quantity < 1 {
            return Err(StoreError::InvalidQuantity(item.quantity));
        }

        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let now = encode_ts(&Utc::now());

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM cart_items WHERE product_id = ?1",
                    params![item.product_id],
                    |row| row.get(0),
                )
                .optional()?;

            let id = match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE cart_items SET quantity = quantity + ?1, added_at = ?2 WHERE id = ?3",
                        params![item.quantity, now, id],
                    )?;
                    id
                }
                None => {
                    tx.execute(
                        "INSERT INTO cart_items (product_id, product_name, barcode, unit, price, quantity, added_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                        params![
                            item.product_id,
                            item.product_name,
                            item.barcode,
                            item.unit,
                            item.price.to_string(),
                            item.quantity,
                            now,
                        ],
                    )?;
                    tx.last_insert_rowid()
                }
            };

            let stored = tx.query_row(
                &format!("{SELECT_CART_ITEM} WHERE id = ?1"),
                params![id],
                row_to_cart_item,
            )?;
            tx.commit()?;
            Ok(stored)
        })
    }

    /// Overwrite the quantity of a cart item. A quantity of zero or less
    /// removes the row. Returns `true` if a row was changed.
    pub fn set_cart_item_quantity(&self, id: i64, quantity: i64) -> Result<bool> {
        self.with_conn(|conn| {
            if quantity <= 0 {
                return delete_in(conn, id);
            }
            let affected = conn.execute(
                "UPDATE cart_items SET quantity = ?1 WHERE id = ?2",
                params![quantity, id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Delete a cart item.  Returns `true` if a row was deleted.
    pub fn delete_cart_item(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| delete_in(conn, id))
    }

    /// Take `ordered` out of the cart after they were ordered.
    ///
    /// Each row loses the quantity that was ordered and is deleted once nothing
    /// is left. Rows added or merged since `ordered` was read keep whatever was
    /// not part of the order. Returns the number of rows deleted.
    pub fn remove_ordered_cart_items(&self, ordered: &[CartItem]) -> Result<usize> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let mut deleted = 0;
            for item in ordered {
                deleted += tx.execute(
                    "DELETE FROM cart_items WHERE id = ?1 AND quantity <= ?2",
                    params![item.id, item.quantity],
                )?;
                tx.execute(
                    "UPDATE cart_items SET quantity = quantity - ?2 WHERE id = ?1",
                    params![item.id, item.quantity],
                )?;
            }
            tx.commit()?;
            Ok(deleted)
        })
    }

    /// Empty the cart. Returns the number of rows removed.
    pub fn clear_cart(&self) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM cart_items", [])?))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn list_in(conn: &Connection) -> Result<Vec<CartItem>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_CART_ITEM} ORDER BY added_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], row_to_cart_item)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(StoreError::Sqlite)
}

fn delete_in(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM cart_items WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

fn total_amount(items: &[CartItem]) -> Result<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.subtotal()?))
        .ok_or(StoreError::Overflow)
}

/// Map a `rusqlite::Row` to a [`CartItem`].
fn row_to_cart_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<CartItem> {
    let price_str: String = row.get(5)?;
    let added_str: String = row.get(7)?;

    Ok(CartItem {
        id: row.get(0)?,
        product_id: row.get(1)?,
        product_name: row.get(2)?,
        barcode: row.get(3)?,
        unit: row.get(4)?,
        price: decode_decimal(5, &price_str)?,
        quantity: row.get(6)?,
        added_at: decode_ts(7, &added_str)?,
    })
}
