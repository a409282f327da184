//! Append-only history of orders placed from this device.

use rusqlite::params;

use crate::database::{decode_decimal, decode_ts, encode_ts, Database};
use crate::error::{Result, StoreError};
use crate::models::{LocalOrder, NewLocalOrder};

impl Database {
    /// Record a placed order.
    pub fn insert_order(&self, order: &NewLocalOrder) -> Result<LocalOrder> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO orders (api_order_id, customer_name, customer_phone, customer_email,
                                     customer_address, total_amount, total_items, status, order_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    order.api_order_id,
                    order.customer_name,
                    order.customer_phone,
                    order.customer_email,
                    order.customer_address,
                    order.total_amount.to_string(),
                    order.total_items,
                    order.status,
                    encode_ts(&order.order_date),
                ],
            )?;

            Ok(LocalOrder {
                id: conn.last_insert_rowid(),
                api_order_id: order.api_order_id,
                customer_name: order.customer_name.clone(),
                customer_phone: order.customer_phone.clone(),
                customer_email: order.customer_email.clone(),
                customer_address: order.customer_address.clone(),
                total_amount: order.total_amount,
                total_items: order.total_items,
                status: order.status.clone(),
                order_date: order.order_date,
            })
        })
    }

    /// Every recorded order, most recent first.
    pub fn list_orders(&self) -> Result<Vec<LocalOrder>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, api_order_id, customer_name, customer_phone, customer_email,
                        customer_address, total_amount, total_items, status, order_date
                 FROM orders
                 ORDER BY order_date DESC, id DESC",
            )?;
            let rows = stmt.query_map([], row_to_order)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(StoreError::Sqlite)
        })
    }

    /// Fetch one recorded order by its local id.
    pub fn get_order(&self, id: i64) -> Result<LocalOrder> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, api_order_id, customer_name, customer_phone, customer_email,
                        customer_address, total_amount, total_items, status, order_date
                 FROM orders WHERE id = ?1",
                params![id],
                row_to_order,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
        })
    }
}

fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<LocalOrder> {
    let amount_str: String = row.get(6)?;
    let date_str: String = row.get(9)?;

    Ok(LocalOrder {
        id: row.get(0)?,
        api_order_id: row.get(1)?,
        customer_name: row.get(2)?,
        customer_phone: row.get(3)?,
        customer_email: row.get(4)?,
        customer_address: row.get(5)?,
        total_amount: decode_decimal(6, &amount_str)?,
        total_items: row.get(7)?,
        status: row.get(8)?,
        order_date: decode_ts(9, &date_str)?,
    })
}
