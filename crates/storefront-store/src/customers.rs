//! The single "last customer" record used to pre-fill checkout.

use chrono::{SubsecRound, Utc};
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::database::{decode_ts, encode_ts, Database};
use crate::error::Result;
use crate::models::{Customer, NewCustomer};

impl Database {
    /// The most recently saved customer, if any.
    pub fn last_customer(&self) -> Result<Option<Customer>> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name, phone, email, address, created_at
                     FROM customers
                     ORDER BY created_at DESC, id DESC
                     LIMIT 1",
                    [],
                    row_to_customer,
                )
                .optional()?)
        })
    }

    /// Replace whatever customer is stored with `customer`, stamped now.
    pub fn replace_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            // Stored with microsecond precision; match it so callers compare equal.
            let created_at = Utc::now().trunc_subsecs(6);

            tx.execute("DELETE FROM customers", [])?;
            tx.execute(
                "INSERT INTO customers (name, phone, email, address, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    customer.name,
                    customer.phone,
                    customer.email,
                    customer.address,
                    encode_ts(&created_at),
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            Ok(Customer {
                id,
                name: customer.name.clone(),
                phone: customer.phone.clone(),
                email: customer.email.clone(),
                address: customer.address.clone(),
                created_at,
            })
        })
    }
}

fn row_to_customer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
    let created_str: String = row.get(5)?;

    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        address: row.get(4)?,
        created_at: decode_ts(5, &created_str)?,
    })
}
