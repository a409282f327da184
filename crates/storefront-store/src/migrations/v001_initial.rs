//! v001 -- Initial schema creation.
//!
//! Creates the three local tables: `cart_items`, `customers` and `orders`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Cart items (one row per product)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS cart_items (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id   INTEGER NOT NULL,
    product_name TEXT NOT NULL,
    barcode      TEXT NOT NULL DEFAULT '',
    unit         TEXT NOT NULL DEFAULT '',
    price        TEXT NOT NULL,               -- decimal string
    quantity     INTEGER NOT NULL CHECK (quantity >= 1),
    added_at     TEXT NOT NULL                -- RFC-3339, fixed width
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_cart_items_product_id ON cart_items(product_id);

-- ----------------------------------------------------------------
-- Customers (at most one row: the last customer used at checkout)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS customers (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    phone      TEXT NOT NULL,
    email      TEXT NOT NULL DEFAULT '',
    address    TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Orders (append-only local history)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS orders (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    api_order_id     INTEGER NOT NULL,
    customer_name    TEXT NOT NULL,
    customer_phone   TEXT NOT NULL,
    customer_email   TEXT NOT NULL DEFAULT '',
    customer_address TEXT NOT NULL DEFAULT '',
    total_amount     TEXT NOT NULL,           -- decimal string
    total_items      INTEGER NOT NULL,
    status           TEXT NOT NULL DEFAULT 'pending',
    order_date       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_orders_order_date ON orders(order_date DESC);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
