//! Command-line front end.
//!
//! Every command prints its result as pretty JSON on the given writer so the
//! output can be piped into other tools.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use storefront_api::StorefrontApi;
use storefront_shared::constants::{MAX_ADD_QUANTITY, MIN_ADD_QUANTITY};
use storefront_store::{NewCartItem, NewCustomer};

use crate::state::Storefront;

/// Browse the catalog, manage the cart and place orders.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of the catalog
    Products {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only show products whose name, barcode or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single product
    Product { id: i64 },

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for everything in the cart
    ///
    /// Fields left out are filled from the last customer who checked out.
    Checkout {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },

    /// Orders placed from this device, newest first
    Orders,

    /// Full order detail from the server
    Order {
        /// Server-side order id
        id: i64,
    },

    /// The remembered customer used for checkout auto-fill
    Customer,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals
    List,

    /// Add a product, merging with an existing line
    Add {
        product_id: i64,
        #[arg(default_value_t = 1)]
        quantity: i64,
    },

    /// Set a line's quantity; zero or less removes it
    Set {
        /// Cart line id
        id: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove { id: i64 },

    /// Empty the cart
    Clear,
}

/// Execute `command` against `app`, writing the result to `out`.
pub async fn run<A: StorefrontApi>(
    command: Command,
    app: &Storefront<A>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Products { page, search } => {
            let products = match search {
                Some(query) => app.search_products(page, &query).await,
                None => app.list_products(page).await,
            };
            print_json(out, &products)
        }
        Command::Product { id } => {
            let product = app
                .get_product(id)
                .await
                .with_context(|| format!("product {id} not found"))?;
            print_json(out, &product)
        }
        Command::Cart(cart) => run_cart(cart, app, out).await,
        Command::Checkout {
            name,
            phone,
            email,
            address,
        } => {
            let remembered = app
                .customers
                .get_last()
                .map(NewCustomer::from)
                .unwrap_or_default();
            let customer = NewCustomer {
                name: name.unwrap_or(remembered.name),
                phone: phone.unwrap_or(remembered.phone),
                email: email.unwrap_or(remembered.email),
                address: address.unwrap_or(remembered.address),
            };
            let outcome = app.checkout.place_order(&customer).await?;
            print_json(out, &outcome)
        }
        Command::Orders => print_json(out, &app.orders.list_all()),
        Command::Order { id } => {
            let detail = app
                .orders
                .get_detail(id)
                .await
                .with_context(|| format!("order {id} could not be loaded"))?;
            print_json(out, &detail)
        }
        Command::Customer => print_json(out, &app.customers.get_last()),
    }
}

async fn run_cart<A: StorefrontApi>(
    command: CartCommand,
    app: &Storefront<A>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        CartCommand::List => {}
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            if !(MIN_ADD_QUANTITY..=MAX_ADD_QUANTITY).contains(&quantity) {
                bail!("quantity must be between {MIN_ADD_QUANTITY} and {MAX_ADD_QUANTITY}");
            }
            let product = app
                .get_product(product_id)
                .await
                .with_context(|| format!("product {product_id} not found"))?;
            if !app.cart.add_or_merge(&NewCartItem::from_product(&product, quantity)) {
                bail!("could not add {} to the cart", product.product_name);
            }
        }
        CartCommand::Set { id, quantity } => {
            if !app.cart.set_quantity(id, quantity) {
                bail!("cart line {id} not found");
            }
        }
        CartCommand::Remove { id } => {
            if !app.cart.remove(id) {
                bail!("cart line {id} not found");
            }
        }
        CartCommand::Clear => {
            if !app.cart.clear() {
                bail!("could not clear the cart");
            }
        }
    }
    print_json(out, &app.cart.snapshot())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}
