pub mod checkout;
pub mod cli;
pub mod config;
pub mod error;
pub mod repositories;
pub mod state;

#[cfg(test)]
mod test_support;

pub use checkout::{Checkout, CheckoutDraft, CheckoutOutcome};
pub use config::{ClientConfig, Target};
pub use error::{CheckoutError, StartupError};
pub use state::Storefront;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "storefront_client_lib=debug,storefront_api=info,storefront_store=info,warn",
        )
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
