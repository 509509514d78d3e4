//! Page-level wiring for the storefront cart subsystem.
//!
//! A host embeds the subsystem by building a [`domain::Catalog`] from its
//! product configuration, picking a [`kv_store::KeyValueStore`] backend and a
//! [`checkout::PaymentGateway`], and driving the returned [`EventRouter`]
//! with [`CartIntent`] values. Rendering stays entirely on the host side,
//! fed by view sinks subscribed on the store.

pub mod config;
pub mod router;

use checkout::{CheckoutAdapter, PaymentGateway};
use domain::{CartStore, Catalog};
use kv_store::KeyValueStore;

pub use config::CheckoutConfig;
pub use router::{AppError, CartIntent, EventRouter};

/// Initializes the tracing subscriber with an env-filter (`RUST_LOG`),
/// defaulting to `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Wires a catalog, storage backend, and gateway into an [`EventRouter`].
///
/// The returned router has not loaded persisted state yet: subscribe view
/// sinks via [`EventRouter::store_mut`], then call [`EventRouter::load`] so
/// the initial view publishes to them.
pub fn create_router<S, G>(
    catalog: Catalog,
    storage: S,
    gateway: G,
    config: CheckoutConfig,
) -> EventRouter<S, G>
where
    S: KeyValueStore,
    G: PaymentGateway,
{
    let store = CartStore::new(catalog, storage);
    let adapter = CheckoutAdapter::new(
        gateway,
        config.merchant_key,
        config.payer_email,
        config.currency,
    );
    EventRouter::new(store, adapter)
}
