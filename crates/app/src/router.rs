//! Translates UI interaction intents into cart store operations.

use checkout::{CheckoutAdapter, CheckoutError, CheckoutOutcome, PaymentGateway};
use domain::{CartStore, CartStoreError, ProductId};
use kv_store::KeyValueStore;
use thiserror::Error;

/// Closed set of user intents the page can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIntent {
    /// An add-to-cart control was activated for a product.
    AddToCart { id: ProductId },

    /// A line's remove control was activated.
    RemoveLine { id: ProductId },

    /// A line's quantity input changed; the raw input string is carried as
    /// the page produced it.
    QuantityChanged { id: ProductId, value: String },

    /// The clear-cart control was activated.
    ClearCart,

    /// The checkout control was activated.
    Checkout,
}

/// Errors surfaced by intent dispatch.
#[derive(Debug, Error)]
pub enum AppError {
    /// A cart mutation failed to commit.
    #[error(transparent)]
    Cart(#[from] CartStoreError),

    /// A checkout attempt was refused or failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Maps intents onto the cart store and checkout adapter.
///
/// The router owns both; hosts hand it intents and render from the view
/// sinks subscribed on the store.
pub struct EventRouter<S: KeyValueStore, G: PaymentGateway> {
    store: CartStore<S>,
    checkout: CheckoutAdapter<G>,
}

impl<S: KeyValueStore, G: PaymentGateway> EventRouter<S, G> {
    /// Creates a router over a store and checkout adapter.
    pub fn new(store: CartStore<S>, checkout: CheckoutAdapter<G>) -> Self {
        Self { store, checkout }
    }

    /// Read access to the cart store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Mutable access to the cart store, for subscribing sinks and the
    /// startup [`CartStore::load`].
    pub fn store_mut(&mut self) -> &mut CartStore<S> {
        &mut self.store
    }

    /// Loads persisted cart state; call once at startup, after subscribing
    /// view sinks.
    pub fn load(&mut self) -> Result<(), AppError> {
        self.store.load()?;
        Ok(())
    }

    /// Dispatches one intent.
    ///
    /// Mutations return `Ok(None)`; a checkout returns its settled outcome.
    pub async fn dispatch(
        &mut self,
        intent: CartIntent,
    ) -> Result<Option<CheckoutOutcome>, AppError> {
        match intent {
            CartIntent::AddToCart { id } => {
                self.store.add(id)?;
                Ok(None)
            }
            CartIntent::RemoveLine { id } => {
                self.store.remove(id)?;
                Ok(None)
            }
            CartIntent::QuantityChanged { id, value } => {
                self.store.set_qty(id, parse_quantity(&value))?;
                Ok(None)
            }
            CartIntent::ClearCart => {
                self.store.clear()?;
                Ok(None)
            }
            CartIntent::Checkout => {
                let outcome = self.checkout.checkout(&mut self.store).await?;
                Ok(Some(outcome))
            }
        }
    }
}

/// Coerces a raw quantity input. Non-numeric values become 1; clamping to
/// the line minimum happens in the store.
fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(parse_quantity("5"), 5);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("0"), 0);
        assert_eq!(parse_quantity("-3"), -3);
    }

    #[test]
    fn non_numeric_strings_coerce_to_one() {
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity("2.5"), 1);
    }
}
