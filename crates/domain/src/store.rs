//! Cart state manager.
//!
//! [`CartStore`] owns the in-memory cart and is its only mutation surface.
//! Every mutation funnels through a single commit step that serializes the
//! cart, writes it through the persistence adapter, and republishes the view,
//! so the persisted copy and the in-memory copy converge after every
//! operation.

use kv_store::KeyValueStore;

use crate::cart::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::error::CartStoreError;
use crate::value_objects::ProductId;
use crate::view::{CartView, ViewSink};

/// Fixed storage key for the serialized cart.
pub const CART_KEY: &str = "cart_v1";

/// Owns cart state, catalog, persistence, and view subscribers.
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    catalog: Catalog,
    storage: S,
    sinks: Vec<Box<dyn ViewSink>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Creates a store with an empty cart. Call [`CartStore::load`] once at
    /// startup to pick up persisted state.
    pub fn new(catalog: Catalog, storage: S) -> Self {
        Self {
            cart: Cart::new(),
            catalog,
            storage,
            sinks: Vec::new(),
        }
    }

    /// Subscribes a sink to every committed view.
    pub fn subscribe(&mut self, sink: impl ViewSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Read-only view of the current cart.
    pub fn snapshot(&self) -> &Cart {
        &self.cart
    }

    /// Projects the current cart into its display model.
    pub fn view(&self) -> CartView {
        CartView::project(&self.cart)
    }

    /// Reads the persisted cart, falling back to an empty cart on anything
    /// unusable: missing key, malformed JSON, a non-array payload, or lines
    /// violating the cart invariants. Backend read errors are treated the
    /// same way. Commits afterwards, normalizing storage and publishing the
    /// initial view.
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self) -> Result<(), CartStoreError> {
        self.cart = match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => Cart::from_lines(lines).unwrap_or_else(|err| {
                    tracing::warn!(%err, "resetting persisted cart with broken invariants");
                    Cart::new()
                }),
                Err(err) => {
                    tracing::warn!(%err, "resetting malformed persisted cart");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                tracing::warn!(%err, "treating unreadable cart storage as empty");
                Cart::new()
            }
        };
        self.commit("load")
    }

    /// Adds one unit of a product.
    ///
    /// An existing line is incremented; otherwise the id is resolved through
    /// the catalog and a fresh line appended. An id the catalog doesn't know
    /// is silently ignored, and nothing is committed.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, id: ProductId) -> Result<(), CartStoreError> {
        if !self.cart.increment(id) {
            match self.catalog.lookup(id) {
                Some(product) => self.cart.push_line(CartLine::for_product(product)),
                None => {
                    tracing::debug!(%id, "ignoring add for unknown product");
                    return Ok(());
                }
            }
        }
        self.commit("add")
    }

    /// Drops the line for `id`; a miss is a no-op but still commits.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: ProductId) -> Result<(), CartStoreError> {
        if !self.cart.remove(id) {
            tracing::debug!(%id, "remove for id not in cart");
        }
        self.commit("remove")
    }

    /// Sets the quantity of an existing line, clamping anything below 1 up to
    /// 1; a miss is a no-op but still commits.
    #[tracing::instrument(skip(self))]
    pub fn set_qty(&mut self, id: ProductId, qty: i64) -> Result<(), CartStoreError> {
        let qty = qty.clamp(1, u32::MAX as i64) as u32;
        if !self.cart.set_qty(id, qty) {
            tracing::debug!(%id, "quantity change for id not in cart");
        }
        self.commit("set_qty")
    }

    /// Empties the cart.
    #[tracing::instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.commit("clear")
    }

    /// The single choke point behind every mutation. Serializes the cart and
    /// writes it through the persistence adapter, then republishes the view.
    fn commit(&mut self, op: &'static str) -> Result<(), CartStoreError> {
        let payload = serde_json::to_string(&self.cart)?;
        self.storage.put(CART_KEY, &payload)?;

        let view = CartView::project(&self.cart);
        for sink in &self.sinks {
            sink.publish(&view);
        }

        metrics::counter!("cart_commits_total").increment(1);
        tracing::debug!(op, lines = self.cart.len(), total = %view.total, "cart committed");
        Ok(())
    }
}
