//! Published read model for host renderers.
//!
//! The core never touches markup; it projects the cart into a display-ready
//! [`CartView`] and hands it to whatever sinks are subscribed.

use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::cart::Cart;
use crate::value_objects::{Money, ProductId};

/// Display-ready projection of one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub qty: u32,
    pub subtotal: Money,
}

/// Display-ready projection of the whole cart, republished on every commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub total: Money,
}

impl CartView {
    /// Projects the current cart state.
    pub fn project(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| LineView {
                id: line.id,
                name: line.name.clone(),
                unit_price: line.price,
                qty: line.qty,
                subtotal: line.subtotal(),
            })
            .collect();
        Self {
            lines,
            total: cart.total(),
        }
    }

    /// Returns true if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Receives the republished view after each commit.
pub trait ViewSink: Send + Sync {
    fn publish(&self, view: &CartView);
}

/// Sink that keeps every published view, for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    views: Arc<RwLock<Vec<CartView>>>,
}

impl RecordingSink {
    /// Creates a new empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently published view.
    pub fn last(&self) -> Option<CartView> {
        self.views.read().unwrap().last().cloned()
    }

    /// Returns how many views have been published.
    pub fn publish_count(&self) -> usize {
        self.views.read().unwrap().len()
    }
}

impl ViewSink for RecordingSink {
    fn publish(&self, view: &CartView) {
        self.views.write().unwrap().push(view.clone());
    }
}
