//! Domain layer for the storefront cart: value objects, the read-only
//! catalog, cart state with derived totals, the published view model, and the
//! [`CartStore`] that ties mutation, persistence, and view republication
//! together.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod store;
pub mod value_objects;
pub mod view;

pub use cart::{Cart, CartLine, InvalidCart};
pub use catalog::{Catalog, CatalogRecord, Product};
pub use error::CartStoreError;
pub use store::{CART_KEY, CartStore};
pub use value_objects::{Money, ProductId};
pub use view::{CartView, LineView, RecordingSink, ViewSink};
