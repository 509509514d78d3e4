//! Read-only product catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Money, ProductId};

/// Raw catalog record as shipped by the host page configuration.
///
/// `id` and `price` arrive as attribute strings; the catalog parses them and
/// skips records it cannot make sense of.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub price: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl CatalogRecord {
    /// Creates a record from its raw attribute values.
    pub fn new(id: impl Into<String>, price: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            price: price.into(),
            name,
        }
    }
}

/// A course offered for sale. Immutable once loaded into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

/// Read-only mapping from product id to its canonical name and price.
///
/// Built once at startup; absence of an id is a valid state, not an error.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    /// Builds a catalog from raw records.
    ///
    /// A record with an unparsable or non-positive id, or an unparsable or
    /// negative price, is skipped rather than aborting construction. A
    /// missing or blank name defaults to `"Product {id}"`.
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut products = HashMap::new();
        for record in records {
            match parse_record(&record) {
                Some(product) => {
                    products.insert(product.id, product);
                }
                None => {
                    tracing::warn!(
                        id = %record.id,
                        price = %record.price,
                        "skipping unparsable catalog record"
                    );
                }
            }
        }
        Self { products }
    }

    /// Looks up a product by id.
    pub fn lookup(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Returns the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn parse_record(record: &CatalogRecord) -> Option<Product> {
    let id: i64 = record.id.trim().parse().ok()?;
    if id <= 0 {
        return None;
    }
    let id = ProductId::new(id);

    let price = Money::parse(&record.price)?;
    if price.is_negative() {
        return None;
    }

    let name = record
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Product {id}"));

    Some(Product { id, name, price })
}
