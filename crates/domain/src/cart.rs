//! Cart state and derived totals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::value_objects::{Money, ProductId};

/// One entry in the cart, keyed by product id.
///
/// Name and price are copied out of the catalog at add time, so a line stays
/// renderable even if the catalog changes on the next page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub qty: u32,
}

impl CartLine {
    /// Creates a fresh line for a catalog product with quantity 1.
    pub fn for_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            qty: 1,
        }
    }

    /// price × qty for this line.
    pub fn subtotal(&self) -> Money {
        self.price.times(self.qty)
    }
}

/// Why a persisted line vector was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCart {
    /// Two lines share a product id.
    #[error("duplicate line id {0}")]
    DuplicateLine(ProductId),

    /// A line carries a zero quantity.
    #[error("zero quantity on line {0}")]
    ZeroQuantity(ProductId),
}

/// Ordered cart contents.
///
/// Insertion order is display order, and no two lines share a product id.
/// Totals are derived on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validated construction from an untrusted line vector (the persisted
    /// payload). Rejects duplicate ids and zero quantities.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, InvalidCart> {
        let mut seen = std::collections::HashSet::new();
        for line in &lines {
            if line.qty == 0 {
                return Err(InvalidCart::ZeroQuantity(line.id));
            }
            if !seen.insert(line.id) {
                return Err(InvalidCart::DuplicateLine(line.id));
            }
        }
        Ok(Self { lines })
    }

    /// Returns the lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for `id`, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Grand total: Σ price × qty over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Increments the quantity of an existing line. Returns false if no line
    /// matches.
    pub fn increment(&mut self, id: ProductId) -> bool {
        match self.lines.iter_mut().find(|l| l.id == id) {
            Some(line) => {
                line.qty = line.qty.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Appends a new line. Callers ensure no line with the same id exists.
    pub fn push_line(&mut self, line: CartLine) {
        debug_assert!(self.line(line.id).is_none());
        self.lines.push(line);
    }

    /// Drops the line for `id`. Returns false if no line matches.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() != before
    }

    /// Sets the quantity of an existing line, clamping zero to 1. Returns
    /// false if no line matches.
    pub fn set_qty(&mut self, id: ProductId, qty: u32) -> bool {
        match self.lines.iter_mut().find(|l| l.id == id) {
            Some(line) => {
                line.qty = qty.max(1);
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Course {id}"),
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn line_subtotal_is_price_times_qty() {
        let mut line = CartLine::for_product(&product(1, 1999));
        assert_eq!(line.subtotal().cents(), 1999);
        line.qty = 3;
        assert_eq!(line.subtotal().cents(), 5997);
    }

    #[test]
    fn push_and_increment() {
        let mut cart = Cart::new();
        cart.push_line(CartLine::for_product(&product(1, 2000)));
        assert!(cart.increment(ProductId::new(1)));
        assert_eq!(cart.line(ProductId::new(1)).unwrap().qty, 2);
        assert!(!cart.increment(ProductId::new(2)));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.push_line(CartLine::for_product(&product(3, 100)));
        cart.push_line(CartLine::for_product(&product(1, 100)));
        cart.push_line(CartLine::for_product(&product(2, 100)));

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn remove_drops_the_matching_line() {
        let mut cart = Cart::new();
        cart.push_line(CartLine::for_product(&product(1, 100)));
        cart.push_line(CartLine::for_product(&product(2, 100)));

        assert!(cart.remove(ProductId::new(1)));
        assert_eq!(cart.len(), 1);
        assert!(!cart.remove(ProductId::new(1)));
    }

    #[test]
    fn set_qty_clamps_zero_to_one() {
        let mut cart = Cart::new();
        cart.push_line(CartLine::for_product(&product(1, 100)));

        assert!(cart.set_qty(ProductId::new(1), 0));
        assert_eq!(cart.line(ProductId::new(1)).unwrap().qty, 1);

        assert!(cart.set_qty(ProductId::new(1), 5));
        assert_eq!(cart.line(ProductId::new(1)).unwrap().qty, 5);

        assert!(!cart.set_qty(ProductId::new(9), 5));
    }

    #[test]
    fn total_sums_all_subtotals() {
        let mut cart = Cart::new();
        cart.push_line(CartLine::for_product(&product(1, 2000)));
        cart.push_line(CartLine::for_product(&product(2, 1450)));
        cart.set_qty(ProductId::new(1), 2);

        assert_eq!(cart.total().cents(), 2 * 2000 + 1450);
        assert_eq!(cart.total().to_string(), "$54.50");
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(Cart::new().total(), Money::zero());
    }

    #[test]
    fn from_lines_rejects_duplicates() {
        let lines = vec![
            CartLine::for_product(&product(1, 100)),
            CartLine::for_product(&product(1, 100)),
        ];
        assert_eq!(
            Cart::from_lines(lines),
            Err(InvalidCart::DuplicateLine(ProductId::new(1)))
        );
    }

    #[test]
    fn from_lines_rejects_zero_quantity() {
        let mut line = CartLine::for_product(&product(1, 100));
        line.qty = 0;
        assert_eq!(
            Cart::from_lines(vec![line]),
            Err(InvalidCart::ZeroQuantity(ProductId::new(1)))
        );
    }

    #[test]
    fn cart_serializes_as_a_bare_array() {
        let mut cart = Cart::new();
        cart.push_line(CartLine::for_product(&product(1, 2000)));

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":1,"name":"Course 1","price":2000,"qty":1}]"#);

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
