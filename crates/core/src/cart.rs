//! Session-scoped shopping cart.
//!
//! The cart is the single source of truth for what a shopper intends to buy.
//! It holds at most one line per product, in the order products were first
//! added, and never exposes a line with a quantity below one.
//!
//! The total is derived on every read from the lines themselves; nothing is
//! cached alongside them.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::order::OrderLine;
use crate::types::{Price, ProductId};

/// What to do with the quantity when the product is already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddMode {
    /// Add the quantity to the existing line.
    #[default]
    Accumulate,
    /// Overwrite the existing line's quantity.
    Replace,
}

/// Product details captured when an item is put in the cart.
///
/// The price is a snapshot: later catalog changes do not reprice lines that
/// are already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl From<&Product> for ItemSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price at the time the line was created.
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLineItem {
    fn new(item: ItemSnapshot, quantity: u32) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Put `quantity` of an item in the cart.
    ///
    /// If the product already has a line, `mode` decides whether the quantity
    /// is added to it or replaces it. Otherwise a new line is appended.
    ///
    /// A zero quantity never creates a line. With [`AddMode::Replace`] it
    /// removes the existing line, since a line cannot sit at zero.
    pub fn add(&mut self, item: ItemSnapshot, quantity: u32, mode: AddMode) {
        if let Some(line) = self.items.iter_mut().find(|l| l.id == item.id) {
            line.quantity = match mode {
                AddMode::Accumulate => line.quantity.saturating_add(quantity),
                AddMode::Replace => quantity,
            };
            self.items.retain(|l| l.quantity > 0);
        } else if quantity > 0 {
            self.items.push(CartLineItem::new(item, quantity));
        }
    }

    /// Increment a line's quantity by one. No-op if the product is absent.
    pub fn increase(&mut self, id: &ProductId) {
        if let Some(line) = self.items.iter_mut().find(|l| &l.id == id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrement a line's quantity by one, never below one.
    ///
    /// Lines that somehow hold a zero quantity are dropped in the same pass.
    pub fn decrease(&mut self, id: &ProductId) {
        if let Some(line) = self.items.iter_mut().find(|l| &l.id == id) {
            line.quantity = line.quantity.saturating_sub(1).max(1);
        }
        self.items.retain(|l| l.quantity > 0);
    }

    /// Remove a product's line, if present.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|l| &l.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a product's line.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit price times quantity over every line.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    /// Total number of units across all lines (the cart badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, l| count.saturating_add(l.quantity))
    }

    /// The cart as order lines, ready for the order composer.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|l| OrderLine::new(l.name.clone(), l.quantity, l.subtotal()))
            .collect()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod properties {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::Catalog;

    const IDS: [&str; 4] = ["golden-bear", "noir-bot", "bronze-bunny", "shadow-cat"];

    #[derive(Debug, Clone)]
    enum Op {
        Add {
            id: &'static str,
            quantity: u32,
            replace: bool,
        },
        Increase(&'static str),
        Decrease(&'static str),
        Remove(&'static str),
        Clear,
    }

    fn arb_id() -> impl Strategy<Value = &'static str> {
        prop::sample::select(IDS.to_vec())
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (arb_id(), 0u32..6, any::<bool>())
                .prop_map(|(id, quantity, replace)| Op::Add { id, quantity, replace }),
            3 => arb_id().prop_map(Op::Increase),
            3 => arb_id().prop_map(Op::Decrease),
            1 => arb_id().prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    fn apply(cart: &mut Cart, catalog: &Catalog, op: &Op) {
        match *op {
            Op::Add { id, quantity, replace } => {
                let mode = if replace { AddMode::Replace } else { AddMode::Accumulate };
                cart.add(ItemSnapshot::from(catalog.get(id).unwrap()), quantity, mode);
            }
            Op::Increase(id) => cart.increase(&ProductId::new(id)),
            Op::Decrease(id) => cart.decrease(&ProductId::new(id)),
            Op::Remove(id) => cart.remove(&ProductId::new(id)),
            Op::Clear => cart.clear(),
        }
    }

    proptest! {
        /// Every reachable cart has positive quantities, one line per product,
        /// and a total equal to the sum of its lines.
        #[test]
        fn prop_cart_invariants(ops in prop::collection::vec(arb_op(), 0..40)) {
            let catalog = Catalog::builtin();
            let mut cart = Cart::new();

            for op in &ops {
                let present_before = match op {
                    Op::Decrease(id) => cart.get(&ProductId::new(*id)).is_some(),
                    _ => false,
                };

                apply(&mut cart, &catalog, op);

                prop_assert!(cart.items().iter().all(|l| l.quantity >= 1));

                let mut ids: Vec<&str> = cart.items().iter().map(|l| l.id.as_str()).collect();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), cart.items().len());

                let expected: Price = cart.items().iter().map(|l| l.price.times(l.quantity)).sum();
                prop_assert_eq!(cart.total(), expected);
                prop_assert_eq!(
                    cart.item_count(),
                    cart.items().iter().map(|l| l.quantity).sum::<u32>()
                );

                if let Op::Decrease(id) = op {
                    prop_assert_eq!(cart.get(&ProductId::new(*id)).is_some(), present_before);
                }
            }
        }

        /// Accumulating adds sum their quantities, in count and in price.
        #[test]
        fn prop_accumulating_adds_sum(adds in prop::collection::vec((arb_id(), 1u32..10), 1..30)) {
            let catalog = Catalog::builtin();
            let mut cart = Cart::new();

            for &(id, quantity) in &adds {
                cart.add(ItemSnapshot::from(catalog.get(id).unwrap()), quantity, AddMode::Accumulate);
            }

            let count: u32 = adds.iter().map(|&(_, q)| q).sum();
            let total: Price = adds
                .iter()
                .map(|&(id, q)| catalog.get(id).unwrap().price.times(q))
                .sum();
            prop_assert_eq!(cart.item_count(), count);
            prop_assert_eq!(cart.total(), total);
        }
    }
}
