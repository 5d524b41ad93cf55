//! Static product catalog.
//!
//! The catalog is defined at build time and never mutated. Views look products
//! up by identifier; a miss is a normal outcome (the "not found" page), not an
//! error.

use serde::Serialize;

use crate::types::{Price, ProductId};

/// A product offered in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique slug, also used in product URLs.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image reference (path under the static assets root).
    pub image: String,
    /// Marketing description.
    pub description: String,
    /// Collection label (e.g. "Metallic Series").
    pub collection: String,
}

/// Read-only list of products, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The store's built-in product list.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            product(
                "golden-bear",
                "Golden Bear",
                8999,
                "/static/images/toy-bear-gold.jpg",
                "Premium metallic gold finish bear figure, handcrafted with attention to detail.",
                "Metallic Series",
            ),
            product(
                "noir-bot",
                "Noir Bot",
                11999,
                "/static/images/toy-robot-black.jpg",
                "Sleek matte black robot with gold chrome accents. Limited edition.",
                "Tech Collection",
            ),
            product(
                "bronze-bunny",
                "Bronze Bunny",
                7999,
                "/static/images/toy-bunny-bronze.jpg",
                "Adorable copper-bronze bunny sculpture with artistic finish.",
                "Metallic Series",
            ),
            product(
                "shadow-cat",
                "Shadow Cat",
                9999,
                "/static/images/toy-cat-noir.jpg",
                "Elegant matte black cat with subtle gold ear accents.",
                "Noir Collection",
            ),
        ])
    }

    /// All products in display order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Every product except `id`, in display order ("You may also like").
    pub fn related<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.id.as_str() != id)
    }

    /// Products carrying the given collection label.
    pub fn in_collection<'a>(
        &'a self,
        collection: &'a str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.collection == collection)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn product(
    id: &str,
    name: &str,
    cents: u32,
    image: &str,
    description: &str,
    collection: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from_cents(cents),
        image: image.to_owned(),
        description: description.to_owned(),
        collection: collection.to_owned(),
    }
}
