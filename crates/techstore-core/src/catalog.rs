//! The static product catalog.
//!
//! The full set is fixed at build time; nothing here mutates or fetches.
//! Prices are stored as integer cents so non-negativity holds by construction.

use std::fmt;

/// Product category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Audio,
    Wearables,
    Accessories,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Audio => "Audio",
            Category::Wearables => "Wearables",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A displayable product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: u32,
    pub name: &'static str,
    /// Price in cents.
    pub price_cents: u32,
    pub image_url: &'static str,
    pub category: Category,
}

impl Product {
    /// Formats the price as dollars, e.g. `$299.99`.
    pub fn price_display(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Returns the full product set.
pub fn products() -> &'static [Product] {
    PRODUCTS
}

/// Labels for the category row, including the catch-all entry.
/// Rendered only; filtering is not wired up.
pub fn category_filters() -> &'static [&'static str] {
    &["Audio", "Wearables", "Accessories", "All Products"]
}

const PRODUCTS: &[Product] = &[
    Product {
        id: 1,
        name: "Premium Headphones",
        price_cents: 29999,
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&q=80",
        category: Category::Audio,
    },
    Product {
        id: 2,
        name: "Smart Watch",
        price_cents: 19999,
        image_url: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&q=80",
        category: Category::Wearables,
    },
    Product {
        id: 3,
        name: "Wireless Speaker",
        price_cents: 14999,
        image_url: "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=500&q=80",
        category: Category::Audio,
    },
    Product {
        id: 4,
        name: "Mechanical Keyboard",
        price_cents: 17999,
        image_url: "https://images.unsplash.com/photo-1618384887929-16ec33fab9ef?w=500&q=80",
        category: Category::Accessories,
    },
    Product {
        id: 5,
        name: "Gaming Mouse",
        price_cents: 8999,
        image_url: "https://images.unsplash.com/photo-1527814050087-3793815479db?w=500&q=80",
        category: Category::Accessories,
    },
    Product {
        id: 6,
        name: "Laptop Stand",
        price_cents: 4999,
        image_url: "https://images.unsplash.com/photo-1625842268584-8f3296236761?w=500&q=80",
        category: Category::Accessories,
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Every product id is unique across the set.
    #[test]
    fn test_product_ids_unique() {
        let ids: HashSet<u32> = products().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products().len());
    }

    #[test]
    fn test_price_display_formatting() {
        let product = products().iter().find(|p| p.id == 1).unwrap();
        assert_eq!(product.price_display(), "$299.99");

        let stand = products().iter().find(|p| p.id == 6).unwrap();
        assert_eq!(stand.price_display(), "$49.99");
    }

    #[test]
    fn test_category_row_ends_with_catch_all() {
        assert_eq!(category_filters().last(), Some(&"All Products"));
    }

    #[test]
    fn test_every_product_has_image_and_name() {
        for product in products() {
            assert!(!product.name.is_empty());
            assert!(product.image_url.starts_with("https://"));
        }
    }
}
