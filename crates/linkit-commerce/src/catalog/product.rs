//! NFC-card product types.

use crate::ids::{ProductId, UserId};
use crate::money::Money;
use crate::softdelete::{impl_deletable, SoftDelete};
use serde::{Deserialize, Serialize};

/// A named card-design variant a customer can pick for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardDesignOption {
    /// Card color value (name or hex).
    pub color: String,
    /// Human-readable color name.
    pub color_name: String,
    /// Optional preview image path.
    pub image: Option<String>,
}

/// A card product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product description.
    pub description: Option<String>,
    /// Base card price.
    pub price: Money,
    /// Image paths.
    pub images: Vec<String>,
    /// Whether this is the featured storefront product.
    pub is_main_product: bool,
    /// Available card-design variants.
    pub card_designs: Vec<CardDesignOption>,
    /// Admin user who created the product.
    pub created_by: UserId,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Soft-delete state.
    #[serde(flatten)]
    pub soft_delete: SoftDelete,
}

impl Product {
    /// Create a new product.
    pub fn new(title: impl Into<String>, price: Money, created_by: UserId) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            title: title.into(),
            description: None,
            price,
            images: Vec::new(),
            is_main_product: false,
            card_designs: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
            soft_delete: SoftDelete::default(),
        }
    }

    /// Add a card-design variant.
    pub fn add_card_design(
        &mut self,
        color: impl Into<String>,
        color_name: impl Into<String>,
        image: Option<String>,
    ) {
        self.card_designs.push(CardDesignOption {
            color: color.into(),
            color_name: color_name.into(),
            image,
        });
        self.updated_at = current_timestamp();
    }

    /// Look up a design variant by color.
    pub fn design_for_color(&self, color: &str) -> Option<&CardDesignOption> {
        self.card_designs
            .iter()
            .find(|d| d.color.eq_ignore_ascii_case(color))
    }
}

impl_deletable!(Product);

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::softdelete::Deletable;

    #[test]
    fn test_product_creation() {
        let product = Product::new(
            "Classic NFC Card",
            Money::from_decimal(100.0, Currency::JOD),
            UserId::new("admin-1"),
        );
        assert_eq!(product.title, "Classic NFC Card");
        assert!(!product.is_deleted());
    }

    #[test]
    fn test_design_lookup() {
        let mut product = Product::new(
            "Classic NFC Card",
            Money::from_decimal(100.0, Currency::JOD),
            UserId::new("admin-1"),
        );
        product.add_card_design("black", "Matte Black", None);
        product.add_card_design("white", "Pearl White", None);

        assert_eq!(
            product.design_for_color("BLACK").map(|d| d.color_name.as_str()),
            Some("Matte Black")
        );
        assert!(product.design_for_color("gold").is_none());
    }
}
