//! Quantity-tier packages for bulk custom orders.

use crate::ids::PackageId;
use crate::money::Money;
use crate::softdelete::{impl_deletable, SoftDelete};
use serde::{Deserialize, Serialize};

/// Which pricing tier a package represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// 10-49 cards, custom-quoted.
    Starter,
    /// 50-99 cards, fixed price.
    Standard,
    /// 100+ cards, custom-quoted.
    Enterprise,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Starter => "starter",
            PackageType::Standard => "standard",
            PackageType::Enterprise => "enterprise",
        }
    }
}

/// Inclusive quantity range a package covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRange {
    /// Minimum quantity, inclusive.
    pub min: i64,
    /// Maximum quantity, inclusive.
    pub max: i64,
}

impl QuantityRange {
    /// Create a range; callers should validate `max >= min` via
    /// [`Package::validate`] before persisting.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether the quantity falls inside this range.
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min && quantity <= self.max
    }

    /// Whether two ranges share any quantity.
    pub fn overlaps(&self, other: &QuantityRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Storefront display form, e.g. "50-99" or "100+".
    pub fn display(&self) -> String {
        if self.max >= OPEN_ENDED_MAX {
            format!("{}+", self.min)
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }
}

/// Max value treated as "no upper bound" when displaying a range.
pub const OPEN_ENDED_MAX: i64 = 999_999;

/// Longest accepted package description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Package pricing mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePricing {
    /// Per-card price. Only meaningful when `is_fixed_price` holds;
    /// custom-quoted tiers carry a placeholder that must not feed totals.
    pub price_per_card: Money,
    /// True for the fixed 50-99 tier, false for custom-quoted tiers.
    pub is_fixed_price: bool,
}

/// A quantity-tier package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Unique package identifier.
    pub id: PackageId,
    /// Unique package name.
    pub name: String,
    /// Quantity range this package covers.
    pub quantity_range: QuantityRange,
    /// Pricing mode and per-card price.
    pub pricing: PackagePricing,
    /// Marketing feature bullets.
    pub features: Vec<String>,
    /// Package description.
    pub description: Option<String>,
    /// Estimated production-plus-delivery days.
    pub estimated_days: i64,
    /// Whether delivery is free for this package.
    pub free_delivery: bool,
    /// Tier classification.
    pub package_type: PackageType,
    /// Whether the package is currently offered.
    pub is_active: bool,
    /// Sort order for the storefront.
    pub display_order: i32,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Soft-delete state.
    #[serde(flatten)]
    pub soft_delete: SoftDelete,
}

impl Package {
    /// Create a new package.
    pub fn new(
        name: impl Into<String>,
        quantity_range: QuantityRange,
        pricing: PackagePricing,
        package_type: PackageType,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: PackageId::generate(),
            name: name.into(),
            quantity_range,
            pricing,
            features: Vec::new(),
            description: None,
            estimated_days: 10,
            free_delivery: true,
            package_type,
            is_active: true,
            display_order: 0,
            created_at: now,
            updated_at: now,
            soft_delete: SoftDelete::default(),
        }
    }

    /// Structural checks plus range-overlap against the other live
    /// packages; run before persisting.
    ///
    /// Returns a message when invalid, None when acceptable.
    pub fn validate(&self, others: &[Package]) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Package name is required".to_string());
        }
        if self.quantity_range.min < 1 {
            return Some("Minimum quantity must be at least 1".to_string());
        }
        if self.quantity_range.max < self.quantity_range.min {
            return Some(
                "Maximum quantity must be greater than or equal to minimum quantity".to_string(),
            );
        }
        if self.pricing.price_per_card.is_negative() {
            return Some("Price per card must be positive".to_string());
        }
        if self.description.as_ref().is_some_and(|d| d.len() > MAX_DESCRIPTION_LEN) {
            return Some("Package description is too long".to_string());
        }
        let clash = others.iter().find(|p| {
            p.id != self.id
                && !p.soft_delete.is_deleted
                && p.quantity_range.overlaps(&self.quantity_range)
        });
        if let Some(p) = clash {
            return Some(format!(
                "Quantity range overlaps with existing package: {}",
                p.name
            ));
        }
        None
    }

    /// Formatted per-card price, e.g. "15.000 JOD".
    pub fn formatted_price(&self) -> String {
        self.pricing.price_per_card.display_with_code()
    }
}

impl_deletable!(Package);

/// Find the active, non-deleted package whose range contains the quantity.
///
/// Custom-quoted tiers resolve too, but their package price must not feed
/// totals; only fixed-price packages carry a usable per-card price.
pub fn package_for_quantity(packages: &[Package], quantity: i64) -> Option<&Package> {
    packages.iter().find(|p| {
        p.is_active && !p.soft_delete.is_deleted && p.quantity_range.contains(quantity)
    })
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
