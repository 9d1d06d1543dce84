//! Quantity-tier resolution.
//!
//! Mirrors the Package catalog but is a pure computation, usable for
//! pre-quote estimates before an admin has created or selected a package.

use crate::config::PricingPolicy;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The three quantity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    /// 10-49 cards.
    Starter,
    /// 50-99 cards.
    Standard,
    /// 100+ cards.
    Enterprise,
}

impl PricingTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Starter => "starter",
            PricingTier::Standard => "standard",
            PricingTier::Enterprise => "enterprise",
        }
    }
}

/// How a tier is priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pricingType", rename_all = "lowercase")]
pub enum TierPricing {
    /// Admin quotes each order individually.
    Custom,
    /// Fixed per-card price.
    Fixed {
        /// Per-card price for the tier.
        price_per_card: Money,
    },
}

impl TierPricing {
    /// Whether this tier carries a usable fixed price.
    pub fn is_fixed(&self) -> bool {
        matches!(self, TierPricing::Fixed { .. })
    }
}

/// Resolved tier metadata for a quantity.
///
/// A response-only projection, so it serializes but never deserializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    /// Which tier the quantity falls in.
    pub tier: PricingTier,
    /// Display name, e.g. "50-99 cards".
    pub name: &'static str,
    /// Pricing mode.
    pub pricing: TierPricing,
    /// Short marketing description.
    pub description: &'static str,
    /// Feature bullets shown with the tier.
    pub features: &'static [&'static str],
}

/// Resolve the pricing tier for a quantity.
///
/// Returns None when the quantity is below the 10-card order minimum.
/// The bands are closed intervals with no gaps or overlaps.
pub fn resolve_pricing_tier(quantity: i64, policy: &PricingPolicy) -> Option<TierInfo> {
    match quantity {
        10..=49 => Some(TierInfo {
            tier: PricingTier::Starter,
            name: "10-49 cards",
            pricing: TierPricing::Custom,
            description: "Custom pricing - contact for quote",
            features: &["Custom branding", "Free delivery", "Basic support"],
        }),
        50..=99 => Some(TierInfo {
            tier: PricingTier::Standard,
            name: "50-99 cards",
            pricing: TierPricing::Fixed {
                price_per_card: policy.standard_price_per_card(),
            },
            description: "Fixed pricing with bulk benefits",
            features: &[
                "Custom branding",
                "Free delivery",
                "Priority support",
                "Design assistance",
            ],
        }),
        q if q >= 100 => Some(TierInfo {
            tier: PricingTier::Enterprise,
            name: "100+ cards",
            pricing: TierPricing::Custom,
            description: "Enterprise pricing with maximum savings",
            features: &[
                "Custom branding",
                "Free delivery",
                "Dedicated support",
                "Design assistance",
                "Volume discounts",
            ],
        }),
        _ => None,
    }
}
