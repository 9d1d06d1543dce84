//! Pricing engine: order totals, quantity tiers, delivery estimates.
//!
//! Every function here is a pure computation over already-resolved catalog
//! records; lookups and persistence happen in the caller.

mod delivery;
mod engine;
mod tier;

pub use delivery::{estimate_custom_delivery, Urgency};
pub use engine::{compute_order_total, OrderPricing};
pub use tier::{resolve_pricing_tier, PricingTier, TierInfo, TierPricing};
