//! Delivery-time estimation for custom orders.

use crate::config::PricingPolicy;
use serde::{Deserialize, Serialize};

/// Requested production urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Standard,
    Urgent,
    Express,
}

/// Estimate delivery days for a custom order.
///
/// Starts from the policy's base, grows with quantity (+3 over 1000 cards,
/// a further +7 over 5000), and shrinks for urgent/express requests with
/// floors so a rush never promises the impossible.
pub fn estimate_custom_delivery(quantity: i64, urgency: Urgency, policy: &PricingPolicy) -> i64 {
    let mut days = policy.custom_base_delivery_days;

    if quantity > 1000 {
        days += 3;
    }
    if quantity > 5000 {
        days += 7;
    }

    match urgency {
        Urgency::Standard => days,
        Urgency::Urgent => (days - 3).max(5),
        Urgency::Express => (days - 5).max(3),
    }
}
