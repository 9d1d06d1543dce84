//! Business-policy configuration.
//!
//! Surcharges, tier prices, sanity ceilings and delivery estimates are
//! operator policy, not code: they load from TOML and default to the
//! values the shop currently runs with.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing and delivery policy knobs.
///
/// Amounts are expressed in major currency units (e.g., `15.0` JOD) so the
/// file stays human-editable; accessors convert to [`Money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Currency all catalog prices are quoted in.
    pub currency: Currency,
    /// Flat fee added when a printed company logo is requested.
    pub logo_surcharge: f64,
    /// Fixed per-card price for the 50-99 quantity tier.
    pub standard_price_per_card: f64,
    /// Sanity ceiling for admin-entered per-card quotes.
    pub max_price_per_card: f64,
    /// Sanity ceiling for a custom order's total quote.
    pub max_total_price: f64,
    /// Country code delivered on the short domestic schedule.
    pub domestic_country_code: String,
    /// Delivery estimate in days for domestic standard orders.
    pub domestic_delivery_days: i64,
    /// Delivery estimate in days for international standard orders.
    pub international_delivery_days: i64,
    /// Base production-plus-delivery estimate in days for custom orders.
    pub custom_base_delivery_days: i64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            currency: Currency::JOD,
            logo_surcharge: 5.0,
            standard_price_per_card: 15.0,
            max_price_per_card: 1000.0,
            max_total_price: 1_000_000.0,
            domestic_country_code: "JO".to_string(),
            domestic_delivery_days: 3,
            international_delivery_days: 5,
            custom_base_delivery_days: 10,
        }
    }
}

impl PricingPolicy {
    /// Parse a policy from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, CommerceError> {
        toml::from_str(input)
            .map_err(|e| CommerceError::Validation(format!("Invalid pricing policy: {e}")))
    }

    /// The logo surcharge as money.
    pub fn logo_surcharge(&self) -> Money {
        Money::from_decimal(self.logo_surcharge, self.currency)
    }

    /// The fixed 50-99 tier per-card price as money.
    pub fn standard_price_per_card(&self) -> Money {
        Money::from_decimal(self.standard_price_per_card, self.currency)
    }

    /// The per-card quote ceiling as money.
    pub fn max_price_per_card(&self) -> Money {
        Money::from_decimal(self.max_price_per_card, self.currency)
    }

    /// The total quote ceiling as money.
    pub fn max_total_price(&self) -> Money {
        Money::from_decimal(self.max_total_price, self.currency)
    }

    /// Delivery estimate in days for a standard order shipped to the
    /// given country code.
    pub fn standard_delivery_days(&self, country_code: &str) -> i64 {
        if country_code.eq_ignore_ascii_case(&self.domestic_country_code) {
            self.domestic_delivery_days
        } else {
            self.international_delivery_days
        }
    }
}
