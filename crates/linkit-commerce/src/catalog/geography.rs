//! Delivery geography: countries and their cities.
//!
//! The city's delivery fee is the sole geographic pricing input.

use crate::ids::{CityId, CountryId};
use crate::money::Money;
use crate::softdelete::{impl_deletable, SoftDelete};
use serde::{Deserialize, Serialize};

/// A country orders can ship to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Unique country identifier.
    pub id: CountryId,
    /// Country name.
    pub name: String,
    /// Unique 2-3 letter uppercase code (e.g., "JO").
    pub code: String,
    /// Whether the country is currently offered.
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

impl Country {
    /// Create a new country. The code is normalized to uppercase.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: CountryId::generate(),
            name: name.into(),
            code: code.into().to_uppercase(),
            is_active: true,
            display_order: 0,
            created_at: now,
            updated_at: now,
            soft_delete: SoftDelete::default(),
        }
    }

    /// Check the code is 2-3 ASCII letters.
    ///
    /// Returns a message when invalid, None when acceptable.
    pub fn validate_code(code: &str) -> Option<String> {
        let len = code.chars().count();
        if !(2..=3).contains(&len) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(format!(
                "Country code '{code}' must be 2-3 letters (e.g., JO, UK)"
            ));
        }
        None
    }
}

impl_deletable!(Country);

/// A city with its delivery fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Unique city identifier.
    pub id: CityId,
    /// City name, unique within its country (case-insensitive).
    pub name: String,
    /// Owning country.
    pub country: CountryId,
    /// Delivery fee charged for orders shipped here.
    pub delivery_fee: Money,
    /// Whether the city is currently offered.
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

impl City {
    /// Create a new city.
    pub fn new(name: impl Into<String>, country: CountryId, delivery_fee: Money) -> Self {
        let now = current_timestamp();
        Self {
            id: CityId::generate(),
            name: name.into(),
            country,
            delivery_fee,
            is_active: true,
            display_order: 0,
            created_at: now,
            updated_at: now,
            soft_delete: SoftDelete::default(),
        }
    }
}

impl_deletable!(City);

/// Check a city name is still free within a country, case-insensitively.
///
/// Run against the live (non-deleted) cities before persisting. Returns a
/// message naming the clash, or None when the name is available.
pub fn city_name_available(existing: &[City], country: &CountryId, name: &str) -> Option<String> {
    let clash = existing.iter().find(|c| {
        &c.country == country && !c.soft_delete.is_deleted && c.name.eq_ignore_ascii_case(name)
    });
    clash.map(|c| format!("City '{}' already exists in this country", c.name))
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
