//! Order total computation.

use crate::catalog::Addon;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Breakdown of a computed order total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPricing {
    /// Product + surcharge + delivery + addons.
    pub total: Money,
    /// The applied logo surcharge (zero when no printed logo).
    pub logo_surcharge: Money,
    /// Sum of addon prices.
    pub addons_total: Money,
    /// Final amount charged. Currently always equal to `total`; kept
    /// separate so later discounting cannot change the wire contract.
    pub final_total: Money,
}

/// Compute an order's total from its resolved parts.
///
/// `addons` must be the fetched addon records, not ids; the delivery fee
/// comes from the order's resolved city. Deterministic and side-effect
/// free; the only failure modes are money arithmetic faults.
pub fn compute_order_total(
    product_price: Money,
    include_printed_logo: bool,
    logo_surcharge: Money,
    delivery_fee: Money,
    addons: &[Addon],
) -> Result<OrderPricing, CommerceError> {
    let currency = product_price.currency;

    for money in [&logo_surcharge, &delivery_fee]
        .into_iter()
        .chain(addons.iter().map(|a| &a.price))
    {
        if money.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: money.currency.code().to_string(),
            });
        }
    }

    let surcharge = if include_printed_logo {
        logo_surcharge
    } else {
        Money::zero(currency)
    };

    let addons_total = Money::try_sum(addons.iter().map(|a| &a.price), currency)
        .ok_or(CommerceError::Overflow)?;

    let total = product_price
        .try_add(&surcharge)
        .and_then(|t| t.try_add(&delivery_fee))
        .and_then(|t| t.try_add(&addons_total))
        .ok_or(CommerceError::Overflow)?;

    Ok(OrderPricing {
        total,
        logo_surcharge: surcharge,
        addons_total,
        final_total: total,
    })
}
