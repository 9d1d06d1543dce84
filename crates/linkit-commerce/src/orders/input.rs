//! Client-submitted order payloads, validated before any aggregate is
//! built. Pricing fields are absent by construction; totals always come
//! from the pricing engine.

use crate::ids::{ProductId, UserId};
use crate::orders::custom::{CompanyInfo, OrderDetails};
use crate::orders::order::{CardDesign, DeliveryInfo, OrderAddon, PaymentMethod, PersonalInfo};
use serde::{Deserialize, Serialize};

/// Payload for creating a standard order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub product: ProductId,
    pub personal_info: PersonalInfo,
    pub card_design: CardDesign,
    pub delivery_info: DeliveryInfo,
    #[serde(default)]
    pub addons: Vec<OrderAddon>,
    #[serde(default)]
    pub addon_images: Vec<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub desposite_transaction_img: Option<String>,
    /// Set from the authenticated session, never from the body.
    #[serde(skip)]
    pub created_by: UserId,
}

/// Patch payload for editing a standard order before fulfilment.
///
/// Omitted sections keep their stored values. Pricing fields are absent
/// here too; the service recomputes totals after applying the patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub personal_info: Option<PersonalInfo>,
    pub card_design: Option<CardDesign>,
    pub delivery_info: Option<DeliveryInfo>,
}

/// Payload for creating a bulk custom order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOrderDraft {
    pub company_info: CompanyInfo,
    pub order_details: OrderDetails,
    /// Set from the authenticated session, never from the body.
    #[serde(skip)]
    pub created_by: UserId,
}
