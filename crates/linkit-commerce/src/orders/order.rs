//! Standard NFC-card order aggregate and its status lifecycle.

use crate::catalog::{City, Country};
use crate::ids::{AddonId, CityId, CountryId, OrderId, ProductId, UserId};
use crate::money::Money;
use crate::pricing::OrderPricing;
use crate::softdelete::{impl_deletable, SoftDelete};
use serde::{Deserialize, Serialize};

/// Standard order status.
///
/// Membership is validated but no transition graph is enforced: admins may
/// move a manufacturing order between any known statuses to correct
/// mistakes. Timestamp stamping still happens exactly once per milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed.
    Confirmed,
    /// Order being prepared.
    Processing,
    /// Cards printed.
    Printed,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
    /// Order refunded.
    Refunded,
}

impl OrderStatus {
    /// All known statuses, for membership errors.
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Printed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Printed => "printed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Parse a status string; None for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "processing" => Some(OrderStatus::Processing),
            "printed" => Some(OrderStatus::Printed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }

    /// Check if the order has reached an end state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
        }
    }
}

/// Customer contact details printed on / linked from the card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub organization: String,
    /// One or more contact numbers; the first doubles as the default
    /// delivery phone.
    pub phone_numbers: Vec<String>,
    pub email: String,
    pub business_email: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
}

impl PersonalInfo {
    /// Customer full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Physical card design choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardDesign {
    pub name_on_card: String,
    pub color: String,
    pub color_name: String,
    /// Whether the company logo is printed on the card (surcharged).
    #[serde(default)]
    pub include_printed_logo: bool,
    /// Uploaded logo file path; required while `include_printed_logo`.
    pub company_logo: Option<String>,
}

/// Where and how the order ships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub country: CountryId,
    pub city: CityId,
    pub address_line1: String,
    pub address_line2: Option<String>,
    /// Reuse the customer's own phone/email for delivery contact.
    /// While set, both fields below are overwritten on every save.
    #[serde(default = "default_true")]
    pub use_same_contact: bool,
    pub delivery_phone: String,
    pub delivery_email: String,
    pub postcode: Option<String>,
}

fn default_true() -> bool {
    true
}

/// An addon attached to an order, with the customer-supplied value
/// (free text, a selection, or an uploaded-image path per the addon's
/// input type).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddon {
    pub addon: AddonId,
    pub addon_value: Option<String>,
}

/// A standard NFC-card order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Ordered product.
    pub product: ProductId,
    pub personal_info: PersonalInfo,
    pub card_design: CardDesign,
    pub addons: Vec<OrderAddon>,
    /// Uploaded addon image paths.
    pub addon_images: Vec<String>,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
    /// Deposit transaction image path for online payments. The field
    /// spelling is the storefront's wire contract.
    pub desposite_transaction_img: Option<String>,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Product base price at order time.
    pub product_price: Money,
    /// Applied logo surcharge at order time.
    pub logo_surcharge: Money,
    /// Engine-computed total; never client-supplied.
    pub total: Money,
    /// Engine-computed final total; never client-supplied.
    pub final_total: Money,
    /// Estimated delivery, stamped once at creation.
    pub estimated_delivery: Option<i64>,
    /// Stamped once on first entry into `printed`.
    pub printing_date: Option<i64>,
    /// Stamped once on first entry into `shipped`.
    pub shipping_date: Option<i64>,
    /// Stamped once on first entry into `delivered`.
    pub delivery_date: Option<i64>,
    /// Internal admin notes, never shown to the customer.
    pub admin_notes: Option<String>,
    /// Customer who submitted the order.
    pub created_by: UserId,
    /// Optimistic-concurrency version, bumped by the store on write.
    #[serde(default)]
    pub version: u64,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Soft-delete state.
    #[serde(flatten)]
    pub soft_delete: SoftDelete,
}

impl Order {
    /// Assemble a new order from validated draft parts and an
    /// engine-computed pricing breakdown.
    pub fn new(
        draft: super::input::OrderDraft,
        product_price: Money,
        pricing: OrderPricing,
    ) -> Self {
        let now = current_timestamp();
        let mut order = Self {
            id: OrderId::generate(),
            product: draft.product,
            personal_info: draft.personal_info,
            card_design: draft.card_design,
            addons: draft.addons,
            addon_images: draft.addon_images,
            delivery_info: draft.delivery_info,
            payment_method: draft.payment_method,
            desposite_transaction_img: draft.desposite_transaction_img,
            status: OrderStatus::Pending,
            product_price,
            logo_surcharge: pricing.logo_surcharge,
            total: pricing.total,
            final_total: pricing.final_total,
            estimated_delivery: None,
            printing_date: None,
            shipping_date: None,
            delivery_date: None,
            admin_notes: None,
            created_by: draft.created_by,
            version: 0,
            created_at: now,
            updated_at: now,
            soft_delete: SoftDelete::default(),
        };
        order.apply_contact_defaults();
        order
    }

    /// Update the status, stamping milestone dates exactly once.
    ///
    /// Re-entering `printed`/`shipped`/`delivered` leaves the already-set
    /// timestamp untouched.
    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;

        let now = current_timestamp();
        match new_status {
            OrderStatus::Printed => {
                self.printing_date.get_or_insert(now);
            }
            OrderStatus::Shipped => {
                self.shipping_date.get_or_insert(now);
            }
            OrderStatus::Delivered => {
                self.delivery_date.get_or_insert(now);
            }
            _ => {}
        }
        self.updated_at = now;
    }

    /// Bump the update timestamp after an external edit.
    pub fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }

    /// Overwrite delivery phone/email from the customer's own contact
    /// while the reuse flag holds. Applied on every save.
    pub fn apply_contact_defaults(&mut self) {
        if self.delivery_info.use_same_contact {
            self.delivery_info.delivery_phone = self
                .personal_info
                .phone_numbers
                .first()
                .cloned()
                .unwrap_or_default();
            self.delivery_info.delivery_email = self.personal_info.email.clone();
        }
    }

    /// Stamp the delivery estimate, once, at creation time.
    pub fn estimate_delivery(&mut self, days: i64) {
        if self.estimated_delivery.is_none() {
            self.estimated_delivery = Some(current_timestamp() + days * 24 * 60 * 60);
        }
    }

    /// Formatted total, e.g. "114.000 JOD".
    pub fn formatted_total(&self) -> String {
        self.total.display_with_code()
    }

    /// Formatted delivery address using the resolved city/country names.
    pub fn delivery_address(&self, city: Option<&City>, country: Option<&Country>) -> String {
        let mut parts = vec![self.delivery_info.address_line1.clone()];
        if let Some(line2) = &self.delivery_info.address_line2 {
            parts.push(line2.clone());
        }
        if let Some(city) = city {
            parts.push(city.name.clone());
        }
        if let Some(country) = country {
            parts.push(country.name.clone());
        }
        parts.join(", ")
    }

    /// Read-only confirmation projection; never persisted.
    pub fn summary(&self, city: Option<&City>, country: Option<&Country>) -> OrderSummary {
        OrderSummary {
            id: self.id.clone(),
            customer_name: self.personal_info.full_name(),
            card_color: self.card_design.color.clone(),
            include_logo: self.card_design.include_printed_logo,
            total: self.formatted_total(),
            delivery_address: self.delivery_address(city, country),
            estimated_delivery: self.estimated_delivery,
            status: self.status,
        }
    }
}

impl_deletable!(Order);

/// Derived order confirmation view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer_name: String,
    pub card_color: String,
    pub include_logo: bool,
    pub total: String,
    pub delivery_address: String,
    pub estimated_delivery: Option<i64>,
    pub status: OrderStatus,
}

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
    use crate::orders::input::OrderDraft;
    use crate::pricing::compute_order_total;

    fn jod(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::JOD)
    }

    fn sample_order() -> Order {
        let draft = OrderDraft {
            product: ProductId::new("prod-1"),
            personal_info: PersonalInfo {
                first_name: "Lina".into(),
                last_name: "Haddad".into(),
                position: "CTO".into(),
                organization: "Acme".into(),
                phone_numbers: vec!["+962 7 9000 0000".into()],
                email: "lina@acme.example".into(),
                business_email: None,
                linkedin_url: None,
                instagram_url: None,
            },
            card_design: CardDesign {
                name_on_card: "Lina Haddad".into(),
                color: "black".into(),
                color_name: "Matte Black".into(),
                include_printed_logo: false,
                company_logo: None,
            },
            addons: vec![],
            addon_images: vec![],
            delivery_info: DeliveryInfo {
                country: CountryId::new("country-jo"),
                city: CityId::new("city-amman"),
                address_line1: "12 Rainbow St".into(),
                address_line2: None,
                use_same_contact: true,
                delivery_phone: String::new(),
                delivery_email: String::new(),
                postcode: None,
            },
            payment_method: PaymentMethod::Cash,
            desposite_transaction_img: None,
            created_by: UserId::new("user-1"),
        };
        let pricing = compute_order_total(jod(100.0), false, jod(5.0), jod(3.0), &[]).unwrap();
        Order::new(draft, jod(100.0), pricing)
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("printed"), Some(OrderStatus::Printed));
        assert_eq!(OrderStatus::parse("SHIPPED"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("lost"), None);
    }

    #[test]
    fn test_contact_defaults_applied_on_creation() {
        let order = sample_order();
        assert_eq!(order.delivery_info.delivery_phone, "+962 7 9000 0000");
        assert_eq!(order.delivery_info.delivery_email, "lina@acme.example");
    }

    #[test]
    fn test_printed_stamp_is_idempotent() {
        let mut order = sample_order();
        assert!(order.printing_date.is_none());

        order.update_status(OrderStatus::Printed);
        let first = order.printing_date;
        assert!(first.is_some());

        // Leaving and re-entering the status must not move the stamp.
        order.update_status(OrderStatus::Processing);
        order.update_status(OrderStatus::Printed);
        assert_eq!(order.printing_date, first);
    }

    #[test]
    fn test_all_milestones_stamped() {
        let mut order = sample_order();
        order.update_status(OrderStatus::Printed);
        order.update_status(OrderStatus::Shipped);
        order.update_status(OrderStatus::Delivered);

        assert!(order.printing_date.is_some());
        assert!(order.shipping_date.is_some());
        assert!(order.delivery_date.is_some());
    }

    #[test]
    fn test_any_known_status_reachable() {
        // Standard orders deliberately have no enforced transition graph.
        let mut order = sample_order();
        order.update_status(OrderStatus::Delivered);
        order.update_status(OrderStatus::Pending);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_delivery_estimate_stamped_once() {
        let mut order = sample_order();
        order.estimate_delivery(3);
        let first = order.estimated_delivery;
        order.estimate_delivery(5);
        assert_eq!(order.estimated_delivery, first);
    }

    #[test]
    fn test_summary_projection() {
        let order = sample_order();
        let summary = order.summary(None, None);
        assert_eq!(summary.customer_name, "Lina Haddad");
        assert_eq!(summary.total, "103.000 JOD");
        assert_eq!(summary.status, OrderStatus::Pending);
        assert!(summary.delivery_address.starts_with("12 Rainbow St"));
    }

    #[test]
    fn test_wire_field_names() {
        let order = sample_order();
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("finalTotal").is_some());
        assert!(json.get("personalInfo").is_some());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["paymentMethod"], "cash");
        assert_eq!(json["isDeleted"], false);
    }
}
