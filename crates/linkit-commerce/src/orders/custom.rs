//! Bulk custom-order aggregate with a strict quote lifecycle.

use crate::config::PricingPolicy;
use crate::error::CommerceError;
use crate::ids::{CustomOrderId, PackageId, UserId};
use crate::money::Money;
use crate::orders::validation::{validate_custom_pricing, validate_customer_notes};
use crate::pricing::{resolve_pricing_tier, TierPricing};
use crate::softdelete::{impl_deletable, SoftDelete};
use serde::{Deserialize, Serialize};

/// Custom order status. Unlike standard orders, every change goes through
/// the transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomOrderStatus {
    /// Submitted, awaiting admin attention.
    #[default]
    Pending,
    /// Admin reviewing the request.
    Reviewing,
    /// Quote issued, awaiting customer response.
    Quoted,
    /// Customer accepted the quote.
    Approved,
    /// Cards in production.
    InProduction,
    /// Order completed.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl CustomOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomOrderStatus::Pending => "pending",
            CustomOrderStatus::Reviewing => "reviewing",
            CustomOrderStatus::Quoted => "quoted",
            CustomOrderStatus::Approved => "approved",
            CustomOrderStatus::InProduction => "in_production",
            CustomOrderStatus::Completed => "completed",
            CustomOrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status string; None for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(CustomOrderStatus::Pending),
            "reviewing" => Some(CustomOrderStatus::Reviewing),
            "quoted" => Some(CustomOrderStatus::Quoted),
            "approved" => Some(CustomOrderStatus::Approved),
            "in_production" => Some(CustomOrderStatus::InProduction),
            "completed" => Some(CustomOrderStatus::Completed),
            "cancelled" => Some(CustomOrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Statuses reachable from this one. Terminal statuses allow none.
    pub fn allowed_transitions(&self) -> &'static [CustomOrderStatus] {
        match self {
            CustomOrderStatus::Pending => {
                &[CustomOrderStatus::Reviewing, CustomOrderStatus::Cancelled]
            }
            CustomOrderStatus::Reviewing => {
                &[CustomOrderStatus::Quoted, CustomOrderStatus::Cancelled]
            }
            CustomOrderStatus::Quoted => {
                &[CustomOrderStatus::Approved, CustomOrderStatus::Cancelled]
            }
            CustomOrderStatus::Approved => {
                &[CustomOrderStatus::InProduction, CustomOrderStatus::Cancelled]
            }
            CustomOrderStatus::InProduction => {
                &[CustomOrderStatus::Completed, CustomOrderStatus::Cancelled]
            }
            CustomOrderStatus::Completed | CustomOrderStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: CustomOrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Human-facing label, badge color and description for dashboards.
    pub fn display_info(&self) -> StatusDisplay {
        match self {
            CustomOrderStatus::Pending => StatusDisplay {
                label: "Pending Review",
                color: "yellow",
                description: "Your order is waiting for our team to review",
            },
            CustomOrderStatus::Reviewing => StatusDisplay {
                label: "Under Review",
                color: "blue",
                description: "Our team is reviewing your requirements",
            },
            CustomOrderStatus::Quoted => StatusDisplay {
                label: "Quote Ready",
                color: "purple",
                description: "We have prepared a quote for your order",
            },
            CustomOrderStatus::Approved => StatusDisplay {
                label: "Approved",
                color: "green",
                description: "Quote approved, preparing for production",
            },
            CustomOrderStatus::InProduction => StatusDisplay {
                label: "In Production",
                color: "orange",
                description: "Your cards are being produced",
            },
            CustomOrderStatus::Completed => StatusDisplay {
                label: "Completed",
                color: "green",
                description: "Your order has been completed",
            },
            CustomOrderStatus::Cancelled => StatusDisplay {
                label: "Cancelled",
                color: "red",
                description: "This order has been cancelled",
            },
        }
    }
}

/// Presentation metadata for a custom-order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

/// Requesting company details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub business_email: Option<String>,
}

/// What the company is ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    /// Number of cards requested, one per employee.
    pub employee_count: i64,
    /// Free-text requirements from the customer.
    pub message: Option<String>,
}

/// Admin-set quote pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomPricing {
    pub price_per_card: Money,
    /// Always price_per_card times employee count.
    pub total_price: Money,
    /// True for admin-quoted pricing, false when derived from a package.
    pub is_custom: bool,
}

/// Customer's recorded answer to a quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub approved: bool,
    pub response_date: i64,
    pub customer_notes: Option<String>,
}

/// A bulk custom NFC-card order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomOrder {
    pub id: CustomOrderId,
    pub company_info: CompanyInfo,
    pub order_details: OrderDetails,
    pub status: CustomOrderStatus,
    /// Package matched to the quantity, when package pricing applies.
    pub selected_package: Option<PackageId>,
    /// Admin quote, when custom pricing applies.
    pub custom_pricing: Option<CustomPricing>,
    /// Estimated delivery in days, stamped when the order is quoted.
    pub estimated_delivery: Option<i64>,
    /// Stamped once on first entry into `quoted`.
    pub quoted_at: Option<i64>,
    /// Stamped once on first entry into `approved`.
    pub approved_at: Option<i64>,
    /// Stamped once on first entry into `completed`.
    pub completed_at: Option<i64>,
    /// Internal admin notes, never shown to the customer.
    pub admin_notes: Option<String>,
    pub customer_response: Option<CustomerResponse>,
    /// Customer who submitted the request.
    pub created_by: UserId,
    /// Admin currently handling the order.
    pub handled_by: Option<UserId>,
    /// Optimistic-concurrency version, bumped by the store on write.
    #[serde(default)]
    pub version: u64,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(flatten)]
    pub soft_delete: SoftDelete,
}

impl CustomOrder {
    /// Create a new custom order from validated draft parts.
    pub fn new(draft: super::input::CustomOrderDraft) -> Self {
        let now = current_timestamp();
        Self {
            id: CustomOrderId::generate(),
            company_info: draft.company_info,
            order_details: draft.order_details,
            status: CustomOrderStatus::Pending,
            selected_package: None,
            custom_pricing: None,
            estimated_delivery: None,
            quoted_at: None,
            approved_at: None,
            completed_at: None,
            admin_notes: None,
            customer_response: None,
            created_by: draft.created_by,
            handled_by: None,
            version: 0,
            created_at: now,
            updated_at: now,
            soft_delete: SoftDelete::default(),
        }
    }

    /// Move to a new status, enforcing the transition graph and stamping
    /// milestone dates exactly once.
    pub fn transition(&mut self, next: CustomOrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(next) {
            let allowed = self
                .status
                .allowed_transitions()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CommerceError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
                allowed: if allowed.is_empty() {
                    "none".to_string()
                } else {
                    allowed
                },
            });
        }

        self.status = next;
        let now = current_timestamp();
        match next {
            CustomOrderStatus::Quoted => {
                self.quoted_at.get_or_insert(now);
            }
            CustomOrderStatus::Approved => {
                self.approved_at.get_or_insert(now);
            }
            CustomOrderStatus::Completed => {
                self.completed_at.get_or_insert(now);
            }
            _ => {}
        }
        self.updated_at = now;
        Ok(())
    }

    /// Set an admin quote for a custom-pricing tier.
    ///
    /// Fixed-pricing tiers (50-99 cards) are rejected; those orders get a
    /// package assigned instead. On success the order auto-advances
    /// through `reviewing` to `quoted`.
    pub fn set_custom_pricing(
        &mut self,
        price_per_card: Money,
        policy: &PricingPolicy,
    ) -> Result<(), CommerceError> {
        self.check_quotable()?;
        let quantity = self.order_details.employee_count;
        if let Some(tier) = resolve_pricing_tier(quantity, policy) {
            if matches!(tier.pricing, TierPricing::Fixed { .. }) {
                return Err(CommerceError::Validation(
                    "This quantity tier uses fixed package pricing, not custom pricing"
                        .to_string(),
                ));
            }
        }
        if let Some(reason) = validate_custom_pricing(price_per_card, quantity, policy) {
            return Err(CommerceError::Validation(reason));
        }

        let total_price = price_per_card
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.custom_pricing = Some(CustomPricing {
            price_per_card,
            total_price,
            is_custom: true,
        });
        self.selected_package = None;
        self.estimated_delivery = Some(crate::pricing::estimate_custom_delivery(
            quantity,
            crate::pricing::Urgency::Standard,
            policy,
        ));
        self.advance_to_quoted()?;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Attach a fixed-pricing package whose quantity range covers the
    /// order. Auto-advances through `reviewing` to `quoted`.
    pub fn assign_package(&mut self, package: &crate::catalog::Package) -> Result<(), CommerceError> {
        self.check_quotable()?;
        let quantity = self.order_details.employee_count;
        if !package.is_active || !package.quantity_range.contains(quantity) {
            return Err(CommerceError::Validation(
                "Order quantity does not fit this package range".to_string(),
            ));
        }

        let total_price = package
            .pricing
            .price_per_card
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.custom_pricing = Some(CustomPricing {
            price_per_card: package.pricing.price_per_card,
            total_price,
            is_custom: false,
        });
        self.selected_package = Some(package.id.clone());
        self.estimated_delivery = Some(package.estimated_days);
        self.advance_to_quoted()?;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Record the customer's answer to a quote. Only valid while quoted;
    /// an approval also moves the order to `approved`.
    pub fn respond_to_quote(
        &mut self,
        approved: bool,
        customer_notes: Option<String>,
    ) -> Result<(), CommerceError> {
        if self.status != CustomOrderStatus::Quoted {
            return Err(CommerceError::Validation(
                "You can only respond to quoted custom orders".to_string(),
            ));
        }
        if let Some(notes) = &customer_notes {
            if let Some(reason) = validate_customer_notes(notes) {
                return Err(CommerceError::Validation(reason));
            }
        }

        self.customer_response = Some(CustomerResponse {
            approved,
            response_date: current_timestamp(),
            customer_notes,
        });
        if approved {
            self.transition(CustomOrderStatus::Approved)?;
        } else {
            self.updated_at = current_timestamp();
        }
        Ok(())
    }

    /// Pricing may only be set or replaced before the customer responds.
    /// Checked before any field is written, so a rejected quote never
    /// leaves a half-applied aggregate behind.
    fn check_quotable(&self) -> Result<(), CommerceError> {
        match self.status {
            CustomOrderStatus::Pending
            | CustomOrderStatus::Reviewing
            | CustomOrderStatus::Quoted => Ok(()),
            _ => Err(CommerceError::Validation(
                "Pricing can only be set before the customer responds".to_string(),
            )),
        }
    }

    /// Walk pending/reviewing forward to quoted. Re-quoting while already
    /// quoted is allowed (the quote is simply replaced).
    fn advance_to_quoted(&mut self) -> Result<(), CommerceError> {
        if self.status == CustomOrderStatus::Pending {
            self.transition(CustomOrderStatus::Reviewing)?;
        }
        if self.status == CustomOrderStatus::Reviewing {
            self.transition(CustomOrderStatus::Quoted)?;
        }
        Ok(())
    }
}

impl_deletable!(CustomOrder);

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
