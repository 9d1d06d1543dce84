//! Quote notification payloads.
//!
//! Rendering only; actual delivery is left to the hosting application's
//! mailer.

use crate::catalog::Package;
use crate::error::CommerceError;
use crate::orders::CustomOrder;

/// A rendered quote email, ready for a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Render the quote email for a custom order.
///
/// Requires pricing to already be set, either as an admin quote or via an
/// assigned package.
pub fn quote_email(
    order: &CustomOrder,
    package: Option<&Package>,
) -> Result<QuoteEmail, CommerceError> {
    let pricing = order.custom_pricing.as_ref().ok_or_else(|| {
        CommerceError::Validation("No pricing set for this custom order".to_string())
    })?;

    let company = &order.company_info;
    let quantity = order.order_details.employee_count;

    let mut body = format!(
        "Dear {},\n\n\
         Thank you for your interest in our NFC business cards.\n\
         Here is the quote for {}:\n\n\
         Quantity: {} cards\n\
         Price per card: {}\n\
         Total price: {}\n",
        company.contact_person,
        company.company_name,
        quantity,
        pricing.price_per_card.display_with_code(),
        pricing.total_price.display_with_code(),
    );
    if let Some(package) = package {
        body.push_str(&format!(
            "Package: {} ({} cards)\n",
            package.name,
            package.quantity_range.display()
        ));
        if package.free_delivery {
            body.push_str("Delivery: free\n");
        }
        body.push_str(&format!(
            "Estimated delivery: {} days\n",
            package.estimated_days
        ));
    } else if let Some(days) = order.estimated_delivery {
        body.push_str(&format!("Estimated delivery: {days} days\n"));
    }
    if let Some(message) = &order.order_details.message {
        body.push_str(&format!("\nYour requirements:\n{message}\n"));
    }
    body.push_str(
        "\nThis quote is valid for 30 days. Reply to this email or respond \
         from your dashboard to approve it.\n\nBest regards,\nThe LinkIt Team\n",
    );

    Ok(QuoteEmail {
        to: company.email.clone(),
        subject: format!("Custom NFC Cards Quote - {}", company.company_name),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingPolicy;
    use crate::ids::UserId;
    use crate::money::{Currency, Money};
    use crate::orders::{CompanyInfo, CustomOrder, CustomOrderDraft, OrderDetails};

    fn quoted_order() -> CustomOrder {
        let mut order = CustomOrder::new(CustomOrderDraft {
            company_info: CompanyInfo {
                company_name: "Acme Corp".into(),
                contact_person: "Omar Khalil".into(),
                email: "omar@acme.example".into(),
                phone: "+962 6 555 0100".into(),
                business_email: None,
            },
            order_details: OrderDetails {
                employee_count: 200,
                message: Some("Black cards with gold logo".into()),
            },
            created_by: UserId::new("user-7"),
        });
        order
            .set_custom_pricing(Money::from_decimal(12.5, Currency::JOD), &PricingPolicy::default())
            .unwrap();
        order
    }

    #[test]
    fn test_quote_email_fields() {
        let email = quote_email(&quoted_order(), None).unwrap();
        assert_eq!(email.to, "omar@acme.example");
        assert_eq!(email.subject, "Custom NFC Cards Quote - Acme Corp");
        assert!(email.body.contains("200 cards"));
        assert!(email.body.contains("12.500 JOD"));
        assert!(email.body.contains("2500.000 JOD"));
        assert!(email.body.contains("Black cards with gold logo"));
    }

    #[test]
    fn test_quote_email_requires_pricing() {
        let order = CustomOrder::new(CustomOrderDraft {
            company_info: CompanyInfo {
                company_name: "Acme Corp".into(),
                contact_person: "Omar Khalil".into(),
                email: "omar@acme.example".into(),
                phone: "+962 6 555 0100".into(),
                business_email: None,
            },
            order_details: OrderDetails {
                employee_count: 200,
                message: None,
            },
            created_by: UserId::new("user-7"),
        });
        assert!(quote_email(&order, None).is_err());
    }
}
