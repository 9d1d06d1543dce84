//! Field-level validation for order payloads.
//!
//! Each check returns `Some(message)` with a customer-facing reason, or
//! `None` when the input is acceptable. Callers wrap the message in
//! [`CommerceError::Validation`](crate::error::CommerceError).

use crate::config::PricingPolicy;
use crate::money::Money;
use crate::orders::input::{CustomOrderDraft, OrderDraft};
use crate::orders::order::CardDesign;

/// Longest accepted first or last name.
pub const MAX_NAME_LEN: usize = 50;
/// Longest accepted position, organization, or name-on-card.
pub const MAX_TITLE_LEN: usize = 100;
/// Longest accepted address line.
pub const MAX_ADDRESS_LEN: usize = 200;
/// Longest accepted company name.
pub const MAX_COMPANY_NAME_LEN: usize = 100;
/// Longest accepted contact-person name.
pub const MAX_CONTACT_PERSON_LEN: usize = 50;
/// Longest accepted customer requirements message.
pub const MAX_MESSAGE_LEN: usize = 1000;
/// Longest accepted internal admin notes.
pub const MAX_ADMIN_NOTES_LEN: usize = 2000;
/// Longest accepted customer quote-response notes.
pub const MAX_CUSTOMER_NOTES_LEN: usize = 1000;
/// Smallest custom-order quantity.
pub const MIN_EMPLOYEE_COUNT: i64 = 10;
/// Largest custom-order quantity.
pub const MAX_EMPLOYEE_COUNT: i64 = 10_000;

/// Minimal structural email check: one '@' with characters around it and
/// a dot in the domain part.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// Phone numbers accept digits, spaces, dashes, parentheses, and one
/// optional leading '+'. At least one digit is required.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    if phone.is_empty() {
        return false;
    }
    let mut chars = phone.chars();
    let rest: &str = if phone.starts_with('+') {
        chars.next();
        chars.as_str()
    } else {
        phone
    };
    rest.chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-' || c == '(' || c == ')')
        && rest.chars().any(|c| c.is_ascii_digit())
}

/// Check the required fields of a standard-order payload.
pub fn validate_required_fields(draft: &OrderDraft) -> Option<String> {
    let info = &draft.personal_info;
    if info.first_name.trim().is_empty() || info.last_name.trim().is_empty() {
        return Some("First name and last name are required".to_string());
    }
    if info.first_name.trim().len() > MAX_NAME_LEN || info.last_name.trim().len() > MAX_NAME_LEN {
        return Some("Name is too long".to_string());
    }
    if info.position.trim().len() > MAX_TITLE_LEN || info.organization.trim().len() > MAX_TITLE_LEN
    {
        return Some("Position or organization is too long".to_string());
    }
    if !is_valid_email(&info.email) {
        return Some("Please provide a valid email address".to_string());
    }
    if info.phone_numbers.is_empty() {
        return Some("At least one phone number is required".to_string());
    }
    if let Some(bad) = info.phone_numbers.iter().find(|p| !is_valid_phone(p)) {
        return Some(format!("Invalid phone number: {}", bad.trim()));
    }
    if draft.card_design.name_on_card.trim().is_empty() {
        return Some("Name on card is required".to_string());
    }
    if draft.card_design.name_on_card.trim().len() > MAX_TITLE_LEN {
        return Some("Name on card is too long".to_string());
    }
    if draft.delivery_info.address_line1.trim().is_empty() {
        return Some("Delivery address is required".to_string());
    }
    if draft.delivery_info.address_line1.len() > MAX_ADDRESS_LEN
        || draft
            .delivery_info
            .address_line2
            .as_ref()
            .is_some_and(|l| l.len() > MAX_ADDRESS_LEN)
    {
        return Some("Address line is too long".to_string());
    }
    if !draft.delivery_info.use_same_contact {
        if !is_valid_phone(&draft.delivery_info.delivery_phone) {
            return Some("Please provide a valid delivery phone number".to_string());
        }
        if !is_valid_email(&draft.delivery_info.delivery_email) {
            return Some("Please provide a valid delivery email address".to_string());
        }
    }
    validate_company_logo(&draft.card_design, None)
}

/// A printed logo requires a logo file, either on this payload or one
/// already stored on the order being updated.
pub fn validate_company_logo(design: &CardDesign, existing_logo: Option<&str>) -> Option<String> {
    if design.include_printed_logo
        && design.company_logo.as_deref().map_or(true, str::is_empty)
        && existing_logo.map_or(true, str::is_empty)
    {
        return Some("Company logo is required when printed logo is selected".to_string());
    }
    None
}

/// Check the required fields of a custom-order payload.
pub fn validate_custom_order_fields(draft: &CustomOrderDraft) -> Option<String> {
    let company = &draft.company_info;
    if company.company_name.trim().is_empty() {
        return Some("Company name is required".to_string());
    }
    if company.company_name.trim().len() > MAX_COMPANY_NAME_LEN {
        return Some("Company name is too long".to_string());
    }
    if company.contact_person.trim().is_empty() {
        return Some("Contact person is required".to_string());
    }
    if company.contact_person.trim().len() > MAX_CONTACT_PERSON_LEN {
        return Some("Contact person name is too long".to_string());
    }
    if !is_valid_email(&company.email) {
        return Some("Please provide a valid email address".to_string());
    }
    if let Some(business_email) = &company.business_email {
        if !business_email.trim().is_empty() && !is_valid_email(business_email) {
            return Some("Please provide a valid business email address".to_string());
        }
    }
    if !is_valid_phone(&company.phone) {
        return Some("Please provide a valid phone number".to_string());
    }

    let count = draft.order_details.employee_count;
    if count < MIN_EMPLOYEE_COUNT {
        return Some(format!("Minimum order quantity is {MIN_EMPLOYEE_COUNT} cards"));
    }
    if count > MAX_EMPLOYEE_COUNT {
        return Some("Maximum order quantity is 10,000 cards".to_string());
    }
    if let Some(message) = &draft.order_details.message {
        if message.len() > MAX_MESSAGE_LEN {
            return Some(format!(
                "Message must be at most {MAX_MESSAGE_LEN} characters"
            ));
        }
    }
    None
}

/// Bounds-check an admin quote before it is applied.
pub fn validate_custom_pricing(
    price_per_card: Money,
    employee_count: i64,
    policy: &PricingPolicy,
) -> Option<String> {
    if !price_per_card.is_positive() {
        return Some("Price per card must be a positive number".to_string());
    }
    if price_per_card.amount_cents > policy.max_price_per_card().amount_cents {
        return Some("Price per card seems too high. Please verify.".to_string());
    }
    match price_per_card.try_multiply(employee_count) {
        Some(total) if total.amount_cents <= policy.max_total_price().amount_cents => None,
        _ => Some("Total price exceeds maximum allowed amount".to_string()),
    }
}

/// Length-check internal admin notes.
pub fn validate_admin_notes(notes: &str) -> Option<String> {
    if notes.len() > MAX_ADMIN_NOTES_LEN {
        return Some(format!(
            "Admin notes must be at most {MAX_ADMIN_NOTES_LEN} characters"
        ));
    }
    None
}

/// Length-check customer quote-response notes.
pub fn validate_customer_notes(notes: &str) -> Option<String> {
    if notes.len() > MAX_CUSTOMER_NOTES_LEN {
        return Some(format!(
            "Notes must be at most {MAX_CUSTOMER_NOTES_LEN} characters"
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CityId, CountryId, ProductId, UserId};
    use crate::money::Currency;
    use crate::orders::custom::{CompanyInfo, OrderDetails};
    use crate::orders::order::{DeliveryInfo, PaymentMethod, PersonalInfo};

    fn jod(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::JOD)
    }

    fn sample_draft(employee_count: i64) -> CustomOrderDraft {
        CustomOrderDraft {
            company_info: CompanyInfo {
                company_name: "Acme Corp".into(),
                contact_person: "Omar Khalil".into(),
                email: "omar@acme.example".into(),
                phone: "+962 6 555 0100".into(),
                business_email: None,
            },
            order_details: OrderDetails {
                employee_count,
                message: None,
            },
            created_by: UserId::new("user-7"),
        }
    }

    fn order_draft() -> OrderDraft {
        OrderDraft {
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
            addons: vec![],
            addon_images: vec![],
            payment_method: PaymentMethod::Cash,
            desposite_transaction_img: None,
            created_by: UserId::new("user-1"),
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  omar@acme.example "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@acme.example"));
        assert!(!is_valid_email("a b@acme.example"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+962 6 555 0100"));
        assert!(is_valid_phone("(06) 555-0100"));
        assert!(is_valid_phone("0790000000"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("call me"));
    }

    #[test]
    fn test_order_draft_passes_and_caps_apply() {
        assert!(validate_required_fields(&order_draft()).is_none());

        let mut long_name = order_draft();
        long_name.personal_info.first_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_fields(&long_name).is_some());

        let mut long_address = order_draft();
        long_address.delivery_info.address_line1 = "x".repeat(MAX_ADDRESS_LEN + 1);
        assert!(validate_required_fields(&long_address).is_some());

        let mut separate_contact = order_draft();
        separate_contact.delivery_info.use_same_contact = false;
        assert!(validate_required_fields(&separate_contact).is_some());
        separate_contact.delivery_info.delivery_phone = "0790000000".into();
        separate_contact.delivery_info.delivery_email = "ship@acme.example".into();
        assert!(validate_required_fields(&separate_contact).is_none());
    }

    #[test]
    fn test_employee_count_bounds() {
        assert!(validate_custom_order_fields(&sample_draft(9)).is_some());
        assert!(validate_custom_order_fields(&sample_draft(10)).is_none());
        assert!(validate_custom_order_fields(&sample_draft(10_000)).is_none());
        assert!(validate_custom_order_fields(&sample_draft(10_001)).is_some());
    }

    #[test]
    fn test_company_name_required() {
        let mut draft = sample_draft(50);
        draft.company_info.company_name = "  ".into();
        assert_eq!(
            validate_custom_order_fields(&draft).as_deref(),
            Some("Company name is required")
        );
    }

    #[test]
    fn test_message_length_cap() {
        let mut draft = sample_draft(50);
        draft.order_details.message = Some("x".repeat(MAX_MESSAGE_LEN + 1));
        assert!(validate_custom_order_fields(&draft).is_some());

        draft.order_details.message = Some("x".repeat(MAX_MESSAGE_LEN));
        assert!(validate_custom_order_fields(&draft).is_none());
    }

    #[test]
    fn test_logo_requires_upload() {
        let design = CardDesign {
            name_on_card: "Omar".into(),
            color: "black".into(),
            color_name: "Matte Black".into(),
            include_printed_logo: true,
            company_logo: None,
        };
        assert!(validate_company_logo(&design, None).is_some());
        assert!(validate_company_logo(&design, Some("/uploads/logo.png")).is_none());

        let mut with_logo = design.clone();
        with_logo.company_logo = Some("/uploads/logo.png".into());
        assert!(validate_company_logo(&with_logo, None).is_none());
    }

    #[test]
    fn test_custom_pricing_bounds() {
        let policy = PricingPolicy::default();
        assert!(validate_custom_pricing(jod(12.5), 100, &policy).is_none());
        assert!(validate_custom_pricing(jod(0.0), 100, &policy).is_some());
        assert!(validate_custom_pricing(jod(1000.5), 100, &policy).is_some());
        // 200 JOD x 10,000 cards blows past the total cap.
        assert!(validate_custom_pricing(jod(200.0), 10_000, &policy).is_some());
    }

    #[test]
    fn test_notes_length_caps() {
        assert!(validate_admin_notes(&"x".repeat(MAX_ADMIN_NOTES_LEN)).is_none());
        assert!(validate_admin_notes(&"x".repeat(MAX_ADMIN_NOTES_LEN + 1)).is_some());
        assert!(validate_customer_notes(&"x".repeat(MAX_CUSTOMER_NOTES_LEN + 1)).is_some());
    }
}
