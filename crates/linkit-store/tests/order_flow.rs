//! End-to-end flows through the order services backed by the in-memory
//! stores.

use linkit_commerce::prelude::*;
use linkit_store::{CustomOrderService, MemoryCatalog, MemoryCustomOrders, MemoryOrders, OrderService};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn jod(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::JOD)
}

struct Shop {
    catalog: MemoryCatalog,
    product: Product,
    country: Country,
    city: City,
}

fn seed_shop() -> Shop {
    let catalog = MemoryCatalog::new();

    let product = Product::new("NFC Card", jod(100.0), UserId::new("admin-1"));
    catalog.add_product(product.clone());

    let country = Country::new("Jordan", "JO");
    catalog.add_country(country.clone()).unwrap();

    let city = City::new("Amman", country.id.clone(), jod(3.0));
    catalog.add_city(city.clone()).unwrap();

    catalog
        .add_package(Package::new(
            "Standard",
            QuantityRange::new(50, 99),
            PackagePricing {
                price_per_card: jod(15.0),
                is_fixed_price: true,
            },
            PackageType::Standard,
        ))
        .unwrap();

    Shop {
        catalog,
        product,
        country,
        city,
    }
}

fn standard_draft(shop: &Shop) -> OrderDraft {
    OrderDraft {
        product: shop.product.id.clone(),
        personal_info: PersonalInfo {
            first_name: "Lina".into(),
            last_name: "Haddad".into(),
            position: "CTO".into(),
            organization: "Acme".into(),
            phone_numbers: vec!["+962 7 9000 0000".into()],
            email: "lina@acme.example".into(),
            business_email: None,
            linkedin_url: Some("https://linkedin.example/in/lina".into()),
            instagram_url: None,
        },
        card_design: CardDesign {
            name_on_card: "Lina Haddad".into(),
            color: "black".into(),
            color_name: "Matte Black".into(),
            include_printed_logo: true,
            company_logo: Some("/uploads/acme-logo.png".into()),
        },
        delivery_info: DeliveryInfo {
            country: shop.country.id.clone(),
            city: shop.city.id.clone(),
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

fn custom_draft(employee_count: i64) -> CustomOrderDraft {
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
            message: Some("Black cards with gold logo".into()),
        },
        created_by: UserId::new("user-7"),
    }
}

#[test]
fn standard_order_lifecycle() {
    init_tracing();
    let shop = seed_shop();
    let service = OrderService::new(
        shop.catalog.clone(),
        MemoryOrders::new(),
        PricingPolicy::default(),
    );
    let admin = Actor::admin(UserId::new("admin-1"));
    let owner = Actor::customer(UserId::new("user-1"));

    let order = service.place_order(standard_draft(&shop)).unwrap();
    // 100 product + 5 logo surcharge + 3 Amman delivery fee.
    assert_eq!(order.total, jod(108.0));
    assert_eq!(order.status, OrderStatus::Pending);

    let summary = service.order_summary(&owner, &order.id).unwrap();
    assert_eq!(summary.customer_name, "Lina Haddad");
    assert!(summary.delivery_address.contains("Amman"));
    assert!(summary.delivery_address.contains("Jordan"));

    // Walk it through fulfilment; each write carries the version it read.
    let mut current = order;
    for status in ["confirmed", "processing", "printed", "shipped", "delivered"] {
        current = service
            .update_status(&admin, &current.id, current.version, status, None)
            .unwrap();
    }

    assert_eq!(current.status, OrderStatus::Delivered);
    assert!(current.printing_date.is_some());
    assert!(current.shipping_date.is_some());
    assert!(current.delivery_date.is_some());
}

#[test]
fn custom_order_quote_to_completion() {
    init_tracing();
    let shop = seed_shop();
    let service = CustomOrderService::new(
        shop.catalog.clone(),
        MemoryCustomOrders::new(),
        PricingPolicy::default(),
    );
    let admin = Actor::admin(UserId::new("admin-1"));
    let owner = Actor::customer(UserId::new("user-7"));

    let order = service.submit(custom_draft(200)).unwrap();
    assert_eq!(order.status, CustomOrderStatus::Pending);

    // 200 cards lands in the enterprise tier, so the admin quotes by hand.
    let tier = service.tier_for(200).unwrap();
    assert!(!tier.pricing.is_fixed());

    let quoted = service
        .set_pricing(&admin, &order.id, order.version, jod(11.0))
        .unwrap();
    assert_eq!(quoted.status, CustomOrderStatus::Quoted);
    assert_eq!(quoted.custom_pricing.as_ref().unwrap().total_price, jod(2200.0));

    let email = service.quote_email(&admin, &order.id).unwrap();
    assert_eq!(email.to, "omar@acme.example");
    assert!(email.subject.contains("Acme Corp"));

    let approved = service
        .respond_to_quote(&owner, &order.id, quoted.version, true, Some("Go ahead".into()))
        .unwrap();
    assert_eq!(approved.status, CustomOrderStatus::Approved);
    assert!(approved.approved_at.is_some());

    let in_production = service
        .update_status(&admin, &order.id, approved.version, "in_production")
        .unwrap();
    let completed = service
        .update_status(&admin, &order.id, in_production.version, "completed")
        .unwrap();
    assert_eq!(completed.status, CustomOrderStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.handled_by, Some(admin.id.clone()));
}

#[test]
fn stale_writer_gets_conflict() {
    init_tracing();
    let shop = seed_shop();
    let service = CustomOrderService::new(
        shop.catalog.clone(),
        MemoryCustomOrders::new(),
        PricingPolicy::default(),
    );
    let admin = Actor::admin(UserId::new("admin-1"));

    let order = service.submit(custom_draft(200)).unwrap();

    // Two admins read version 0; only the first write lands.
    service
        .set_pricing(&admin, &order.id, order.version, jod(11.0))
        .unwrap();
    let err = service
        .update_status(&admin, &order.id, order.version, "cancelled")
        .unwrap_err();
    assert!(err.is_retryable());
}

#[test]
fn fixed_tier_goes_through_packages() {
    init_tracing();
    let shop = seed_shop();
    let service = CustomOrderService::new(
        shop.catalog.clone(),
        MemoryCustomOrders::new(),
        PricingPolicy::default(),
    );
    let admin = Actor::admin(UserId::new("admin-1"));

    let order = service.submit(custom_draft(60)).unwrap();
    let quoted = service
        .assign_package(&admin, &order.id, order.version)
        .unwrap();

    let pricing = quoted.custom_pricing.as_ref().unwrap();
    assert!(!pricing.is_custom);
    assert_eq!(pricing.price_per_card, jod(15.0));
    assert_eq!(pricing.total_price, jod(900.0));
    assert!(quoted.selected_package.is_some());

    // The rendered quote names the package.
    let email = service.quote_email(&admin, &order.id).unwrap();
    assert!(email.body.contains("Standard"));
}
