//! NFC-card commerce domain types and logic for LinkIt.
//!
//! This crate provides the business core of a custom NFC-card ordering
//! backend:
//!
//! - **Catalog**: Products, addons, delivery geography, quantity packages
//! - **Pricing**: Order total computation and quantity-tier resolution
//! - **Orders**: Standard card orders and bulk custom-quote orders, each
//!   with its own status lifecycle
//! - **Validation**: Pure business-rule predicates applied before mutation
//!
//! Everything here is pure and synchronous: catalog records are fetched by
//! the caller (see the [`catalog::Catalog`] and [`repo`] traits) before the
//! engine functions run, so the core never performs I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use linkit_commerce::prelude::*;
//!
//! let policy = PricingPolicy::default();
//! let pricing = compute_order_total(
//!     Money::from_decimal(100.0, Currency::JOD),
//!     true,
//!     policy.logo_surcharge(),
//!     Money::from_decimal(3.0, Currency::JOD),
//!     &addons,
//! )?;
//! assert_eq!(pricing.total, pricing.final_total);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod softdelete;

pub mod catalog;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod repo;

pub use config::PricingPolicy;
pub use error::{CommerceError, ErrorKind};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::auth::{Actor, Role};
    pub use crate::config::PricingPolicy;
    pub use crate::error::{CommerceError, ErrorKind};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::softdelete::Deletable;

    // Catalog
    pub use crate::catalog::{
        Addon, AddonInput, CardDesignOption, Catalog, City, Country, Package, PackagePricing,
        PackageType, Product, QuantityRange,
    };

    // Pricing
    pub use crate::pricing::{
        compute_order_total, estimate_custom_delivery, resolve_pricing_tier, OrderPricing,
        PricingTier, TierInfo, TierPricing, Urgency,
    };

    // Orders
    pub use crate::orders::{
        CardDesign, CompanyInfo, CustomOrder, CustomOrderDraft, CustomOrderStatus,
        CustomPricing, CustomerResponse, DeliveryInfo, Order, OrderAddon, OrderDetails,
        OrderDraft, OrderStatus, OrderSummary, OrderUpdate, PaymentMethod, PersonalInfo,
    };

    // Persistence seams
    pub use crate::repo::{CustomOrderStore, OrderStore};

    // Notification
    pub use crate::notify::{quote_email, QuoteEmail};
}
