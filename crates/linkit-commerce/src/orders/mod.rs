//! Order aggregates: standard card orders and bulk custom-quote orders.

mod custom;
mod input;
mod order;
pub mod validation;

pub use custom::{
    CompanyInfo, CustomOrder, CustomOrderStatus, CustomPricing, CustomerResponse, OrderDetails,
    StatusDisplay,
};
pub use input::{CustomOrderDraft, OrderDraft, OrderUpdate};
pub use order::{
    CardDesign, DeliveryInfo, Order, OrderAddon, OrderStatus, OrderSummary, PaymentMethod,
    PersonalInfo,
};
