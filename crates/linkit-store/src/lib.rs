//! Storage and application services for the LinkIt commerce core.
//!
//! Provides thread-safe in-memory implementations of the `linkit-commerce`
//! storage traits, plus the order services that tie validation, catalog
//! lookups, pricing and state transitions together. The in-memory stores
//! use optimistic concurrency: every write carries the version the caller
//! read, and stale writes fail with a retryable conflict.

pub mod memory;
pub mod service;

pub use memory::{MemoryCatalog, MemoryCustomOrders, MemoryOrders};
pub use service::{CustomOrderService, OrderService};
