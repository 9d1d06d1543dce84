//! Storage traits for order aggregates.
//!
//! Backends implement these with optimistic concurrency: writes carry the
//! version the caller read, and a stale version fails with
//! [`CommerceError::VersionConflict`].

use crate::error::CommerceError;
use crate::ids::{CustomOrderId, OrderId, UserId};
use crate::orders::{CustomOrder, Order};

/// Storage for standard orders.
pub trait OrderStore {
    /// Fetch an order by id. Soft-deleted orders are still returned;
    /// callers filter with [`Deletable`](crate::softdelete::Deletable).
    fn get(&self, id: &OrderId) -> Result<Option<Order>, CommerceError>;

    /// List the orders a customer created, newest first.
    fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, CommerceError>;

    /// List every order, newest first.
    fn list_all(&self) -> Result<Vec<Order>, CommerceError>;

    /// Persist a brand-new order.
    fn insert(&self, order: Order) -> Result<(), CommerceError>;

    /// Apply a mutation to the stored order at `expected_version`, bumping
    /// the version on success. Fails with `VersionConflict` when the
    /// stored version has moved.
    fn update_with(
        &self,
        id: &OrderId,
        expected_version: u64,
        mutate: &mut dyn FnMut(&mut Order) -> Result<(), CommerceError>,
    ) -> Result<Order, CommerceError>;

    /// Permanently remove an order. Admin-only cleanup; normal deletion
    /// is the soft-delete flag.
    fn remove(&self, id: &OrderId) -> Result<(), CommerceError>;
}

/// Storage for custom orders.
pub trait CustomOrderStore {
    fn get(&self, id: &CustomOrderId) -> Result<Option<CustomOrder>, CommerceError>;

    /// List the custom orders a customer created, newest first.
    fn list_for_user(&self, user: &UserId) -> Result<Vec<CustomOrder>, CommerceError>;

    /// List every custom order, newest first.
    fn list_all(&self) -> Result<Vec<CustomOrder>, CommerceError>;

    fn insert(&self, order: CustomOrder) -> Result<(), CommerceError>;

    fn update_with(
        &self,
        id: &CustomOrderId,
        expected_version: u64,
        mutate: &mut dyn FnMut(&mut CustomOrder) -> Result<(), CommerceError>,
    ) -> Result<CustomOrder, CommerceError>;

    fn remove(&self, id: &CustomOrderId) -> Result<(), CommerceError>;
}
