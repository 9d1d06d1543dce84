//! Catalog lookup seam.

use crate::catalog::{Addon, City, Country, Package, Product};
use crate::error::CommerceError;
use crate::ids::{AddonId, CityId, CountryId, PackageId, ProductId};

/// Read-only catalog access the order services depend on.
///
/// All reads exclude soft-deleted records. Implementations own the I/O;
/// `Err` means an infrastructure fault, `Ok(None)` means the record does
/// not resolve to a live row.
pub trait Catalog {
    /// Find a live product by id.
    fn find_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError>;

    /// Find a live city by id.
    fn find_city(&self, id: &CityId) -> Result<Option<City>, CommerceError>;

    /// Find a live country by id.
    fn find_country(&self, id: &CountryId) -> Result<Option<Country>, CommerceError>;

    /// Find a live addon by id.
    fn find_addon(&self, id: &AddonId) -> Result<Option<Addon>, CommerceError>;

    /// Find a live package by id.
    fn find_package(&self, id: &PackageId) -> Result<Option<Package>, CommerceError>;

    /// Find the active package whose quantity range contains `quantity`.
    fn find_package_by_quantity(&self, quantity: i64) -> Result<Option<Package>, CommerceError>;
}
