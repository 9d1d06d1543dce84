//! Thread-safe in-memory stores.
//!
//! Useful for tests and single-process deployments. Each store keeps its
//! aggregates in an `Arc<RwLock<HashMap>>`; order stores enforce
//! optimistic concurrency through the aggregate's `version` field.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use linkit_commerce::catalog::{city_name_available, Catalog};
use linkit_commerce::error::CommerceError;
use linkit_commerce::ids::{
    AddonId, CityId, CountryId, CustomOrderId, OrderId, PackageId, ProductId, UserId,
};
use linkit_commerce::catalog::{package_for_quantity, Addon, City, Country, Package, Product};
use linkit_commerce::orders::{CustomOrder, Order};
use linkit_commerce::repo::{CustomOrderStore, OrderStore};
use linkit_commerce::softdelete::Deletable;

/// In-memory catalog of products, addons, geography and packages.
///
/// Write methods run the domain validations (city-name uniqueness,
/// package-range overlap) so a memory-backed deployment enforces the same
/// rules a database-backed one would.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    addons: Arc<RwLock<HashMap<AddonId, Addon>>>,
    countries: Arc<RwLock<HashMap<CountryId, Country>>>,
    cities: Arc<RwLock<HashMap<CityId, City>>>,
    packages: Arc<RwLock<HashMap<PackageId, Package>>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&self, product: Product) {
        let mut products = self.products.write().expect("RwLock poisoned");
        products.insert(product.id.clone(), product);
    }

    pub fn add_addon(&self, addon: Addon) {
        let mut addons = self.addons.write().expect("RwLock poisoned");
        addons.insert(addon.id.clone(), addon);
    }

    /// Add a country after validating its code.
    pub fn add_country(&self, country: Country) -> Result<(), CommerceError> {
        if let Some(reason) = Country::validate_code(&country.code) {
            return Err(CommerceError::Validation(reason));
        }
        let mut countries = self.countries.write().expect("RwLock poisoned");
        countries.insert(country.id.clone(), country);
        Ok(())
    }

    /// Add a city, enforcing name uniqueness within its country.
    pub fn add_city(&self, city: City) -> Result<(), CommerceError> {
        let mut cities = self.cities.write().expect("RwLock poisoned");
        let existing: Vec<City> = cities.values().cloned().collect();
        if let Some(reason) = city_name_available(&existing, &city.country, &city.name) {
            return Err(CommerceError::Validation(reason));
        }
        cities.insert(city.id.clone(), city);
        Ok(())
    }

    /// Add a package, enforcing range non-overlap against live packages.
    pub fn add_package(&self, package: Package) -> Result<(), CommerceError> {
        let mut packages = self.packages.write().expect("RwLock poisoned");
        let others: Vec<Package> = packages.values().cloned().collect();
        if let Some(reason) = package.validate(&others) {
            return Err(CommerceError::Validation(reason));
        }
        packages.insert(package.id.clone(), package);
        Ok(())
    }

    /// Active cities in a country, in display order.
    pub fn cities_in_country(&self, country: &CountryId) -> Vec<City> {
        let cities = self.cities.read().expect("RwLock poisoned");
        let mut found: Vec<City> = cities
            .values()
            .filter(|c| &c.country == country && c.is_active && !c.is_deleted())
            .cloned()
            .collect();
        found.sort_by_key(|c| c.display_order);
        found
    }

    /// Live packages in display order.
    pub fn list_packages(&self) -> Vec<Package> {
        let packages = self.packages.read().expect("RwLock poisoned");
        let mut found: Vec<Package> = packages
            .values()
            .filter(|p| !p.is_deleted())
            .cloned()
            .collect();
        found.sort_by_key(|p| p.display_order);
        found
    }
}

impl Catalog for MemoryCatalog {
    fn find_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        let products = self.products.read().expect("RwLock poisoned");
        Ok(products.get(id).filter(|p| !p.is_deleted()).cloned())
    }

    fn find_city(&self, id: &CityId) -> Result<Option<City>, CommerceError> {
        let cities = self.cities.read().expect("RwLock poisoned");
        Ok(cities.get(id).filter(|c| !c.is_deleted()).cloned())
    }

    fn find_country(&self, id: &CountryId) -> Result<Option<Country>, CommerceError> {
        let countries = self.countries.read().expect("RwLock poisoned");
        Ok(countries.get(id).filter(|c| !c.is_deleted()).cloned())
    }

    fn find_addon(&self, id: &AddonId) -> Result<Option<Addon>, CommerceError> {
        let addons = self.addons.read().expect("RwLock poisoned");
        Ok(addons.get(id).cloned())
    }

    fn find_package(&self, id: &PackageId) -> Result<Option<Package>, CommerceError> {
        let packages = self.packages.read().expect("RwLock poisoned");
        Ok(packages.get(id).filter(|p| !p.is_deleted()).cloned())
    }

    fn find_package_by_quantity(&self, quantity: i64) -> Result<Option<Package>, CommerceError> {
        let packages = self.packages.read().expect("RwLock poisoned");
        let all: Vec<Package> = packages.values().cloned().collect();
        Ok(package_for_quantity(&all, quantity).cloned())
    }
}

/// In-memory standard-order store with optimistic concurrency.
#[derive(Clone, Default)]
pub struct MemoryOrders {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl MemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for MemoryOrders {
    fn get(&self, id: &OrderId) -> Result<Option<Order>, CommerceError> {
        let orders = self.orders.read().expect("RwLock poisoned");
        Ok(orders.get(id).cloned())
    }

    fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, CommerceError> {
        let orders = self.orders.read().expect("RwLock poisoned");
        let mut found: Vec<Order> = orders
            .values()
            .filter(|o| &o.created_by == user)
            .cloned()
            .collect();
        found.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(found)
    }

    fn list_all(&self) -> Result<Vec<Order>, CommerceError> {
        let orders = self.orders.read().expect("RwLock poisoned");
        let mut found: Vec<Order> = orders.values().cloned().collect();
        found.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(found)
    }

    fn insert(&self, order: Order) -> Result<(), CommerceError> {
        let mut orders = self.orders.write().expect("RwLock poisoned");
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    fn update_with(
        &self,
        id: &OrderId,
        expected_version: u64,
        mutate: &mut dyn FnMut(&mut Order) -> Result<(), CommerceError>,
    ) -> Result<Order, CommerceError> {
        let mut orders = self.orders.write().expect("RwLock poisoned");
        let order = orders
            .get_mut(id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))?;
        if order.version != expected_version {
            return Err(CommerceError::VersionConflict {
                entity: "order",
                id: id.to_string(),
                expected: expected_version,
                found: order.version,
            });
        }
        // Mutate a copy so a failing mutator leaves the stored
        // aggregate untouched.
        let mut updated = order.clone();
        mutate(&mut updated)?;
        updated.version += 1;
        *order = updated;
        Ok(order.clone())
    }

    fn remove(&self, id: &OrderId) -> Result<(), CommerceError> {
        let mut orders = self.orders.write().expect("RwLock poisoned");
        orders
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))
    }
}

/// In-memory custom-order store with optimistic concurrency.
#[derive(Clone, Default)]
pub struct MemoryCustomOrders {
    orders: Arc<RwLock<HashMap<CustomOrderId, CustomOrder>>>,
}

impl MemoryCustomOrders {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomOrderStore for MemoryCustomOrders {
    fn get(&self, id: &CustomOrderId) -> Result<Option<CustomOrder>, CommerceError> {
        let orders = self.orders.read().expect("RwLock poisoned");
        Ok(orders.get(id).cloned())
    }

    fn list_for_user(&self, user: &UserId) -> Result<Vec<CustomOrder>, CommerceError> {
        let orders = self.orders.read().expect("RwLock poisoned");
        let mut found: Vec<CustomOrder> = orders
            .values()
            .filter(|o| &o.created_by == user)
            .cloned()
            .collect();
        found.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(found)
    }

    fn list_all(&self) -> Result<Vec<CustomOrder>, CommerceError> {
        let orders = self.orders.read().expect("RwLock poisoned");
        let mut found: Vec<CustomOrder> = orders.values().cloned().collect();
        found.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(found)
    }

    fn insert(&self, order: CustomOrder) -> Result<(), CommerceError> {
        let mut orders = self.orders.write().expect("RwLock poisoned");
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    fn update_with(
        &self,
        id: &CustomOrderId,
        expected_version: u64,
        mutate: &mut dyn FnMut(&mut CustomOrder) -> Result<(), CommerceError>,
    ) -> Result<CustomOrder, CommerceError> {
        let mut orders = self.orders.write().expect("RwLock poisoned");
        let order = orders
            .get_mut(id)
            .ok_or_else(|| CommerceError::CustomOrderNotFound(id.to_string()))?;
        if order.version != expected_version {
            return Err(CommerceError::VersionConflict {
                entity: "custom order",
                id: id.to_string(),
                expected: expected_version,
                found: order.version,
            });
        }
        // Mutate a copy so a failing mutator leaves the stored
        // aggregate untouched.
        let mut updated = order.clone();
        mutate(&mut updated)?;
        updated.version += 1;
        *order = updated;
        Ok(order.clone())
    }

    fn remove(&self, id: &CustomOrderId) -> Result<(), CommerceError> {
        let mut orders = self.orders.write().expect("RwLock poisoned");
        orders
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CommerceError::CustomOrderNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkit_commerce::money::{Currency, Money};
    use linkit_commerce::orders::{
        CompanyInfo, CustomOrderDraft, CustomOrderStatus, OrderDetails,
    };

    fn jod(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::JOD)
    }

    fn sample_custom_order() -> CustomOrder {
        CustomOrder::new(CustomOrderDraft {
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
        })
    }

    #[test]
    fn test_city_name_unique_per_country() {
        let catalog = MemoryCatalog::new();
        let country = Country::new("Jordan", "JO");
        let country_id = country.id.clone();
        catalog.add_country(country).unwrap();

        catalog
            .add_city(City::new("Amman", country_id.clone(), jod(3.0)))
            .unwrap();
        let err = catalog
            .add_city(City::new("AMMAN", country_id.clone(), jod(3.0)))
            .unwrap_err();
        assert!(matches!(err, CommerceError::Validation(_)));

        // Same name in a different country is fine.
        let other = Country::new("United Arab Emirates", "AE");
        let other_id = other.id.clone();
        catalog.add_country(other).unwrap();
        catalog.add_city(City::new("Amman", other_id, jod(5.0))).unwrap();
    }

    #[test]
    fn test_bad_country_code_rejected() {
        let catalog = MemoryCatalog::new();
        let err = catalog.add_country(Country::new("Jordan", "J0RDAN")).unwrap_err();
        assert!(matches!(err, CommerceError::Validation(_)));
    }

    #[test]
    fn test_version_conflict_on_stale_write() {
        let store = MemoryCustomOrders::new();
        let order = sample_custom_order();
        let id = order.id.clone();
        store.insert(order).unwrap();

        // First writer wins and bumps the version.
        let updated = store
            .update_with(&id, 0, &mut |o| o.transition(CustomOrderStatus::Reviewing))
            .unwrap();
        assert_eq!(updated.version, 1);

        // Second writer still holds version 0 and must lose.
        let err = store
            .update_with(&id, 0, &mut |o| o.transition(CustomOrderStatus::Cancelled))
            .unwrap_err();
        assert!(err.is_retryable());
        match err {
            CommerceError::VersionConflict { expected, found, .. } => {
                assert_eq!(expected, 0);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_failed_mutation_does_not_bump_version() {
        let store = MemoryCustomOrders::new();
        let order = sample_custom_order();
        let id = order.id.clone();
        store.insert(order).unwrap();

        let err = store
            .update_with(&id, 0, &mut |o| o.transition(CustomOrderStatus::Completed))
            .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidStatusTransition { .. }));

        // The same version must still be accepted next time.
        store
            .update_with(&id, 0, &mut |o| o.transition(CustomOrderStatus::Reviewing))
            .unwrap();
    }

    #[test]
    fn test_failed_mutation_leaves_stored_state_untouched() {
        let store = MemoryCustomOrders::new();
        let order = sample_custom_order();
        let id = order.id.clone();
        store.insert(order).unwrap();

        // A mutator that dirties the aggregate before failing must not
        // leak its partial writes into storage.
        let err = store
            .update_with(&id, 0, &mut |o| {
                o.admin_notes = Some("half-applied".into());
                Err(CommerceError::Validation("rejected".into()))
            })
            .unwrap_err();
        assert!(matches!(err, CommerceError::Validation(_)));

        let stored = store.get(&id).unwrap().unwrap();
        assert!(stored.admin_notes.is_none());
        assert_eq!(stored.version, 0);
    }

    #[test]
    fn test_list_for_user_filters_and_sorts() {
        let store = MemoryCustomOrders::new();
        let mine = sample_custom_order();
        let mut theirs = sample_custom_order();
        theirs.created_by = UserId::new("someone-else");
        store.insert(mine.clone()).unwrap();
        store.insert(theirs).unwrap();

        let listed = store.list_for_user(&UserId::new("user-7")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, mine.id);
    }
}
