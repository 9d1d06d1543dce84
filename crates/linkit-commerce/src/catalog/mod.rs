//! Catalog types: products, addons, delivery geography, quantity packages.

mod addon;
mod geography;
mod lookup;
mod package;
mod product;

pub use addon::{Addon, AddonInput};
pub use geography::{city_name_available, City, Country};
pub use lookup::Catalog;
pub use package::{package_for_quantity, Package, PackagePricing, PackageType, QuantityRange};
pub use product::{CardDesignOption, Product};
