// Catalog domain module
// Categories, subcategories, brands and products plus the shared entity contract

pub mod brand;
pub mod category;
pub mod patch;
pub mod product;
pub mod subcategory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub use brand::{Brand, BrandPatch, NewBrand};
pub use category::{Category, CategoryPatch, NewCategory};
pub use product::{NewProduct, Product, ProductListing, ProductPatch};
pub use subcategory::{NewSubCategory, SubCategory, SubCategoryPatch};

/// Catalog tables, used to describe foreign-key targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Categories,
    Subcategories,
    Brands,
    Products,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Categories => write!(f, "categories"),
            Table::Subcategories => write!(f, "subcategories"),
            Table::Brands => write!(f, "brands"),
            Table::Products => write!(f, "products"),
        }
    }
}

/// A foreign key held by a row: the referenced table and id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub table: Table,
    pub id: i32,
}

impl Reference {
    pub fn new(table: Table, id: i32) -> Self {
        Self { table, id }
    }
}

/// Input validation for create and update payloads
pub trait Validate {
    /// Returns a human readable reason when the payload is rejected
    fn validate(&self) -> Result<(), String>;
}

/// Contract shared by every catalog record
///
/// Each entity has a creation payload (`New`) without an id and a
/// partial update payload (`Patch`) in which every field is optional.
/// Storage backends rely on `from_new` and `apply` so that merge
/// semantics are identical whether rows live in PostgreSQL or memory.
pub trait Entity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    type New: Validate + DeserializeOwned + Clone + Send + Sync + 'static;
    type Patch: Validate + DeserializeOwned + Default + Send + Sync + 'static;

    /// Human readable name used in error messages
    const NAME: &'static str;
    /// Table this entity is stored in
    const TABLE: Table;

    fn id(&self) -> i32;

    /// Builds the persisted record from a creation payload and a generated id
    fn from_new(id: i32, new: Self::New) -> Self;

    /// Merges the provided fields of a patch, leaving absent fields untouched
    fn apply(&mut self, patch: Self::Patch);

    /// Foreign keys held by this row
    fn references(&self) -> Vec<Reference>;
}

pub(crate) fn require_name(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    Ok(())
}

pub(crate) fn non_negative(field: &str, value: i32) -> Result<(), String> {
    if value < 0 {
        return Err(format!("{} cannot be negative", field));
    }
    Ok(())
}
