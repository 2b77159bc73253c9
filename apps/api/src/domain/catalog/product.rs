use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::patch::double_option;
use super::{non_negative, require_name, Entity, Reference, Table, Validate};

const DEFAULT_RATING_VALUE: i32 = 39;
const DEFAULT_RATING_COUNT: i32 = 120;

/// Sellable item, linked to a brand and a subcategory
///
/// # Invariants
/// - `brand_id` and `subcategory_id` reference existing rows
/// - Price and rating figures are never negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub brand_id: i32,
    pub subcategory_id: i32,
    pub price: i32,
    pub description: String,
    pub image_url: Option<String>,
    pub rating_value: i32,
    pub rating_count: i32,
}

/// Request body for creating a product
///
/// Rating figures fall back to the storefront defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub brand_id: i32,
    pub subcategory_id: i32,
    pub price: i32,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_rating_value")]
    pub rating_value: i32,
    #[serde(default = "default_rating_count")]
    pub rating_count: i32,
}

fn default_rating_value() -> i32 {
    DEFAULT_RATING_VALUE
}

fn default_rating_count() -> i32 {
    DEFAULT_RATING_COUNT
}

/// Request body for updating a product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub price: Option<i32>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub image_url: Option<Option<String>>,
    pub rating_value: Option<i32>,
    pub rating_count: Option<i32>,
}

/// Storefront view of a product joined with its brand and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductListing {
    pub name: String,
    pub brand: String,
    pub price: i32,
    pub description: String,
    pub image_url: Option<String>,
    pub rating_value: i32,
    pub rating_count: i32,
    pub category_name: String,
}

impl Validate for NewProduct {
    fn validate(&self) -> Result<(), String> {
        require_name("Product name", &self.name)?;
        non_negative("Price", self.price)?;
        non_negative("Rating value", self.rating_value)?;
        non_negative("Rating count", self.rating_count)
    }
}

impl Validate for ProductPatch {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_name("Product name", name)?;
        }
        if let Some(price) = self.price {
            non_negative("Price", price)?;
        }
        if let Some(value) = self.rating_value {
            non_negative("Rating value", value)?;
        }
        if let Some(count) = self.rating_count {
            non_negative("Rating count", count)?;
        }
        Ok(())
    }
}

impl Entity for Product {
    type New = NewProduct;
    type Patch = ProductPatch;

    const NAME: &'static str = "Product";
    const TABLE: Table = Table::Products;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            brand_id: new.brand_id,
            subcategory_id: new.subcategory_id,
            price: new.price,
            description: new.description,
            image_url: new.image_url,
            rating_value: new.rating_value,
            rating_count: new.rating_count,
        }
    }

    fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(brand_id) = patch.brand_id {
            self.brand_id = brand_id;
        }
        if let Some(subcategory_id) = patch.subcategory_id {
            self.subcategory_id = subcategory_id;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(rating_value) = patch.rating_value {
            self.rating_value = rating_value;
        }
        if let Some(rating_count) = patch.rating_count {
            self.rating_count = rating_count;
        }
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(Table::Brands, self.brand_id),
            Reference::new(Table::Subcategories, self.subcategory_id),
        ]
    }
}
