use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_name, Entity, Reference, Table, Validate};

/// Second catalog level; every subcategory belongs to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubCategory {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubCategory {
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubCategoryPatch {
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

impl Validate for NewSubCategory {
    fn validate(&self) -> Result<(), String> {
        require_name("Subcategory name", &self.name)
    }
}

impl Validate for SubCategoryPatch {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) => require_name("Subcategory name", name),
            None => Ok(()),
        }
    }
}

impl Entity for SubCategory {
    type New = NewSubCategory;
    type Patch = SubCategoryPatch;

    const NAME: &'static str = "SubCategory";
    const TABLE: Table = Table::Subcategories;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewSubCategory) -> Self {
        Self {
            id,
            name: new.name,
            category_id: new.category_id,
        }
    }

    fn apply(&mut self, patch: SubCategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(Table::Categories, self.category_id)]
    }
}
