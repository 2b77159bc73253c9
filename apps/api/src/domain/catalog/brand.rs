use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_name, Entity, Reference, Table, Validate};

/// Product manufacturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBrand {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandPatch {
    pub name: Option<String>,
}

impl Validate for NewBrand {
    fn validate(&self) -> Result<(), String> {
        require_name("Brand name", &self.name)
    }
}

impl Validate for BrandPatch {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) => require_name("Brand name", name),
            None => Ok(()),
        }
    }
}

impl Entity for Brand {
    type New = NewBrand;
    type Patch = BrandPatch;

    const NAME: &'static str = "Brand";
    const TABLE: Table = Table::Brands;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewBrand) -> Self {
        Self { id, name: new.name }
    }

    fn apply(&mut self, patch: BrandPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}
