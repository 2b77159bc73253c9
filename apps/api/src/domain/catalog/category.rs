use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::patch::double_option;
use super::{require_name, Entity, Reference, Table, Validate};

/// Top-level catalog grouping, optionally nested under a parent category
///
/// # Example
/// ```
/// use mallrats_api::domain::catalog::{Category, CategoryPatch, Entity, NewCategory};
///
/// let mut category = Category::from_new(
///     1,
///     NewCategory { name: "Shoes".to_string(), emoji: None, parent_id: None },
/// );
/// category.apply(CategoryPatch { emoji: Some(Some("👟".to_string())), ..Default::default() });
///
/// assert_eq!(category.name, "Shoes");
/// assert_eq!(category.emoji.as_deref(), Some("👟"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub emoji: Option<String>,
    pub parent_id: Option<i32>,
}

/// Request body for creating a category
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

/// Request body for updating a category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub emoji: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option::deserialize")]
    pub parent_id: Option<Option<i32>>,
}

impl Validate for NewCategory {
    fn validate(&self) -> Result<(), String> {
        require_name("Category name", &self.name)
    }
}

impl Validate for CategoryPatch {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) => require_name("Category name", name),
            None => Ok(()),
        }
    }
}

impl Entity for Category {
    type New = NewCategory;
    type Patch = CategoryPatch;

    const NAME: &'static str = "Category";
    const TABLE: Table = Table::Categories;

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, new: NewCategory) -> Self {
        Self {
            id,
            name: new.name,
            emoji: new.emoji,
            parent_id: new.parent_id,
        }
    }

    fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(emoji) = patch.emoji {
            self.emoji = emoji;
        }
        if let Some(parent_id) = patch.parent_id {
            self.parent_id = parent_id;
        }
    }

    fn references(&self) -> Vec<Reference> {
        self.parent_id
            .map(|id| Reference::new(Table::Categories, id))
            .into_iter()
            .collect()
    }
}
