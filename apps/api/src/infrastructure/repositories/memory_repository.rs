use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::catalog::{
    Brand, Category, Entity, Product, ProductListing, Reference, SubCategory, Table,
};
use crate::domain::repositories::errors::{RepositoryError, RepositoryResult};
use crate::domain::repositories::user_repository::{User, UserRepository};
use crate::domain::repositories::{CatalogRepository, ListingRepository};
use crate::domain::user::Email;

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    subcategories: BTreeMap<i32, SubCategory>,
    brands: BTreeMap<i32, Brand>,
    products: BTreeMap<i32, Product>,
    sequences: HashMap<Table, i32>,
}

impl Tables {
    fn next_id(&mut self, table: Table) -> i32 {
        let id = self.sequences.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn exists(&self, reference: Reference) -> bool {
        match reference.table {
            Table::Categories => self.categories.contains_key(&reference.id),
            Table::Subcategories => self.subcategories.contains_key(&reference.id),
            Table::Brands => self.brands.contains_key(&reference.id),
            Table::Products => self.products.contains_key(&reference.id),
        }
    }

    fn is_referenced(&self, target: Reference) -> bool {
        // A self-referencing row does not block its own deletion
        fn any_refers<E: Entity>(rows: &BTreeMap<i32, E>, target: Reference) -> bool {
            rows.values()
                .filter(|row| !(E::TABLE == target.table && row.id() == target.id))
                .any(|row| row.references().contains(&target))
        }

        any_refers(&self.categories, target)
            || any_refers(&self.subcategories, target)
            || any_refers(&self.brands, target)
            || any_refers(&self.products, target)
    }

    fn check_references<E: Entity>(&self, row: &E) -> RepositoryResult<()> {
        match row.references().into_iter().find(|r| !self.exists(*r)) {
            Some(missing) => Err(RepositoryError::ForeignKeyViolation(format!(
                "{} {} does not exist",
                missing.table, missing.id
            ))),
            None => Ok(()),
        }
    }
}

/// Entities the in-memory store knows how to hold
trait Stored: Entity {
    fn rows(tables: &Tables) -> &BTreeMap<i32, Self>;
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self>;
}

macro_rules! stored {
    ($entity:ty, $field:ident) => {
        impl Stored for $entity {
            fn rows(tables: &Tables) -> &BTreeMap<i32, Self> {
                &tables.$field
            }

            fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
                &mut tables.$field
            }
        }
    };
}

stored!(Category, categories);
stored!(SubCategory, subcategories);
stored!(Brand, brands);
stored!(Product, products);

/// Catalog store kept in process memory
///
/// Enforces the same foreign-key rules as the PostgreSQL schema
/// (`ON DELETE RESTRICT`), so handlers behave identically on either backend.
/// Ids are per-table sequences starting at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryCatalog {
    tables: Mutex<Tables>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl InMemoryCatalog {
    fn insert_row<E: Stored>(&self, new: E::New) -> RepositoryResult<E> {
        let mut tables = self.lock();
        tables.check_references(&E::from_new(0, new.clone()))?;

        let id = tables.next_id(E::TABLE);
        let row = E::from_new(id, new);
        E::rows_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    fn get_row<E: Stored>(&self, id: i32) -> Option<E> {
        E::rows(&self.lock()).get(&id).cloned()
    }

    fn all_rows<E: Stored>(&self) -> Vec<E> {
        E::rows(&self.lock()).values().cloned().collect()
    }

    fn patch_row<E: Stored>(&self, id: i32, patch: E::Patch) -> RepositoryResult<Option<E>> {
        let mut tables = self.lock();
        let Some(mut row) = E::rows(&tables).get(&id).cloned() else {
            return Ok(None);
        };
        row.apply(patch);
        tables.check_references(&row)?;

        E::rows_mut(&mut tables).insert(id, row.clone());
        Ok(Some(row))
    }

    fn remove_row<E: Stored>(&self, id: i32) -> RepositoryResult<bool> {
        let mut tables = self.lock();
        if !E::rows(&tables).contains_key(&id) {
            return Ok(false);
        }
        if tables.is_referenced(Reference::new(E::TABLE, id)) {
            return Err(RepositoryError::ForeignKeyViolation(format!(
                "{} {} is still referenced",
                E::TABLE,
                id
            )));
        }

        E::rows_mut(&mut tables).remove(&id);
        Ok(true)
    }
}

macro_rules! memory_catalog_repository {
    ($entity:ty) => {
        #[async_trait]
        impl CatalogRepository<$entity> for InMemoryCatalog {
            async fn create(
                &self,
                new: <$entity as Entity>::New,
            ) -> RepositoryResult<$entity> {
                self.insert_row(new)
            }

            async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<$entity>> {
                Ok(self.get_row(id))
            }

            async fn list(&self) -> RepositoryResult<Vec<$entity>> {
                Ok(self.all_rows())
            }

            async fn update(
                &self,
                id: i32,
                patch: <$entity as Entity>::Patch,
            ) -> RepositoryResult<Option<$entity>> {
                self.patch_row(id, patch)
            }

            async fn delete(&self, id: i32) -> RepositoryResult<bool> {
                self.remove_row::<$entity>(id)
            }
        }
    };
}

memory_catalog_repository!(Category);
memory_catalog_repository!(SubCategory);
memory_catalog_repository!(Brand);
memory_catalog_repository!(Product);

#[async_trait]
impl ListingRepository for InMemoryCatalog {
    async fn find_by_category(&self, category: &str) -> RepositoryResult<Vec<ProductListing>> {
        let tables = self.lock();
        let pattern = LikePattern::contains(category);

        let listings = tables
            .products
            .values()
            .filter_map(|product| {
                let brand = tables.brands.get(&product.brand_id)?;
                let subcategory = tables.subcategories.get(&product.subcategory_id)?;
                let parent = tables.categories.get(&subcategory.category_id)?;
                if !pattern.matches(&parent.name) {
                    return None;
                }

                Some(ProductListing {
                    name: product.name.clone(),
                    brand: brand.name.clone(),
                    price: product.price,
                    description: product.description.clone(),
                    image_url: product.image_url.clone(),
                    rating_value: product.rating_value,
                    rating_count: product.rating_count,
                    category_name: parent.name.clone(),
                })
            })
            .collect();

        Ok(listings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    AnyRun,
    AnyChar,
    Literal(char),
}

/// Case-insensitive `LIKE` pattern, matching how PostgreSQL evaluates
/// `ILIKE` with its default backslash escape
struct LikePattern {
    tokens: Vec<LikeToken>,
}

impl LikePattern {
    fn new(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars().flat_map(char::to_lowercase);
        while let Some(c) = chars.next() {
            tokens.push(match c {
                '%' => LikeToken::AnyRun,
                '_' => LikeToken::AnyChar,
                '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
                other => LikeToken::Literal(other),
            });
        }
        Self { tokens }
    }

    /// Pattern for `%text%`, the form the listing query binds
    fn contains(text: &str) -> Self {
        Self::new(&format!("%{}%", text))
    }

    fn matches(&self, value: &str) -> bool {
        let text: Vec<char> = value.chars().flat_map(char::to_lowercase).collect();
        let tokens = &self.tokens;
        let (mut t, mut p) = (0, 0);
        // Last `%` seen and the text position it is currently absorbing up to
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(LikeToken::AnyRun) => {
                    backtrack = Some((p, t));
                    p += 1;
                    continue;
                }
                Some(LikeToken::AnyChar) => {
                    t += 1;
                    p += 1;
                    continue;
                }
                Some(LikeToken::Literal(c)) if *c == text[t] => {
                    t += 1;
                    p += 1;
                    continue;
                }
                _ => {}
            }

            match backtrack {
                Some((star, start)) => {
                    backtrack = Some((star, start + 1));
                    p = star + 1;
                    t = start + 1;
                }
                None => return false,
            }
        }

        tokens[p..].iter().all(|token| *token == LikeToken::AnyRun)
    }
}

/// Users kept in process memory, keyed by email
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> RepositoryResult<Uuid> {
        let mut users = self.users.lock().unwrap_or_else(|p| p.into_inner());
        let key = user.email.as_str().to_string();
        if users.contains_key(&key) {
            return Err(RepositoryError::UniqueViolation(format!(
                "email {} already exists",
                key
            )));
        }

        let id = user.id;
        users.insert(key, user);
        Ok(id)
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        let users = self.users.lock().unwrap_or_else(|p| p.into_inner());
        Ok(users.get(email.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        CategoryPatch, NewBrand, NewCategory, NewProduct, NewSubCategory, ProductPatch,
    };

    async fn create<E: Entity>(store: &InMemoryCatalog, new: E::New) -> RepositoryResult<E>
    where
        InMemoryCatalog: CatalogRepository<E>,
    {
        CatalogRepository::<E>::create(store, new).await
    }

    async fn seeded() -> (InMemoryCatalog, Product) {
        let store = InMemoryCatalog::new();
        let category = create::<Category>(
            &store,
            NewCategory {
                name: "Footwear".to_string(),
                emoji: None,
                parent_id: None,
            },
        )
        .await
        .unwrap();
        let subcategory = create::<SubCategory>(
            &store,
            NewSubCategory {
                name: "Sneakers".to_string(),
                category_id: category.id,
            },
        )
        .await
        .unwrap();
        let brand = create::<Brand>(
            &store,
            NewBrand {
                name: "Stride".to_string(),
            },
        )
        .await
        .unwrap();
        let product = create::<Product>(
            &store,
            NewProduct {
                name: "Cloud Runner".to_string(),
                brand_id: brand.id,
                subcategory_id: subcategory.id,
                price: 8999,
                description: "Light trainer".to_string(),
                image_url: None,
                rating_value: 39,
                rating_count: 120,
            },
        )
        .await
        .unwrap();

        (store, product)
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let store = InMemoryCatalog::new();
        for expected in 1..=3 {
            let brand = create::<Brand>(
                &store,
                NewBrand {
                    name: format!("Brand {}", expected),
                },
            )
            .await
            .unwrap();
            assert_eq!(brand.id, expected);
        }

        let category = create::<Category>(
            &store,
            NewCategory {
                name: "Bags".to_string(),
                emoji: None,
                parent_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(category.id, 1);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = InMemoryCatalog::new();
        let first = create::<Brand>(
            &store,
            NewBrand {
                name: "Old".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(CatalogRepository::<Brand>::delete(&store, first.id).await.unwrap());

        let second = create::<Brand>(
            &store,
            NewBrand {
                name: "New".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn dangling_reference_rejected_on_create() {
        let store = InMemoryCatalog::new();
        let result = create::<SubCategory>(
            &store,
            NewSubCategory {
                name: "Orphan".to_string(),
                category_id: 42,
            },
        )
        .await;

        match result {
            Err(RepositoryError::ForeignKeyViolation(message)) => {
                assert_eq!(message, "categories 42 does not exist");
            }
            other => panic!("expected foreign key violation, got {:?}", other),
        }
        assert!(CatalogRepository::<SubCategory>::list(&store)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn dangling_reference_rejected_on_update() {
        let (store, product) = seeded().await;
        let result = CatalogRepository::<Product>::update(
            &store,
            product.id,
            ProductPatch {
                brand_id: Some(99),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));

        let stored = CatalogRepository::<Product>::find_by_id(&store, product.id)
            .await
            .unwrap();
        assert_eq!(stored.unwrap().brand_id, product.brand_id);
    }

    #[tokio::test]
    async fn referenced_row_cannot_be_deleted() {
        let (store, product) = seeded().await;
        let result = CatalogRepository::<Brand>::delete(&store, product.brand_id).await;
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));

        assert!(CatalogRepository::<Product>::delete(&store, product.id)
            .await
            .unwrap());
        assert!(CatalogRepository::<Brand>::delete(&store, product.brand_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn self_parent_does_not_block_delete() {
        let store = InMemoryCatalog::new();
        let category = create::<Category>(
            &store,
            NewCategory {
                name: "Loop".to_string(),
                emoji: None,
                parent_id: None,
            },
        )
        .await
        .unwrap();
        let updated = CatalogRepository::<Category>::update(
            &store,
            category.id,
            CategoryPatch {
                parent_id: Some(Some(category.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.unwrap().parent_id, Some(category.id));

        assert!(CatalogRepository::<Category>::delete(&store, category.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let store = InMemoryCatalog::new();
        let result = CatalogRepository::<Brand>::update(&store, 5, Default::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn listing_matches_category_case_insensitively() {
        let (store, product) = seeded().await;

        let listings = store.find_by_category("FOOT").await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, product.name);
        assert_eq!(listings[0].brand, "Stride");
        assert_eq!(listings[0].category_name, "Footwear");

        assert!(store.find_by_category("garden").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_treats_category_as_like_pattern() {
        let (store, _) = seeded().await;

        assert_eq!(store.find_by_category("f__twear").await.unwrap().len(), 1);
        assert_eq!(store.find_by_category("%").await.unwrap().len(), 1);
        assert_eq!(store.find_by_category("").await.unwrap().len(), 1);
        assert_eq!(store.find_by_category("Foot%ar").await.unwrap().len(), 1);
        assert!(store.find_by_category("Fo_x").await.unwrap().is_empty());
        assert!(store.find_by_category("Foot\\%").await.unwrap().is_empty());
    }

    #[test]
    fn like_pattern_wildcards() {
        assert!(LikePattern::new("T_p%").matches("Tops"));
        assert!(LikePattern::new("%OP%").matches("tops"));
        assert!(LikePattern::new("%s").matches("Tops"));
        assert!(LikePattern::new("a%b%c").matches("aXbYbZc"));
        assert!(!LikePattern::new("T_p").matches("Tops"));
        assert!(!LikePattern::new("_").matches(""));
        assert!(LikePattern::new("%").matches(""));
    }

    #[test]
    fn like_pattern_escapes() {
        assert!(LikePattern::new("100\\%").matches("100%"));
        assert!(!LikePattern::new("100\\%").matches("1000"));
        assert!(LikePattern::new("a\\_b").matches("a_b"));
        assert!(!LikePattern::new("a\\_b").matches("axb"));
    }

    #[tokio::test]
    async fn duplicate_user_email_rejected() {
        let users = InMemoryUserRepository::new();
        let user = User {
            id: Uuid::new_v4(),
            email: Email::new("admin@mallrats.test").unwrap(),
            password_hash: "hash".to_string(),
            full_name: "Admin".to_string(),
            is_active: true,
        };
        users.create(user.clone()).await.unwrap();

        let duplicate = User {
            id: Uuid::new_v4(),
            ..user
        };
        let result = users.create(duplicate).await;
        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));

        let found = users
            .find_by_email(&Email::new("ADMIN@mallrats.test").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }
}
