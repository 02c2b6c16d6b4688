//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuFilter, MenuItem, MenuItemCreate, MenuItemUpdate};
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const MENU_TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List menu items matching the given filters
    pub async fn find(&self, filter: &MenuFilter) -> RepoResult<Vec<MenuItem>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.available.is_some() {
            conditions.push("available = $available");
        }
        if filter.popular.is_some() {
            conditions.push("popular = $popular");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query_str = format!("SELECT * FROM menu_item{where_clause} ORDER BY category, name");

        let mut query = self.base.db().query(query_str);
        if let Some(category) = filter.category {
            query = query.bind(("category", category));
        }
        if let Some(available) = filter.available {
            query = query.bind(("available", available));
        }
        if let Some(popular) = filter.popular {
            query = query.bind(("popular", popular));
        }

        let mut result = query.await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    /// Find menu item by id ("menu_item:key" string form)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = Utc::now();
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            // Half price only survives alongside its flag
            half_price: if data.has_half_option {
                data.half_price
            } else {
                None
            },
            has_half_option: data.has_half_option,
            category: data.category,
            image: data.image.unwrap_or_default(),
            available: data.available.unwrap_or(true),
            popular: data.popular.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self.base.db().create(MENU_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item: load, merge the provided fields, persist whole
    /// document back.
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let mut item = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(v) = data.name {
            item.name = v;
        }
        if let Some(v) = data.description {
            item.description = v;
        }
        if let Some(v) = data.price {
            item.price = v;
        }
        if let Some(v) = data.half_price {
            item.half_price = v;
        }
        if let Some(v) = data.has_half_option {
            item.has_half_option = v;
        }
        if let Some(v) = data.category {
            item.category = v;
        }
        if let Some(v) = data.image {
            item.image = v;
        }
        if let Some(v) = data.available {
            item.available = v;
        }
        if let Some(v) = data.popular {
            item.popular = v;
        }
        if !item.has_half_option {
            item.half_price = None;
        }
        item.updated_at = Utc::now();

        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut doc = item;
        doc.id = None;
        let updated: Option<MenuItem> = self.base.db().update(thing).content(doc).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let deleted: Option<MenuItem> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        Ok(())
    }

    /// Bulk ingestion for catalog seeding; returns the created items
    pub async fn import(&self, records: Vec<MenuItemCreate>) -> RepoResult<Vec<MenuItem>> {
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            created.push(self.create(record).await?);
        }
        Ok(created)
    }
}
