//! Cart operations
//!
//! Every cart mutation is a whole-document read-modify-write, so two
//! concurrent mutations for the same user would silently drop one
//! update. [`CartLocks`] closes that race: one async mutex per user key,
//! held across the load-mutate-persist sequence. Checkout takes the same
//! lock while it snapshots and clears the cart.

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::models::{Cart, CartItem};
use crate::db::repository::{CartRepository, MenuItemRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_QUANTITY, validate_optional_text, validate_quantity,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

const MENU_TABLE: &str = "menu_item";

/// Per-user async mutex registry
///
/// Entries are created on first touch and kept for the process lifetime;
/// one mutex per user who ever mutated a cart is small enough not to need
/// eviction.
#[derive(Debug, Default)]
pub struct CartLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl CartLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Get (or create) the lock for a user key
    pub fn lock_for(&self, user_key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(user_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Cart mutation service
#[derive(Clone)]
pub struct CartService {
    db: Surreal<Db>,
    locks: Arc<CartLocks>,
}

impl CartService {
    pub fn new(db: Surreal<Db>, locks: Arc<CartLocks>) -> Self {
        Self { db, locks }
    }

    pub fn from_state(state: &ServerState) -> Self {
        Self::new(state.get_db(), state.cart_locks())
    }

    fn repo(&self) -> CartRepository {
        CartRepository::new(self.db.clone())
    }

    /// Load the user's cart, creating an empty one on first access.
    /// Never errors for a valid user.
    pub async fn get(&self, user: &RecordId) -> AppResult<Cart> {
        Ok(self.repo().find_or_create(user).await?)
    }

    /// Add an item to the cart.
    ///
    /// Validates the referenced menu item exists and is available, then
    /// merges into an existing line when (menu item, name, instructions)
    /// match, capping the merged quantity at the line maximum.
    pub async fn add_item(
        &self,
        user: &RecordId,
        menu_item_id: &str,
        name: Option<String>,
        price: Option<i64>,
        quantity: u32,
        instructions: Option<String>,
    ) -> AppResult<Cart> {
        validate_quantity(quantity)?;
        validate_optional_text(&instructions, "instructions", MAX_NOTE_LEN)?;

        let menu_repo = MenuItemRepository::new(self.db.clone());
        let item_id = normalize_menu_id(menu_item_id);
        let menu_item = menu_repo
            .find_by_id(&item_id)
            .await
            .map_err(|e| match e {
                crate::db::repository::RepoError::Validation(_) => {
                    AppError::NotFound(format!("Menu item {} not found", menu_item_id))
                }
                other => other.into(),
            })?
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", menu_item_id)))?;

        if !menu_item.available {
            return Err(AppError::InvalidState(format!(
                "{} is currently unavailable",
                menu_item.name
            )));
        }

        // Portion variants may override name/price, but the price must be
        // one the menu actually lists
        let name = name.unwrap_or_else(|| menu_item.name.clone());
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        let price = price.unwrap_or(menu_item.price);
        if !menu_item.lists_price(price) {
            return Err(AppError::Validation(format!(
                "price {} does not match any portion of {}",
                price, menu_item.name
            )));
        }

        let menu_ref = menu_item
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Menu item has no id".to_string()))?;
        let instructions = instructions.unwrap_or_default();

        let user_key = user.key().to_string();
        let lock = self.locks.lock_for(&user_key);
        let _guard = lock.lock().await;

        let mut cart = self.repo().find_or_create(user).await?;

        if let Some(line) = cart
            .items
            .iter_mut()
            .find(|l| l.merges_with(&menu_ref, &name, &instructions))
        {
            line.quantity = (line.quantity + quantity).min(MAX_QUANTITY);
        } else {
            cart.items.push(CartItem {
                item_id: Uuid::new_v4().to_string(),
                menu_item: menu_ref,
                name,
                price,
                quantity,
                instructions,
            });
        }

        Ok(self.repo().save(&user_key, cart).await?)
    }

    /// Change the quantity of an existing cart line
    pub async fn update_quantity(
        &self,
        user: &RecordId,
        item_id: &str,
        quantity: u32,
    ) -> AppResult<Cart> {
        validate_quantity(quantity)?;

        let user_key = user.key().to_string();
        let lock = self.locks.lock_for(&user_key);
        let _guard = lock.lock().await;

        let mut cart = self
            .repo()
            .find(&user_key)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        let line = cart
            .items
            .iter_mut()
            .find(|l| l.item_id == item_id)
            .ok_or_else(|| AppError::NotFound(format!("Cart item {} not found", item_id)))?;
        line.quantity = quantity;

        Ok(self.repo().save(&user_key, cart).await?)
    }

    /// Remove a cart line. Removing the last line leaves an empty cart
    /// document, never deletes it.
    pub async fn remove_item(&self, user: &RecordId, item_id: &str) -> AppResult<Cart> {
        let user_key = user.key().to_string();
        let lock = self.locks.lock_for(&user_key);
        let _guard = lock.lock().await;

        let mut cart = self
            .repo()
            .find(&user_key)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        let before = cart.items.len();
        cart.items.retain(|l| l.item_id != item_id);
        if cart.items.len() == before {
            return Err(AppError::NotFound(format!(
                "Cart item {} not found",
                item_id
            )));
        }

        Ok(self.repo().save(&user_key, cart).await?)
    }

    /// Empty the cart. Idempotent; creates the cart when absent.
    pub async fn clear(&self, user: &RecordId) -> AppResult<Cart> {
        let user_key = user.key().to_string();
        let lock = self.locks.lock_for(&user_key);
        let _guard = lock.lock().await;

        Ok(self.repo().clear(user).await?)
    }
}

/// Accept menu item references with or without the table prefix
fn normalize_menu_id(id: &str) -> String {
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{MENU_TABLE}:{id}")
    }
}
