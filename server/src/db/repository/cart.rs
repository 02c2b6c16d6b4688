//! Cart Repository
//!
//! Cart documents are keyed by the owning user's record key, so "one cart
//! per user" holds by construction and every access is a single-key
//! read or write.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Cart;
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const CART_TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Load the user's cart, if one exists
    pub async fn find(&self, user_key: &str) -> RepoResult<Option<Cart>> {
        let cart: Option<Cart> = self.base.db().select((CART_TABLE, user_key)).await?;
        Ok(cart)
    }

    /// Load the user's cart, creating an empty one on first access
    pub async fn find_or_create(&self, user: &RecordId) -> RepoResult<Cart> {
        let user_key = user.key().to_string();
        if let Some(cart) = self.find(&user_key).await? {
            return Ok(cart);
        }
        self.save(&user_key, Cart::empty(user.clone())).await
    }

    /// Persist the whole cart document back (create-or-replace)
    pub async fn save(&self, user_key: &str, mut cart: Cart) -> RepoResult<Cart> {
        cart.id = None;
        cart.updated_at = Utc::now();
        let saved: Option<Cart> = self
            .base
            .db()
            .upsert((CART_TABLE, user_key))
            .content(cart)
            .await?;
        saved.ok_or_else(|| RepoError::Database("Failed to persist cart".to_string()))
    }

    /// Empty the cart's item list, keeping the document. Idempotent;
    /// creates the cart when absent.
    pub async fn clear(&self, user: &RecordId) -> RepoResult<Cart> {
        let user_key = user.key().to_string();
        let mut cart = self.find_or_create(user).await?;
        cart.items.clear();
        self.save(&user_key, cart).await
    }
}
