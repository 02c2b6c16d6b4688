//! Cart Model
//!
//! One cart document per user; the record key is the owning user's key,
//! which makes uniqueness a property of the store rather than a check.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One line in a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Stable line id, referenced by update/remove endpoints
    pub item_id: String,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Denormalized at add time; checkout snapshots these, not the menu
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    #[serde(default)]
    pub instructions: String,
}

impl CartItem {
    /// Merge identity: two adds collapse into one line only when the
    /// referenced item, displayed name and instructions all match.
    pub fn merges_with(&self, menu_item: &RecordId, name: &str, instructions: &str) -> bool {
        &self.menu_item == menu_item && self.name == name && self.instructions == instructions
    }

    pub fn line_total(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// Per-user cart document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Fresh empty cart for a user
    pub fn empty(user: RecordId) -> Self {
        Self {
            id: None,
            user,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Derived: Σ price × quantity
    pub fn total(&self) -> i64 {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Derived: Σ quantity
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart as returned by the API, with the derived figures attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: i64,
    pub item_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let total = cart.total();
        let item_count = cart.item_count();
        Self {
            items: cart.items,
            total,
            item_count,
            updated_at: cart.updated_at,
        }
    }
}
