//! Menu Item Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::MenuCategory;
use surrealdb::RecordId;

/// Menu item ID type
pub type MenuItemId = RecordId;

/// Orderable catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MenuItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Full-portion price in currency units
    pub price: i64,
    /// Half-portion price; present only when `has_half_option` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_price: Option<i64>,
    #[serde(default)]
    pub has_half_option: bool,
    pub category: MenuCategory,
    /// Image reference (path or URL), optional
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub popular: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Whether `price` is one of this item's listed portion prices
    pub fn lists_price(&self, price: i64) -> bool {
        price == self.price || (self.has_half_option && self.half_price == Some(price))
    }
}

/// Create menu item payload (admin CRUD and bulk ingestion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub half_price: Option<i64>,
    #[serde(default)]
    pub has_half_option: bool,
    pub category: MenuCategory,
    pub image: Option<String>,
    pub available: Option<bool>,
    pub popular: Option<bool>,
}

/// Update menu item payload; absent fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub half_price: Option<Option<i64>>,
    pub has_half_option: Option<bool>,
    pub category: Option<MenuCategory>,
    pub image: Option<String>,
    pub available: Option<bool>,
    pub popular: Option<bool>,
}

/// Query filters for the public menu listing
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<MenuCategory>,
    pub available: Option<bool>,
    pub popular: Option<bool>,
}
