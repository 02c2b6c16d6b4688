//! Database models
//!
//! Document shapes persisted in SurrealDB, one module per collection.

pub mod serde_helpers;

pub mod cart;
pub mod menu_item;
pub mod order;
pub mod user;

pub use cart::{Cart, CartItem, CartView};
pub use menu_item::{MenuFilter, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
pub use order::{Order, OrderId};
pub use user::{User, UserCreate, UserId};
