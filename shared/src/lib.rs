//! Shared types for the Canteen ordering backend
//!
//! Common types used by the server and any API client: menu/order
//! vocabulary enums, wire-level order structures, request payloads and
//! the unified response envelope.

pub mod order;
pub mod request;
pub mod response;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use order::{
    ContactInfo, DeliveryInfo, OrderItem, OrderStatus, PaymentInfo, PaymentMethod, Pricing,
    StatusChange,
};
pub use response::{ApiResponse, ListResponse, PagedResponse};
pub use types::MenuCategory;
