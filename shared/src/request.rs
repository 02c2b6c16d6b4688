//! Request payloads
//!
//! JSON bodies accepted by the HTTP API. Kept next to the response types
//! so API clients can depend on one crate for the whole wire contract.

use serde::{Deserialize, Serialize};

use crate::order::{ContactInfo, DeliveryInfo, PaymentMethod};

/// POST /auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /cart/add
///
/// `name`/`price` are optional overrides for portion variants (e.g. the
/// half-portion of an item); when present the price must match one of the
/// menu item's listed prices. Absent, both default to the full portion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub menu_item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// PUT /cart/update/{itemId}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Payment section of a checkout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_image: Option<String>,
}

/// POST /orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub delivery: DeliveryInfo,
    pub contact: ContactInfo,
    pub payment: PaymentRequest,
}

/// PUT /orders/admin/{orderId}/status
///
/// `status` arrives as a raw string so an unknown value maps to a
/// validation error instead of a body-rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
