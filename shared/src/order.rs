//! Order wire types
//!
//! Structures embedded inside an order document. Everything here is fixed
//! at placement time except `status`, which advances through the admin
//! workflow, and the history log that records each change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
///
/// Happy path: `received → preparing → ready → delivered`, all transitions
/// admin-driven. The single side exit `received → cancelled` is the only
/// transition a customer may trigger. Admins may set any status from any
/// other (override authority); customers may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status from its wire form
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Terminal states accept no further transitions in the customer view
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Customers may cancel only before the kitchen picks the order up
    pub fn customer_can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Received)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment methods accepted at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Upi,
}

/// Snapshotted order line
///
/// Copied verbatim from the cart at placement; later menu edits never
/// touch these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// Unit price in currency units at the time the item was added
    pub price: i64,
    pub quantity: u32,
    #[serde(default)]
    pub instructions: String,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// Where to bring the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub hostel: String,
    pub room: String,
    #[serde(default)]
    pub instructions: String,
}

/// Who to call when it arrives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
}

/// How the order is paid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Reference to an uploaded proof-of-payment image (UPI transfers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_image: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Pricing breakdown, fixed at placement
///
/// Invariant: every component ≥ 0 and `total = subtotal + delivery_fee + tax`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pricing {
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub tax: i64,
    pub total: i64,
}

/// One entry of the order's status history log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub at: DateTime<Utc>,
    /// Id of the user or admin who made the change
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
