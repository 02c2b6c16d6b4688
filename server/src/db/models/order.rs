//! Order Model
//!
//! An order is an immutable snapshot of a cart plus delivery, contact and
//! payment metadata. After creation only `status`, `admin_notes`, the
//! history log and `updated_at` may change.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::order::{
    ContactInfo, DeliveryInfo, OrderItem, OrderStatus, PaymentInfo, Pricing, StatusChange,
};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Placed order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<OrderId>,
    /// Human-facing unique order identifier (`ORD-{millis}-{suffix}`)
    pub receipt_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub items: Vec<OrderItem>,
    pub delivery: DeliveryInfo,
    pub contact: ContactInfo,
    pub payment: PaymentInfo,
    pub pricing: Pricing,
    pub status: OrderStatus,
    pub estimated_delivery: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Record a status change: mutates `status`, stamps `updated_at` and
    /// appends exactly one history entry.
    pub fn apply_status(&mut self, status: OrderStatus, actor: &str, notes: Option<String>) {
        let now = Utc::now();
        self.status = status;
        self.updated_at = now;
        self.history.push(StatusChange {
            status,
            at: now,
            actor: actor.to_string(),
            notes,
        });
    }
}
