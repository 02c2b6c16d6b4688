//! Checkout workflow
//!
//! The one genuinely multi-step flow in the system: read the cart, price
//! it, snapshot it into an immutable order, clear the cart, hand back the
//! receipt.
//!
//! Failure semantics: an empty cart aborts before any write. If the order
//! write succeeds but the cart clear fails, the order stands; the stale
//! cart is logged and corrected by the idempotent clear on the next
//! mutation, never surfaced as a checkout failure.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::carts::CartLocks;
use crate::core::{Config, ServerState};
use crate::db::models::Order;
use crate::db::repository::{CartRepository, OrderRepository};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::order::{OrderItem, OrderStatus, PaymentInfo, Pricing, StatusChange};
use shared::request::PlaceOrderRequest;

/// Receipt number prefix; the rest is a millisecond timestamp plus a
/// random suffix, so concurrent placements cannot mint the same id
/// without sharing a counter.
const RECEIPT_PREFIX: &str = "ORD";
const RECEIPT_SUFFIX_LEN: usize = 6;
/// Unambiguous uppercase alphanumerics (no I/L/O/0/1)
const RECEIPT_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Generate a unique, human-readable order identifier
pub fn generate_receipt_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RECEIPT_SUFFIX_LEN)
        .map(|_| RECEIPT_ALPHABET[rng.gen_range(0..RECEIPT_ALPHABET.len())] as char)
        .collect();
    format!(
        "{RECEIPT_PREFIX}-{}-{}",
        Utc::now().timestamp_millis(),
        suffix
    )
}

/// Price a cart total into the full breakdown.
///
/// Flat delivery fee on any non-empty order, tax rounded half-up from an
/// integer percentage of the subtotal.
pub fn compute_pricing(subtotal: i64, config: &Config) -> Pricing {
    let delivery_fee = if subtotal > 0 { config.delivery_fee } else { 0 };
    let tax = (subtotal * config.tax_rate_percent + 50) / 100;
    Pricing {
        subtotal,
        delivery_fee,
        tax,
        total: subtotal + delivery_fee + tax,
    }
}

/// Order placement service
#[derive(Clone)]
pub struct CheckoutService {
    db: Surreal<Db>,
    locks: Arc<CartLocks>,
    config: Config,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>, locks: Arc<CartLocks>, config: Config) -> Self {
        Self { db, locks, config }
    }

    pub fn from_state(state: &ServerState) -> Self {
        Self::new(state.get_db(), state.cart_locks(), state.config.clone())
    }

    /// Place an order from the user's current cart
    pub async fn place_order(&self, user: &RecordId, req: PlaceOrderRequest) -> AppResult<Order> {
        validate_required_text(&req.delivery.hostel, "delivery.hostel", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.delivery.room, "delivery.room", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.contact.name, "contact.name", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.contact.phone, "contact.phone", MAX_SHORT_TEXT_LEN)?;
        if req.delivery.instructions.len() > MAX_NOTE_LEN {
            return Err(AppError::Validation(
                "delivery.instructions is too long".to_string(),
            ));
        }
        validate_optional_text(
            &req.payment.transaction_id,
            "payment.transaction_id",
            MAX_SHORT_TEXT_LEN,
        )?;
        validate_optional_text(&req.payment.proof_image, "payment.proof_image", MAX_URL_LEN)?;

        let user_key = user.key().to_string();
        // Same lock as the cart mutations: the snapshot and the clear in
        // step 6 must not interleave with a concurrent add_item
        let lock = self.locks.lock_for(&user_key);
        let _guard = lock.lock().await;

        let cart_repo = CartRepository::new(self.db.clone());
        let cart = cart_repo.find(&user_key).await?;
        let cart = match cart {
            Some(c) if !c.is_empty() => c,
            _ => return Err(AppError::InvalidState("Cart is empty".to_string())),
        };

        let pricing = compute_pricing(cart.total(), &self.config);
        let items: Vec<OrderItem> = cart
            .items
            .iter()
            .map(|line| OrderItem {
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
                instructions: line.instructions.clone(),
            })
            .collect();

        let now = Utc::now();
        let actor = user.to_string();
        let order = Order {
            id: None,
            receipt_number: generate_receipt_number(),
            user: user.clone(),
            items,
            delivery: req.delivery,
            contact: req.contact,
            payment: PaymentInfo {
                method: req.payment.method,
                transaction_id: req.payment.transaction_id,
                proof_image: req.payment.proof_image,
                verified: false,
            },
            pricing,
            status: OrderStatus::Received,
            estimated_delivery: now + Duration::minutes(self.config.delivery_lead_minutes),
            admin_notes: None,
            history: vec![StatusChange {
                status: OrderStatus::Received,
                at: now,
                actor: actor.clone(),
                notes: None,
            }],
            created_at: now,
            updated_at: now,
        };

        let order_repo = OrderRepository::new(self.db.clone());
        let created = order_repo.create(order).await?;

        // Non-fatal: the order stands even if the cart clear fails
        if let Err(e) = cart_repo.clear(user).await {
            tracing::warn!(
                user = %actor,
                receipt = %created.receipt_number,
                error = %e,
                "Cart clear failed after order placement; stale cart will be corrected lazily"
            );
        }

        tracing::info!(
            receipt = %created.receipt_number,
            user = %actor,
            total = created.pricing.total,
            "Order placed"
        );

        Ok(created)
    }
}
