//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, ensure_admin};
use crate::checkout::CheckoutService;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::order::OrderPage;
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};
use shared::OrderStatus;
use shared::request::{PlaceOrderRequest, SetStatusRequest};
use shared::response::{ApiResponse, PagedResponse};

const DEFAULT_PAGE_LIMIT: u32 = 10;
const MAX_PAGE_LIMIT: u32 = 50;

/// Query parameters for order listings
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl OrdersQuery {
    fn parts(self) -> AppResult<(Option<OrderStatus>, OrderPage)> {
        let status = match self.status {
            Some(raw) => Some(parse_status(&raw)?),
            None => None,
        };
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        Ok((status, OrderPage { page, limit }))
    }
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    OrderStatus::parse(raw).ok_or_else(|| {
        let allowed: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::Validation(format!(
            "status must be one of: {}",
            allowed.join(", ")
        ))
    })
}

/// POST /orders - place an order from the current cart
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let service = CheckoutService::from_state(&state);
    let order = service.place_order(&user.record_id()?, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(order, "Order placed")),
    ))
}

/// GET /orders - the caller's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrdersQuery>,
) -> AppResult<Json<PagedResponse<Order>>> {
    let (status, page) = query.parts()?;
    let user_id = user.record_id()?;

    let repo = OrderRepository::new(state.get_db());
    let (orders, total) = repo.find_page(Some(&user_id), status, page).await?;

    Ok(Json(PagedResponse::new(orders, page.page, page.limit, total)))
}

/// GET /orders/{order_id}
///
/// Owners see their own orders; admins see everyone's. Anyone else gets
/// the same 404 an absent order would produce.
pub async fn get_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let order = load_owned(&state, &repo, &user, &order_id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// PUT /orders/{order_id}/cancel
///
/// Customer-initiated cancel, only legal while the order is still in its
/// initial state.
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let user_id = user.record_id()?;
    let repo = OrderRepository::new(state.get_db());

    let mut order = repo
        .find(&order_id)
        .await?
        .filter(|o| o.user == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

    if !order.status.customer_can_cancel() {
        return Err(AppError::InvalidState(format!(
            "Order is already {} and can no longer be cancelled",
            order.status
        )));
    }

    order.apply_status(OrderStatus::Cancelled, &user.id, None);
    let order = repo.save(order).await?;

    tracing::info!(receipt = %order.receipt_number, "Order cancelled by customer");
    Ok(Json(ApiResponse::ok_with_message(order, "Order cancelled")))
}

/// GET /orders/admin/all - every order (admin)
pub async fn admin_list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrdersQuery>,
) -> AppResult<Json<PagedResponse<Order>>> {
    ensure_admin(&state, &user).await?;
    let (status, page) = query.parts()?;

    let repo = OrderRepository::new(state.get_db());
    let (orders, total) = repo.find_page(None, status, page).await?;

    Ok(Json(PagedResponse::new(orders, page.page, page.limit, total)))
}

/// PUT /orders/admin/{order_id}/status - set order status (admin)
///
/// Admins may set any status from any other; each call appends exactly
/// one history entry.
pub async fn admin_set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    ensure_admin(&state, &user).await?;

    let new_status = parse_status(&req.status)?;
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.get_db());
    let mut order = repo
        .find(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

    if let Some(ref notes) = req.notes {
        order.admin_notes = Some(notes.clone());
    }
    order.apply_status(new_status, &user.id, req.notes);
    let order = repo.save(order).await?;

    tracing::info!(
        receipt = %order.receipt_number,
        status = %order.status,
        admin = %user.id,
        "Order status updated"
    );
    Ok(Json(ApiResponse::ok(order)))
}

/// DELETE /orders/admin/cancelled - purge cancelled orders (admin)
pub async fn admin_purge_cancelled(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<u64>>> {
    ensure_admin(&state, &user).await?;

    let repo = OrderRepository::new(state.get_db());
    let removed = repo.purge_cancelled().await?;

    tracing::info!(removed, "Cancelled orders purged");
    Ok(Json(ApiResponse::ok_with_message(
        removed,
        "Cancelled orders removed",
    )))
}

/// Load an order enforcing the ownership rule: the owner always passes,
/// an admin bypasses, everyone else sees NotFound.
async fn load_owned(
    state: &ServerState,
    repo: &OrderRepository,
    user: &CurrentUser,
    order_id: &str,
) -> AppResult<Order> {
    let order = repo
        .find(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

    if order.user == user.record_id()? {
        return Ok(order);
    }
    // Not the owner: only a verified admin may read it, and a failed
    // check reads as absence rather than leaking existence
    if ensure_admin(state, user).await.is_ok() {
        return Ok(order);
    }
    Err(AppError::NotFound(format!("Order {} not found", order_id)))
}
