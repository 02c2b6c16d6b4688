//! Cart API Handlers
//!
//! Thin wrappers over [`CartService`]; every endpoint answers with the
//! whole cart so clients never need a follow-up read.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::carts::CartService;
use crate::core::ServerState;
use crate::db::models::CartView;
use crate::utils::AppResult;
use shared::request::{AddToCartRequest, UpdateQuantityRequest};
use shared::response::ApiResponse;

/// GET /cart
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let service = CartService::from_state(&state);
    let cart = service.get(&user.record_id()?).await?;
    Ok(Json(ApiResponse::ok(cart.into())))
}

/// POST /cart/add
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let service = CartService::from_state(&state);
    let cart = service
        .add_item(
            &user.record_id()?,
            &req.menu_item_id,
            req.name,
            req.price,
            req.quantity,
            req.instructions,
        )
        .await?;
    Ok(Json(ApiResponse::ok(cart.into())))
}

/// PUT /cart/update/{item_id}
pub async fn update_quantity(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let service = CartService::from_state(&state);
    let cart = service
        .update_quantity(&user.record_id()?, &item_id, req.quantity)
        .await?;
    Ok(Json(ApiResponse::ok(cart.into())))
}

/// DELETE /cart/remove/{item_id}
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let service = CartService::from_state(&state);
    let cart = service.remove_item(&user.record_id()?, &item_id).await?;
    Ok(Json(ApiResponse::ok(cart.into())))
}

/// DELETE /cart/clear
pub async fn clear(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let service = CartService::from_state(&state);
    let cart = service.clear(&user.record_id()?).await?;
    Ok(Json(ApiResponse::ok(cart.into())))
}
