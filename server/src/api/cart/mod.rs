//! Cart API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart))
        .route("/add", post(handler::add_item))
        .route("/update/{item_id}", put(handler::update_quantity))
        .route("/remove/{item_id}", delete(handler::remove_item))
        .route("/clear", delete(handler::clear))
}
