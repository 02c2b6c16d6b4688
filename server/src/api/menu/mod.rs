//! Menu API module
//!
//! Reads are public; mutations require the admin capability (checked in
//! the handlers).

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/menu", menu_routes())
}

fn menu_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/import", post(handler::import))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
