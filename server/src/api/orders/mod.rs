//! Orders API module
//!
//! Customer checkout/query/cancel plus the admin status workflow under
//! `/orders/admin/`.

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::place))
        .route("/admin/all", get(handler::admin_list))
        .route("/admin/cancelled", delete(handler::admin_purge_cancelled))
        .route("/admin/{order_id}/status", put(handler::admin_set_status))
        .route("/{order_id}", get(handler::get_order))
        .route("/{order_id}/cancel", put(handler::cancel))
}
