//! Menu API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menus", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/tree", get(handler::tree))
        // Batch sort order update (must be before /{id} to avoid path conflicts)
        .route("/bulk-update-order", patch(handler::bulk_update_order))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/toggle-status", patch(handler::toggle_status))
}
