//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menus`] - 导航菜单管理接口 (树、排序、状态切换)
//! - [`roles`] - 角色与权限管理接口

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod health;
pub mod menus;
pub mod roles;

/// Assemble the full API router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(menus::router())
        .merge(roles::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
