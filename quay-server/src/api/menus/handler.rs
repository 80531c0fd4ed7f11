//! Menu API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::MenuTree;
use shared::models::{
    BatchUpdateResponse, BulkOrderUpdate, MenuNode, MenuNodeCreate, MenuNodeUpdate,
};

use crate::core::ServerState;
use crate::db::repository::menu;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_URL_LEN, validate_icon, validate_menu_name, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Query filter for menu listing
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// `top` returns only active top-level nodes (parent dropdown);
    /// omitted returns the full flat list (all types, all statuses)
    #[serde(rename = "type")]
    menu_type: Option<String>,
}

/// GET /api/menus - 获取菜单节点列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuNode>>> {
    let nodes = match query.menu_type.as_deref() {
        None => menu::find_all(&state.pool).await?,
        Some("top") => menu::find_top_level(&state.pool).await?,
        Some(other) => {
            return Err(AppError::invalid_request(format!(
                "Unknown menu type filter '{other}'"
            )));
        }
    };
    Ok(Json(nodes))
}

/// GET /api/menus/tree - 获取两级导航树
pub async fn tree(State(state): State<ServerState>) -> AppResult<Json<MenuTree>> {
    let nodes = menu::find_all(&state.pool).await?;
    Ok(Json(MenuTree::build(&nodes)))
}

/// GET /api/menus/:id - 获取单个菜单节点
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuNode>> {
    let node = menu::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu node {id} not found")))?;
    Ok(Json(node))
}

/// POST /api/menus - 创建菜单节点
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuNodeCreate>,
) -> AppResult<Json<MenuNode>> {
    tracing::info!(
        name = %payload.name,
        menu_type = ?payload.menu_type,
        parent_id = ?payload.parent_id,
        "Creating menu node"
    );

    validate_menu_name(&payload.name)?;
    validate_required_text(&payload.label, "label", MAX_NAME_LEN)?;
    validate_icon(&payload.icon)?;
    validate_optional_text(&payload.route, "route", MAX_URL_LEN)?;

    let node = menu::create(&state.pool, payload).await?;
    Ok(Json(node))
}

/// PUT /api/menus/:id - 更新菜单节点
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuNodeUpdate>,
) -> AppResult<Json<MenuNode>> {
    tracing::info!(menu_id = %id, "Updating menu node");

    if let Some(ref name) = payload.name {
        validate_menu_name(name)?;
    }
    if let Some(ref label) = payload.label {
        validate_required_text(label, "label", MAX_NAME_LEN)?;
    }
    validate_icon(&payload.icon)?;
    validate_optional_text(&payload.route, "route", MAX_URL_LEN)?;

    let node = menu::update(&state.pool, id, payload).await?;
    Ok(Json(node))
}

/// PATCH /api/menus/:id/toggle-status - 切换启用状态
pub async fn toggle_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuNode>> {
    let node = menu::toggle_status(&state.pool, id).await?;
    tracing::info!(
        menu_id = %id,
        is_active = node.is_active,
        "Toggled menu node status"
    );
    Ok(Json(node))
}

/// PATCH /api/menus/bulk-update-order - 批量更新排序
///
/// 重排协调器的提交目标：整批落库，单事务内全部成功或全部回滚。
pub async fn bulk_update_order(
    State(state): State<ServerState>,
    Json(payload): Json<BulkOrderUpdate>,
) -> AppResult<Json<BatchUpdateResponse>> {
    tracing::info!(count = payload.updates.len(), "Bulk sort order update");

    if payload.updates.is_empty() {
        return Ok(Json(BatchUpdateResponse { updated: 0 }));
    }

    let updated = menu::bulk_update_sort_order(&state.pool, &payload.updates).await?;

    tracing::info!(updated, "Bulk sort order update committed");
    Ok(Json(BatchUpdateResponse { updated }))
}
