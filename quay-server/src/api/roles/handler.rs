//! Role API Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::models::{Role, RoleCreate, RoleUpdate};

use crate::core::ServerState;
use crate::db::repository::role;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_permissions,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Query filter for role listing
#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    /// If true, return all roles (including inactive)
    /// If false or not specified, return only active roles
    all: Option<bool>,
}

/// GET /api/roles - 获取角色列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<Vec<Role>>> {
    let roles = if query.all.unwrap_or(false) {
        role::find_all_with_inactive(&state.pool).await
    } else {
        role::find_all(&state.pool).await
    }?;
    Ok(Json(roles))
}

/// GET /api/roles/:id - 获取单个角色
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Role>> {
    let role = role::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))?;
    Ok(Json(role))
}

/// POST /api/roles - 创建角色
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<Json<Role>> {
    tracing::info!(role_name = %payload.name, "Creating role");

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_permissions(&payload.permissions)?;

    let r = role::create(&state.pool, payload).await?;
    Ok(Json(r))
}

/// PUT /api/roles/:id - 更新角色
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<Role>> {
    tracing::info!(role_id = %id, "Updating role");

    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(ref permissions) = payload.permissions {
        validate_permissions(permissions)?;
    }

    let r = role::update(&state.pool, id, payload).await?;
    Ok(Json(r))
}

/// DELETE /api/roles/:id - 删除角色
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    tracing::info!(role_id = %id, "Deleting role");
    let result = role::delete(&state.pool, id).await?;
    Ok(Json(result))
}

/// PATCH /api/roles/:id/toggle-status - 切换启用状态
pub async fn toggle_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Role>> {
    let r = role::toggle_status(&state.pool, id).await?;
    tracing::info!(role_id = %id, is_active = r.is_active, "Toggled role status");
    Ok(Json(r))
}

/// GET /api/roles/:id/permissions - 获取角色权限数组
pub async fn get_role_permissions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<String>>> {
    let r = role::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))?;
    Ok(Json(r.permissions))
}

/// PUT /api/roles/:id/permissions - 整组替换角色权限
///
/// 权限编辑器的保存目标：全量替换，不做增量合并。无并发版本号，
/// 后写覆盖先写 (last-write-wins)。
pub async fn update_role_permissions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(permissions): Json<Vec<String>>,
) -> AppResult<Json<Role>> {
    tracing::info!(
        role_id = %id,
        count = permissions.len(),
        "Updating role permissions"
    );

    validate_permissions(&permissions)?;

    let update = RoleUpdate {
        permissions: Some(permissions),
        ..Default::default()
    };
    let r = role::update(&state.pool, id, update).await?;
    Ok(Json(r))
}
