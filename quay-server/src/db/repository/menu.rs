//! Menu Node Repository
//!
//! Source of truth for the flat menu node list and its sort order. Tree
//! shape rules (two levels, `parent_id` null for GLink, active GLink
//! parent for PLink) are enforced here on the write path.

use shared::models::{MenuNode, MenuNodeCreate, MenuNodeUpdate, MenuType, SortOrderUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str =
    "id, name, label, icon, route, menu_type, parent_id, sort_order, is_active";

/// All nodes, every type and status (Tree Builder input)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuNode>> {
    let nodes = sqlx::query_as::<_, MenuNode>(&format!(
        "SELECT {COLUMNS} FROM menu_node ORDER BY sort_order, id",
    ))
    .fetch_all(pool)
    .await?;
    Ok(nodes)
}

/// Active top-level nodes, in display order (parent-candidate list)
pub async fn find_top_level(pool: &SqlitePool) -> RepoResult<Vec<MenuNode>> {
    let nodes = sqlx::query_as::<_, MenuNode>(&format!(
        "SELECT {COLUMNS} FROM menu_node WHERE menu_type = 'GLink' AND is_active = 1 ORDER BY sort_order, id",
    ))
    .fetch_all(pool)
    .await?;
    Ok(nodes)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuNode>> {
    let node = sqlx::query_as::<_, MenuNode>(&format!(
        "SELECT {COLUMNS} FROM menu_node WHERE id = ?",
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(node)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<MenuNode>> {
    let node = sqlx::query_as::<_, MenuNode>(&format!(
        "SELECT {COLUMNS} FROM menu_node WHERE name = ? LIMIT 1",
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(node)
}

/// Check the `parent_id` rules for the node's type.
///
/// GLink nodes must not carry a parent; PLink nodes must reference an
/// existing, active GLink (a PLink can never parent another PLink).
async fn check_parent(
    pool: &SqlitePool,
    menu_type: MenuType,
    parent_id: Option<i64>,
) -> RepoResult<()> {
    match (menu_type, parent_id) {
        (MenuType::Top, None) => Ok(()),
        (MenuType::Top, Some(_)) => Err(RepoError::Validation(
            "Top-level menu nodes must not have a parent".into(),
        )),
        (MenuType::Sub, None) => Err(RepoError::Validation(
            "Sub-level menu nodes require a parent".into(),
        )),
        (MenuType::Sub, Some(parent_id)) => {
            let parent = find_by_id(pool, parent_id)
                .await?
                .ok_or_else(|| RepoError::Validation(format!("Parent {parent_id} not found")))?;
            if parent.menu_type != MenuType::Top {
                return Err(RepoError::Validation(
                    "Parent must be a top-level menu node".into(),
                ));
            }
            if !parent.is_active {
                return Err(RepoError::Validation(format!(
                    "Parent '{}' is inactive",
                    parent.name
                )));
            }
            Ok(())
        }
    }
}

pub async fn create(pool: &SqlitePool, data: MenuNodeCreate) -> RepoResult<MenuNode> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Menu node '{}' already exists",
            data.name
        )));
    }
    check_parent(pool, data.menu_type, data.parent_id).await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_node (name, label, icon, route, menu_type, parent_id, sort_order) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.label)
    .bind(&data.icon)
    .bind(&data.route)
    .bind(data.menu_type)
    .bind(data.parent_id)
    .bind(data.sort_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu node".into()))
}

/// Update a node. `menu_type` and `parent_id` are fixed at creation.
pub async fn update(pool: &SqlitePool, id: i64, data: MenuNodeUpdate) -> RepoResult<MenuNode> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu node {id} not found")))?;

    // Renaming orphans any grant strings naming the old key; tolerated
    if let Some(ref new_name) = data.name
        && new_name != &existing.name
        && find_by_name(pool, new_name).await?.is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Menu node '{new_name}' already exists"
        )));
    }

    let rows = sqlx::query(
        "UPDATE menu_node SET \
            name = COALESCE(?1, name), \
            label = COALESCE(?2, label), \
            icon = COALESCE(?3, icon), \
            route = COALESCE(?4, route), \
            sort_order = COALESCE(?5, sort_order), \
            is_active = COALESCE(?6, is_active) \
         WHERE id = ?7",
    )
    .bind(data.name)
    .bind(data.label)
    .bind(data.icon)
    .bind(data.route)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu node {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu node {id} not found")))
}

/// Flip `is_active`
pub async fn toggle_status(pool: &SqlitePool, id: i64) -> RepoResult<MenuNode> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu node {id} not found")))?;

    sqlx::query("UPDATE menu_node SET is_active = ? WHERE id = ?")
        .bind(!existing.is_active)
        .bind(id)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu node {id} not found")))
}

/// Apply a batch of sort-order updates in one transaction.
///
/// All-or-nothing: an unknown id rolls the whole batch back, so a retry
/// resends the full batch against unchanged state.
pub async fn bulk_update_sort_order(
    pool: &SqlitePool,
    updates: &[SortOrderUpdate],
) -> RepoResult<usize> {
    let mut tx = pool.begin().await?;

    for update in updates {
        let rows = sqlx::query("UPDATE menu_node SET sort_order = ? WHERE id = ?")
            .bind(update.sort_order)
            .bind(update.id)
            .execute(&mut *tx)
            .await?;
        if rows.rows_affected() == 0 {
            // Implicit rollback on drop
            return Err(RepoError::NotFound(format!(
                "Menu node {} not found",
                update.id
            )));
        }
    }

    tx.commit().await?;
    Ok(updates.len())
}

/// Hard delete (admin tooling; deactivation is the supported path).
///
/// Refuses to delete a top-level node that still has active children.
/// Grant strings naming the deleted node become orphans and are tolerated.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu node {id} not found")))?;

    if existing.menu_type == MenuType::Top {
        let children = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM menu_node WHERE parent_id = ? AND is_active = 1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        if children > 0 {
            return Err(RepoError::Validation(
                "Cannot delete a menu node with active children".into(),
            ));
        }
    }

    sqlx::query("DELETE FROM menu_node WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
