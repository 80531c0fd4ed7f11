//! Menu Node Model
//!
//! 导航菜单节点：两级树结构 (GLink 顶级 / PLink 子级)。
//! `name` 是权限授权的目标键，全局唯一。

use serde::{Deserialize, Serialize};

/// Fixed icon set for menu nodes.
///
/// `icon` must be one of these symbolic names when present.
pub const ICON_SET: &[&str] = &[
    "dashboard",
    "anchor",
    "ship",
    "container",
    "terminal",
    "berth",
    "organization",
    "customers",
    "contract",
    "users",
    "shield",
    "settings",
    "menu",
    "database",
    "file",
    "chart",
];

/// Validate if an icon name belongs to the fixed icon set
pub fn is_valid_icon(icon: &str) -> bool {
    ICON_SET.contains(&icon)
}

/// Menu node kind (两级树，创建后不可变更)
///
/// Wire/DB strings keep the legacy names: `GLink` for top-level rows,
/// `PLink` for sub-level rows attached to exactly one GLink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MenuType {
    #[serde(rename = "GLink")]
    #[cfg_attr(feature = "db", sqlx(rename = "GLink"))]
    Top,
    #[serde(rename = "PLink")]
    #[cfg_attr(feature = "db", sqlx(rename = "PLink"))]
    Sub,
}

/// Menu node entity
///
/// `parent_id` is `None` for `Top` nodes and must reference an existing
/// `Top` node for `Sub` nodes. `sort_order` is sibling order; it is only
/// guaranteed dense (1..N) right after a bulk reorder commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuNode {
    pub id: i64,
    /// Unique lowercase identifier, the permission-target key.
    /// Must not contain `:` (grant string delimiter).
    pub name: String,
    pub label: String,
    pub icon: Option<String>,
    /// URL path, absolute or templated (e.g. "/ports/:id/berths")
    pub route: Option<String>,
    pub menu_type: MenuType,
    pub parent_id: Option<i64>,
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create menu node payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuNodeCreate {
    pub name: String,
    pub label: String,
    pub icon: Option<String>,
    pub route: Option<String>,
    pub menu_type: MenuType,
    pub parent_id: Option<i64>,
    pub sort_order: Option<i32>,
}

/// Update menu node payload
///
/// `menu_type` and `parent_id` are fixed at creation and not updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuNodeUpdate {
    pub name: Option<String>,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub route: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// One entry of a batch sort-order update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderUpdate {
    pub id: i64,
    pub sort_order: i32,
}

/// Batch sort-order request body (`PATCH /api/menus/bulk-update-order`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOrderUpdate {
    pub updates: Vec<SortOrderUpdate>,
}

/// Batch update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUpdateResponse {
    pub updated: usize,
}
