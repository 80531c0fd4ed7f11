//! Quayside console client
//!
//! 控制台前端的数据层：REST 客户端加两个本地状态机。
//!
//! - [`NetworkClient`] - HTTP 客户端 (菜单/角色接口)
//! - [`PermissionEditor`] - 角色权限编辑器状态机
//! - [`ReorderBoard`] - 菜单拖拽重排协调器
//!
//! The state machines are synchronous, pure array transformations; the
//! only async boundary is the persistence call on [`NetworkClient`].

pub mod client;
pub mod editor;
pub mod error;
pub mod reorder;

// Re-exports
pub use client::NetworkClient;
pub use editor::{EditorError, EditorState, PermissionEditor};
pub use error::{ClientError, ClientResult};
pub use reorder::{ReorderBoard, ReorderError};
