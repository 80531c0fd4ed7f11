//! Data models
//!
//! Shared between quay-server and the console client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod menu;
pub mod role;

// Re-exports
pub use menu::*;
pub use role::*;
