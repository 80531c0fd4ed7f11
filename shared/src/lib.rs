//! Shared types for the Quayside console
//!
//! Common types used by both the server and the console client: menu and
//! role models, the permission grant-string codec, and the menu tree
//! builder. Pure logic only; transport and storage live in the consuming
//! crates.

pub mod menu_tree;
pub mod models;
pub mod permission;

// Re-exports
pub use menu_tree::{MenuTree, MenuTreeNode};
pub use permission::{AccessLevel, LevelSet, MenuTarget};
