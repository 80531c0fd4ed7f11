//! Menu tree builder
//!
//! Builds the two-level navigation tree from the flat `menu_node` list.
//! The tree is an immutable snapshot: any edit triggers a rebuild from the
//! authoritative flat list, the snapshot itself is never mutated.
//!
//! 构建规则：
//! - 只收录 `is_active` 的 GLink 作为顶级行（同时也是新建 PLink 的父候选）
//! - 每个顶级行挂接其 `is_active` 的 PLink 子节点
//! - 两级均按 `(sort_order, id)` 升序排序（sort_order 在重排提交前
//!   不保证唯一，id 兜底保证确定性）
//!
//! A sub-node whose parent is missing or inactive is orphaned: excluded
//! from the tree but still a valid permission target for historical
//! grants. Tree construction never fails on dangling references.

use serde::{Deserialize, Serialize};

use crate::models::{MenuNode, MenuType};
use crate::permission::MenuTarget;

/// One top-level row with its ordered children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTreeNode {
    pub node: MenuNode,
    pub children: Vec<MenuNode>,
}

/// Immutable two-level tree snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuTree {
    roots: Vec<MenuTreeNode>,
}

impl MenuTree {
    /// Build a snapshot from the flat node list
    pub fn build(nodes: &[MenuNode]) -> Self {
        let mut tops: Vec<&MenuNode> = nodes
            .iter()
            .filter(|n| n.menu_type == MenuType::Top && n.is_active)
            .collect();
        sort_siblings(&mut tops);

        let roots = tops
            .into_iter()
            .map(|top| {
                let mut children: Vec<&MenuNode> = nodes
                    .iter()
                    .filter(|n| {
                        n.menu_type == MenuType::Sub
                            && n.is_active
                            && n.parent_id == Some(top.id)
                    })
                    .collect();
                sort_siblings(&mut children);
                MenuTreeNode {
                    node: top.clone(),
                    children: children.into_iter().cloned().collect(),
                }
            })
            .collect();

        Self { roots }
    }

    /// Top-level rows in display order
    pub fn roots(&self) -> &[MenuTreeNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Enumerate all permission targets in display order: each top-level
    /// row followed by its children as `(top, sub)` pairs.
    pub fn targets(&self) -> Vec<MenuTarget> {
        let mut targets = Vec::new();
        for root in &self.roots {
            targets.push(MenuTarget::top(&root.node.name));
            for child in &root.children {
                targets.push(MenuTarget::sub(&root.node.name, &child.name));
            }
        }
        targets
    }
}

fn sort_siblings(nodes: &mut [&MenuNode]) {
    nodes.sort_by_key(|n| (n.sort_order, n.id));
}
