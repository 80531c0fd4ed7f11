//! Reorder reconciler
//!
//! 菜单构建器的拖拽重排：本地累积移动，整批提交，不逐次请求。
//!
//! The board holds the last-fetched authoritative order as its baseline
//! and a working copy the user rearranges. `compute_updates` always
//! re-issues a dense 1-based ordering for the whole working sequence
//! regardless of the nodes' prior values (no minimal diff). A commit is
//! all-or-nothing: on transport failure the working sequence is retained
//! for retry or discard.

use shared::models::{MenuNode, SortOrderUpdate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("index {index} out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },
}

/// Drag-reorder working set for top-level menu nodes
#[derive(Debug, Clone)]
pub struct ReorderBoard {
    /// Last-fetched authoritative order, sorted by `(sort_order, id)`
    baseline: Vec<MenuNode>,
    working: Vec<MenuNode>,
    dirty: bool,
}

impl ReorderBoard {
    /// Load the authoritative node list; ordering is normalized to
    /// `(sort_order, id)` ascending (sort_order may carry duplicates
    /// before a reorder commit)
    pub fn load(mut nodes: Vec<MenuNode>) -> Self {
        nodes.sort_by_key(|n| (n.sort_order, n.id));
        Self {
            baseline: nodes.clone(),
            working: nodes,
            dirty: false,
        }
    }

    /// Current working sequence, in display order
    pub fn working(&self) -> &[MenuNode] {
        &self.working
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Standard array move: remove at `from`, reinsert at `to`
    pub fn apply_move(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        let len = self.working.len();
        if from >= len {
            return Err(ReorderError::OutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(ReorderError::OutOfBounds { index: to, len });
        }
        let node = self.working.remove(from);
        self.working.insert(to, node);
        self.dirty = true;
        Ok(())
    }

    /// Update records for the full working sequence: position `i` gets
    /// `sort_order = i + 1`, always dense 1..N
    pub fn compute_updates(&self) -> Vec<SortOrderUpdate> {
        self.working
            .iter()
            .enumerate()
            .map(|(i, node)| SortOrderUpdate {
                id: node.id,
                sort_order: i as i32 + 1,
            })
            .collect()
    }

    /// Restore the last-fetched authoritative order; no network call
    pub fn discard(&mut self) {
        self.working = self.baseline.clone();
        self.dirty = false;
    }

    /// The batch was persisted: the working sequence (with its dense
    /// orders applied) becomes the new authoritative baseline
    pub fn commit_succeeded(&mut self) {
        for (i, node) in self.working.iter_mut().enumerate() {
            node.sort_order = i as i32 + 1;
        }
        self.baseline = self.working.clone();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuType;

    fn node(id: i64, name: &str, sort_order: i32) -> MenuNode {
        MenuNode {
            id,
            name: name.to_string(),
            label: name.to_uppercase(),
            icon: None,
            route: None,
            menu_type: MenuType::Top,
            parent_id: None,
            sort_order,
            is_active: true,
        }
    }

    fn board() -> ReorderBoard {
        ReorderBoard::load(vec![
            node(1, "a", 1),
            node(2, "b", 2),
            node(3, "c", 3),
        ])
    }

    #[test]
    fn load_sorts_by_sort_order_then_id() {
        let b = ReorderBoard::load(vec![node(9, "x", 2), node(3, "y", 2), node(5, "z", 1)]);
        let ids: Vec<i64> = b.working().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
        assert!(!b.has_unsaved_changes());
    }

    #[test]
    fn move_last_to_front() {
        // [A(1), B(2), C(3)], C → index 0
        let mut b = board();
        b.apply_move(2, 0).unwrap();
        assert!(b.has_unsaved_changes());
        assert_eq!(
            b.compute_updates(),
            vec![
                SortOrderUpdate { id: 3, sort_order: 1 },
                SortOrderUpdate { id: 1, sort_order: 2 },
                SortOrderUpdate { id: 2, sort_order: 3 },
            ]
        );
    }

    #[test]
    fn updates_are_always_dense_one_based() {
        // Stale, gappy sort orders still re-issue 1..N
        let mut b = ReorderBoard::load(vec![
            node(4, "d", 10),
            node(8, "e", 25),
            node(2, "f", 25),
            node(6, "g", 40),
        ]);
        b.apply_move(0, 3).unwrap();
        let orders: Vec<i32> = b.compute_updates().iter().map(|u| u.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut b = board();
        assert_eq!(
            b.apply_move(3, 0),
            Err(ReorderError::OutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            b.apply_move(0, 7),
            Err(ReorderError::OutOfBounds { index: 7, len: 3 })
        );
        assert!(!b.has_unsaved_changes());
    }

    #[test]
    fn discard_restores_baseline_after_any_moves() {
        let mut b = board();
        b.apply_move(0, 2).unwrap();
        b.apply_move(1, 0).unwrap();
        b.discard();
        let ids: Vec<i64> = b.working().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!b.has_unsaved_changes());
    }

    #[test]
    fn commit_promotes_working_to_baseline() {
        let mut b = board();
        b.apply_move(2, 0).unwrap();
        b.commit_succeeded();
        assert!(!b.has_unsaved_changes());
        assert_eq!(b.working()[0].sort_order, 1);

        // Discard now restores the committed order, not the original one
        b.apply_move(0, 1).unwrap();
        b.discard();
        let ids: Vec<i64> = b.working().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
