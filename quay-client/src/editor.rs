//! Permission editor state machine
//!
//! 角色权限编辑器：`NoRoleSelected` → `RoleLoaded` → `Dirty` → `Saving`，
//! 保存成功回到 `RoleLoaded`，失败保留 `Dirty` (待定数组不丢，用户可重试)。
//!
//! Every checkbox toggle is a pure [`shared::permission::set_level`] call
//! over the full pending array, so toggles on different targets never
//! interfere and re-toggling the same box is idempotent. The dirty flag is
//! a true diff against the persisted baseline (order-insensitive): toggling
//! a level on and back off returns the editor to `RoleLoaded`.
//!
//! Expanding/collapsing a top-level row is pure UI state and never touches
//! the permission array.

use std::collections::HashSet;

use shared::models::Role;
use shared::permission::{AccessLevel, LevelSet, MenuTarget, levels_for, set_level};
use shared::MenuTree;
use thiserror::Error;

/// Editor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    NoRoleSelected,
    RoleLoaded,
    Dirty,
    Saving,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("no role selected")]
    NoRoleSelected,

    #[error("role is inactive and cannot be edited")]
    RoleInactive,

    #[error("a save is already in flight")]
    SaveInProgress,

    #[error("nothing to save")]
    NothingToSave,

    #[error("no save in flight")]
    NotSaving,
}

/// Role permission editor
#[derive(Debug)]
pub struct PermissionEditor {
    state: EditorState,
    role: Option<Role>,
    tree: MenuTree,
    /// Working permission array (pending until save succeeds)
    pending: Vec<String>,
    /// Expanded top-level rows (UI state only)
    expanded: HashSet<String>,
}

impl PermissionEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::NoRoleSelected,
            role: None,
            tree: MenuTree::default(),
            pending: Vec::new(),
            expanded: HashSet::new(),
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// The selected role (baseline permissions, not the pending array)
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Working permission array
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self.state, EditorState::Dirty)
    }

    /// Load a role and the menu tree; baseline = the role's saved array.
    ///
    /// Inactive roles are not selectable for editing.
    pub fn select_role(&mut self, role: Role, tree: MenuTree) -> Result<(), EditorError> {
        if self.state == EditorState::Saving {
            return Err(EditorError::SaveInProgress);
        }
        if !role.is_active {
            return Err(EditorError::RoleInactive);
        }
        self.pending = role.permissions.clone();
        self.role = Some(role);
        self.tree = tree;
        self.state = EditorState::RoleLoaded;
        Ok(())
    }

    /// Drop the selection and all pending edits
    pub fn clear_selection(&mut self) -> Result<(), EditorError> {
        if self.state == EditorState::Saving {
            return Err(EditorError::SaveInProgress);
        }
        self.role = None;
        self.pending.clear();
        self.tree = MenuTree::default();
        self.state = EditorState::NoRoleSelected;
        Ok(())
    }

    /// Permission targets offered by the loaded tree, in display order
    pub fn targets(&self) -> Vec<MenuTarget> {
        self.tree.targets()
    }

    /// Levels currently checked for `target` in the working array
    pub fn levels_for(&self, target: &MenuTarget) -> LevelSet {
        levels_for(&self.pending, target)
    }

    /// Toggle one capability checkbox.
    ///
    /// Pure transformation of the working array; transitions to `Dirty`,
    /// or back to `RoleLoaded` when the result matches the baseline again.
    pub fn toggle(
        &mut self,
        target: &MenuTarget,
        level: AccessLevel,
        enabled: bool,
    ) -> Result<(), EditorError> {
        match self.state {
            EditorState::NoRoleSelected => return Err(EditorError::NoRoleSelected),
            EditorState::Saving => return Err(EditorError::SaveInProgress),
            EditorState::RoleLoaded | EditorState::Dirty => {}
        }

        self.pending = set_level(&self.pending, target, level, enabled);
        self.state = if self.differs_from_baseline() {
            EditorState::Dirty
        } else {
            EditorState::RoleLoaded
        };
        Ok(())
    }

    /// Revert pending edits to the persisted baseline (user decision)
    pub fn discard(&mut self) -> Result<(), EditorError> {
        match self.state {
            EditorState::NoRoleSelected => return Err(EditorError::NoRoleSelected),
            EditorState::Saving => return Err(EditorError::SaveInProgress),
            EditorState::RoleLoaded | EditorState::Dirty => {}
        }
        if let Some(role) = &self.role {
            self.pending = role.permissions.clone();
        }
        self.state = EditorState::RoleLoaded;
        Ok(())
    }

    /// Enter `Saving`, yielding the full array for a whole-array PUT
    pub fn begin_save(&mut self) -> Result<Vec<String>, EditorError> {
        match self.state {
            EditorState::NoRoleSelected => Err(EditorError::NoRoleSelected),
            EditorState::Saving => Err(EditorError::SaveInProgress),
            EditorState::RoleLoaded => Err(EditorError::NothingToSave),
            EditorState::Dirty => {
                self.state = EditorState::Saving;
                Ok(self.pending.clone())
            }
        }
    }

    /// Persistence succeeded: pending becomes the new baseline
    pub fn save_succeeded(&mut self) -> Result<(), EditorError> {
        if self.state != EditorState::Saving {
            return Err(EditorError::NotSaving);
        }
        if let Some(role) = &mut self.role {
            role.permissions = self.pending.clone();
        }
        self.state = EditorState::RoleLoaded;
        Ok(())
    }

    /// Persistence failed: stay dirty with the same pending array so the
    /// user may retry without re-entering input
    pub fn save_failed(&mut self) -> Result<(), EditorError> {
        if self.state != EditorState::Saving {
            return Err(EditorError::NotSaving);
        }
        self.state = EditorState::Dirty;
        Ok(())
    }

    /// Expand/collapse a top-level row (any state, permissions untouched)
    pub fn toggle_expanded(&mut self, top_name: &str) {
        if !self.expanded.remove(top_name) {
            self.expanded.insert(top_name.to_string());
        }
    }

    pub fn is_expanded(&self, top_name: &str) -> bool {
        self.expanded.contains(top_name)
    }

    /// Order-insensitive diff of pending vs baseline
    fn differs_from_baseline(&self) -> bool {
        let Some(role) = &self.role else {
            return false;
        };
        let mut pending = self.pending.clone();
        let mut baseline = role.permissions.clone();
        pending.sort();
        baseline.sort();
        pending != baseline
    }
}

impl Default for PermissionEditor {
    fn default() -> Self {
        Self::new()
    }
}
