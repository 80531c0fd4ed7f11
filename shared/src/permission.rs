//! Permission grant-string codec
//!
//! 角色权限以紧凑字符串数组存储，每个条目授权一个菜单目标：
//!
//! - `"<top>:<levels>"` - 顶级菜单授权 (2 段)
//! - `"<top>:<sub>:<levels>"` - 子级菜单授权 (3 段)
//!
//! `levels` is a comma-joined, non-empty subset of `read,write,manage`.
//! Segment count is the only disambiguator between the two shapes, which
//! is why menu names must never contain `:`.
//!
//! In memory the relation is typed ([`MenuTarget`] → [`LevelSet`]); the
//! colon string exists only at the storage boundary. All write operations
//! are pure: they take the stored array by reference and return a new one,
//! so callers can diff proposed-vs-persisted state.
//!
//! Entries that do not parse (wrong segment count, empty segment, unknown
//! level token) decode as "no grant" but are preserved verbatim by every
//! write; unknown data is never silently dropped.

use serde::{Deserialize, Serialize};

/// Capability level granted on one menu target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Read,
    Write,
    Manage,
}

impl AccessLevel {
    /// All levels in canonical output order
    pub const ALL: [AccessLevel; 3] = [AccessLevel::Read, AccessLevel::Write, AccessLevel::Manage];

    /// Wire token for this level
    pub fn token(self) -> &'static str {
        match self {
            AccessLevel::Read => "read",
            AccessLevel::Write => "write",
            AccessLevel::Manage => "manage",
        }
    }

    /// Parse a wire token; `None` for unknown tokens
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "read" => Some(AccessLevel::Read),
            "write" => Some(AccessLevel::Write),
            "manage" => Some(AccessLevel::Manage),
            _ => None,
        }
    }
}

/// Set of capability levels
///
/// Formats in the stable order `read,write,manage` regardless of the order
/// levels were granted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSet {
    read: bool,
    write: bool,
    manage: bool,
}

impl LevelSet {
    /// The empty set (no grant)
    pub fn empty() -> Self {
        Self::default()
    }

    /// All three levels
    pub fn all() -> Self {
        Self {
            read: true,
            write: true,
            manage: true,
        }
    }

    pub fn is_empty(self) -> bool {
        !self.read && !self.write && !self.manage
    }

    pub fn contains(self, level: AccessLevel) -> bool {
        match level {
            AccessLevel::Read => self.read,
            AccessLevel::Write => self.write,
            AccessLevel::Manage => self.manage,
        }
    }

    /// Set or clear one level
    pub fn set(&mut self, level: AccessLevel, enabled: bool) {
        match level {
            AccessLevel::Read => self.read = enabled,
            AccessLevel::Write => self.write = enabled,
            AccessLevel::Manage => self.manage = enabled,
        }
    }

    pub fn insert(&mut self, level: AccessLevel) {
        self.set(level, true);
    }

    /// Levels contained in this set, in canonical order
    pub fn iter(self) -> impl Iterator<Item = AccessLevel> {
        AccessLevel::ALL.into_iter().filter(move |l| self.contains(*l))
    }

    /// Parse the `levels` segment of a grant string.
    ///
    /// `None` if the segment is empty or contains an unknown token.
    pub fn parse(segment: &str) -> Option<Self> {
        if segment.is_empty() {
            return None;
        }
        let mut set = LevelSet::empty();
        for token in segment.split(',') {
            set.insert(AccessLevel::parse(token)?);
        }
        Some(set)
    }

    /// Format as the comma-joined `levels` segment
    pub fn format(self) -> String {
        let tokens: Vec<&str> = self.iter().map(AccessLevel::token).collect();
        tokens.join(",")
    }
}

impl FromIterator<AccessLevel> for LevelSet {
    fn from_iter<I: IntoIterator<Item = AccessLevel>>(iter: I) -> Self {
        let mut set = LevelSet::empty();
        for level in iter {
            set.insert(level);
        }
        set
    }
}

/// One menu target: a top-level node alone, or a (top, sub) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuTarget {
    pub top: String,
    pub sub: Option<String>,
}

impl MenuTarget {
    /// Target a top-level node
    pub fn top(name: impl Into<String>) -> Self {
        Self {
            top: name.into(),
            sub: None,
        }
    }

    /// Target a sub-level node, scoped under its top-level name
    pub fn sub(top: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            sub: Some(sub.into()),
        }
    }
}

impl std::fmt::Display for MenuTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sub {
            Some(sub) => write!(f, "{}:{}", self.top, sub),
            None => write!(f, "{}", self.top),
        }
    }
}

/// Decode one grant string into its target and levels.
///
/// Returns `None` for entries this codec does not understand. Such entries
/// are still legal array members; see [`set_level`].
pub fn parse_grant(entry: &str) -> Option<(MenuTarget, LevelSet)> {
    let segments: Vec<&str> = entry.split(':').collect();
    let (target, levels_segment) = match segments.as_slice() {
        [top, levels] => (MenuTarget::top(*top), *levels),
        [top, sub, levels] => (MenuTarget::sub(*top, *sub), *levels),
        _ => return None,
    };
    if target.top.is_empty() || target.sub.as_deref() == Some("") {
        return None;
    }
    let levels = LevelSet::parse(levels_segment)?;
    Some((target, levels))
}

/// Encode a grant string for `target` with `levels`.
///
/// Callers must not pass an empty set; an empty-levels grant is never
/// persisted (revoking the last level removes the entry instead).
pub fn format_grant(target: &MenuTarget, levels: LevelSet) -> String {
    match &target.sub {
        Some(sub) => format!("{}:{}:{}", target.top, sub, levels.format()),
        None => format!("{}:{}", target.top, levels.format()),
    }
}

/// Look up the levels currently granted on `target`.
///
/// Normally at most one entry matches; if legacy data carries duplicates,
/// the union is returned. Absence decodes to the empty set.
pub fn levels_for(permissions: &[String], target: &MenuTarget) -> LevelSet {
    permissions
        .iter()
        .filter_map(|entry| parse_grant(entry))
        .filter(|(t, _)| t == target)
        .map(|(_, levels)| levels)
        .fold(LevelSet::empty(), |mut acc, levels| {
            for level in levels.iter() {
                acc.insert(level);
            }
            acc
        })
}

/// Whether `level` is granted on `target`
pub fn has_level(permissions: &[String], target: &MenuTarget, level: AccessLevel) -> bool {
    levels_for(permissions, target).contains(level)
}

/// Toggle one capability level on one target, returning the new array.
///
/// Every entry decoding to `target` is removed (this also collapses
/// duplicate entries left behind by legacy writers), the level is flipped
/// on the union of their sets, and a single re-encoded entry is appended,
/// unless the resulting set is empty, in which case the target vanishes
/// from the array entirely. Entries for other targets and unparseable
/// entries are carried over untouched, in order.
pub fn set_level(
    permissions: &[String],
    target: &MenuTarget,
    level: AccessLevel,
    enabled: bool,
) -> Vec<String> {
    let mut result = Vec::with_capacity(permissions.len() + 1);
    let mut levels = LevelSet::empty();

    for entry in permissions {
        match parse_grant(entry) {
            Some((t, entry_levels)) if &t == target => {
                for l in entry_levels.iter() {
                    levels.insert(l);
                }
            }
            _ => result.push(entry.clone()),
        }
    }

    levels.set(level, enabled);

    if !levels.is_empty() {
        result.push(format_grant(target, levels));
    }
    result
}
