//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Validation
//! failures surface as [`AppError::Validation`] before anything reaches
//! the persistence boundary.

use shared::models::is_valid_icon;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names and display labels
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Routes / URL paths
pub const MAX_URL_LEN: usize = 2048;

/// Single permission grant string
pub const MAX_GRANT_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a menu node name.
///
/// The name doubles as the permission-target key inside grant strings, so
/// it must be lowercase, without whitespace, and must never contain the
/// `:` delimiter. Allowed characters: `a-z`, `0-9`, `_`, `-`.
pub fn validate_menu_name(name: &str) -> Result<(), AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(AppError::validation(format!(
            "name '{name}' must be lowercase with no whitespace or ':' (allowed: a-z, 0-9, '_', '-')"
        )));
    }
    Ok(())
}

/// Validate an optional icon against the fixed icon set.
pub fn validate_icon(icon: &Option<String>) -> Result<(), AppError> {
    if let Some(icon) = icon
        && !is_valid_icon(icon)
    {
        return Err(AppError::validation(format!("Unknown icon '{icon}'")));
    }
    Ok(())
}

/// Validate a permission grant array before persisting it.
///
/// Unparseable entries are tolerated (the decoder treats them as "no
/// grant" and they round-trip untouched), so the only hard checks are
/// sanity bounds on each entry.
pub fn validate_permissions(permissions: &[String]) -> Result<(), AppError> {
    for entry in permissions {
        if entry.is_empty() {
            return Err(AppError::validation(
                "permission entries must not be empty strings".to_string(),
            ));
        }
        if entry.len() > MAX_GRANT_LEN {
            return Err(AppError::validation(format!(
                "permission entry is too long ({} chars, max {MAX_GRANT_LEN})",
                entry.len()
            )));
        }
    }
    let unparseable = permissions
        .iter()
        .filter(|e| shared::permission::parse_grant(e).is_none())
        .count();
    if unparseable > 0 {
        // Tolerated, but worth a trace: likely legacy or foreign entries
        tracing::warn!(
            count = unparseable,
            "Persisting permission entries the codec does not understand"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_name_rules() {
        assert!(validate_menu_name("berth-planning").is_ok());
        assert!(validate_menu_name("ports_2").is_ok());
        assert!(validate_menu_name("Berths").is_err());
        assert!(validate_menu_name("berth planning").is_err());
        assert!(validate_menu_name("berths:read").is_err());
        assert!(validate_menu_name("").is_err());
    }

    #[test]
    fn permissions_tolerate_unparseable_but_bound_length() {
        assert!(validate_permissions(&["???".to_string()]).is_ok());
        assert!(validate_permissions(&[String::new()]).is_err());
        assert!(validate_permissions(&["x".repeat(MAX_GRANT_LEN + 1)]).is_err());
    }
}
