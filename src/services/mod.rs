use sea_orm::DbErr;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub mod booking_service;
pub mod catalog_service;
pub mod product_service;
pub mod rating_service;
pub mod tour_service;
pub mod user_service;

/// Parses a path identifier, rejecting empty and malformed values as validation errors.
pub fn parse_id(raw: &str, what: &str) -> AppResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation(format!("{what} is required")));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::validation(format!("{what} '{raw}' is not a valid UUID")))
}

/// Trims a text identifier and rejects it when empty.
pub fn require_text<'a>(raw: &'a str, what: &str) -> AppResult<&'a str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation(format!("{what} is required")));
    }
    Ok(raw)
}

/// `Some` only for non-blank strings.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An update whose row vanished after it was read is a miss, not a storage failure.
pub(crate) fn updated_or<T>(
    result: Result<T, DbErr>,
    not_found: impl FnOnce() -> AppError,
) -> AppResult<T> {
    match result {
        Err(DbErr::RecordNotUpdated) => Err(not_found()),
        other => Ok(other?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_empty_and_garbage() {
        let err = parse_id("  ", "booking id").unwrap_err();
        assert_eq!(err.to_string(), "booking id is required");

        let err = parse_id("abc", "booking id").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "booking id").unwrap(), id);
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  card ".into())), Some("card".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn lost_update_becomes_not_found() {
        let err = updated_or::<()>(Err(DbErr::RecordNotUpdated), || {
            AppError::not_found("Booking not found")
        })
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = updated_or::<()>(Err(DbErr::Custom("boom".into())), || {
            AppError::not_found("Booking not found")
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
