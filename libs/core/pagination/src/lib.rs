//! Pagination metadata for list endpoints.
//!
//! [`Meta`] normalizes caller-supplied page/limit values against a configured
//! default and derives the fetch window (offset/limit) plus the totals that
//! list responses report.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    /// The configured default limit is not a positive integer.
    #[error("invalid default limit configuration")]
    InvalidDefaultLimit(String),
}

/// Parse a configured default limit into a usable page size.
///
/// The configuration carries the value as a raw string; it only has to be
/// a positive integer at the moment a request actually needs the fallback.
pub fn parse_default_limit(default_limit: &str) -> Result<u64, PaginationError> {
    match default_limit.parse::<i64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed as u64),
        _ => Err(PaginationError::InvalidDefaultLimit(
            default_limit.to_string(),
        )),
    }
}

/// Pagination metadata attached to list responses.
///
/// Construction normalizes the inputs: a non-positive `limit` falls back to
/// the configured default (which must parse as a positive integer), a
/// non-positive `page` falls back to 1, and `offset` is `(page - 1) * limit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct Meta {
    limit: u64,
    offset: u64,
    page: u64,
    total_pages: u64,
    total_count: u64,
}

impl Meta {
    /// Build metadata for a listing of `total_count` records.
    ///
    /// `default_limit` is parsed only when `limit` is zero or negative, so an
    /// unparsable configuration value never affects requests that carry an
    /// explicit limit.
    pub fn new(
        page: i64,
        limit: i64,
        total_count: u64,
        default_limit: &str,
    ) -> Result<Self, PaginationError> {
        let limit = if limit > 0 {
            limit as u64
        } else {
            parse_default_limit(default_limit)?
        };

        let page = if page > 0 { page as u64 } else { 1 };

        Ok(Self {
            limit,
            // Saturate: an offset past the end just yields an empty page
            offset: (page - 1).saturating_mul(limit),
            page,
            total_pages: total_count.div_ceil(limit),
            total_count,
        })
    }

    /// Window start consumed by repository listings
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Window size consumed by repository listings
    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let meta = Meta::new(1, 10, 23, "10").unwrap();
        assert_eq!(meta.total_pages(), 3);
        assert_eq!(meta.total_count(), 23);
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        let meta = Meta::new(1, 10, 20, "10").unwrap();
        assert_eq!(meta.total_pages(), 2);
    }

    #[test]
    fn test_total_pages_empty_listing() {
        let meta = Meta::new(1, 10, 0, "10").unwrap();
        assert_eq!(meta.total_pages(), 0);
        assert_eq!(meta.offset(), 0);
    }

    #[test]
    fn test_offset_for_second_page() {
        let meta = Meta::new(2, 10, 23, "10").unwrap();
        assert_eq!(meta.offset(), 10);
        assert_eq!(meta.page(), 2);
    }

    #[test]
    fn test_non_positive_page_falls_back_to_one() {
        let meta = Meta::new(0, 10, 23, "10").unwrap();
        assert_eq!(meta.page(), 1);
        assert_eq!(meta.offset(), 0);

        let meta = Meta::new(-3, 10, 23, "10").unwrap();
        assert_eq!(meta.page(), 1);
    }

    #[test]
    fn test_non_positive_limit_uses_default() {
        let meta = Meta::new(1, 0, 23, "10").unwrap();
        assert_eq!(meta.limit(), 10);
        assert_eq!(meta.total_pages(), 3);

        let meta = Meta::new(1, -5, 23, "7").unwrap();
        assert_eq!(meta.limit(), 7);
        assert_eq!(meta.total_pages(), 4);
    }

    #[test]
    fn test_offset_saturates_for_huge_page_and_limit() {
        let meta = Meta::new(i64::MAX, i64::MAX, 23, "10").unwrap();
        assert_eq!(meta.offset(), u64::MAX);
        assert_eq!(meta.page(), i64::MAX as u64);
        assert_eq!(meta.total_pages(), 1);
    }

    #[test]
    fn test_unparsable_default_limit_fails() {
        let err = Meta::new(1, 0, 23, "abc").unwrap_err();
        assert_eq!(
            err,
            PaginationError::InvalidDefaultLimit("abc".to_string())
        );
        assert_eq!(err.to_string(), "invalid default limit configuration");
    }

    #[test]
    fn test_parse_default_limit() {
        assert_eq!(parse_default_limit("10"), Ok(10));
        assert!(parse_default_limit("abc").is_err());
        assert!(parse_default_limit("0").is_err());
        assert!(parse_default_limit("-3").is_err());
    }

    #[test]
    fn test_non_positive_default_limit_fails() {
        assert!(Meta::new(1, 0, 23, "0").is_err());
        assert!(Meta::new(1, -1, 23, "-3").is_err());
    }

    #[test]
    fn test_explicit_limit_ignores_bad_default() {
        let meta = Meta::new(1, 5, 23, "not_a_number").unwrap();
        assert_eq!(meta.limit(), 5);
        assert_eq!(meta.total_pages(), 5);
    }

    #[test]
    fn test_serializes_window_and_totals() {
        let meta = Meta::new(2, 10, 23, "10").unwrap();
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "limit": 10,
                "offset": 10,
                "page": 2,
                "total_pages": 3,
                "total_count": 23,
            })
        );
    }
}
