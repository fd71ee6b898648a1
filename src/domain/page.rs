//! Pagination: permissive query parsing and window arithmetic.
//!
//! Page and limit parameters are never rejected: anything absent,
//! non-numeric, zero, or negative falls back to the defaults (page 1,
//! limit 10). A page past the last one yields an empty window, not an
//! error.

use serde::Deserialize;
use utoipa::IntoParams;

/// Default page number when the parameter is absent or unusable.
const DEFAULT_PAGE: u64 = 1;
/// Default page size when the parameter is absent or unusable.
const DEFAULT_LIMIT: u64 = 10;

/// Raw pagination query parameters as received on the wire.
///
/// Kept as strings so that non-numeric values coerce to the defaults
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, 1-indexed. Defaults to 1.
    #[serde(default)]
    pub page: Option<String>,
    /// Items per page. Defaults to 10.
    #[serde(default)]
    pub limit: Option<String>,
}

impl PageQuery {
    /// Coerces the raw parameters into a usable window.
    #[must_use]
    pub fn normalize(&self) -> PageWindow {
        PageWindow {
            page: coerce(self.page.as_deref(), DEFAULT_PAGE),
            limit: coerce(self.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

/// Parses a positive integer, falling back to `default` for anything
/// absent, non-numeric, zero, or negative.
fn coerce(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n >= 1 => n as u64,
        _ => default,
    }
}

/// A normalized, always-valid pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Page number, ≥ 1.
    pub page: u64,
    /// Items per page, ≥ 1.
    pub limit: u64,
}

impl PageWindow {
    /// Offset of the first item of this page in the ordered sequence.
    ///
    /// Saturates on enormous page/limit values; an offset past the end is
    /// already defined as an empty window, so clamping loses nothing.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Builds the response metadata for a total item count.
    #[must_use]
    pub const fn describe(&self, total: u64) -> PageDescriptor {
        PageDescriptor {
            page: self.page,
            limit: self.limit,
            total,
            total_pages: total.div_ceil(self.limit),
        }
    }
}

/// Computed pagination metadata for a bounded listing request.
///
/// Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    /// Page number of this response.
    pub page: u64,
    /// Items per page.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn absent_parameters_use_defaults() {
        let window = query(None, None).normalize();
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
    }

    #[test]
    fn garbage_and_negatives_coerce_to_defaults() {
        for bad in ["abc", "-3", "0", "1.5", ""] {
            let window = query(Some(bad), Some(bad)).normalize();
            assert_eq!(window, PageWindow { page: 1, limit: 10 });
        }
    }

    #[test]
    fn valid_parameters_pass_through() {
        let window = query(Some("3"), Some("25")).normalize();
        assert_eq!(window, PageWindow { page: 3, limit: 25 });
        assert_eq!(window.offset(), 50);
    }

    #[test]
    fn total_pages_is_ceiling() {
        let window = PageWindow { page: 1, limit: 10 };
        assert_eq!(window.describe(23).total_pages, 3);
        assert_eq!(window.describe(20).total_pages, 2);
        assert_eq!(window.describe(0).total_pages, 0);
        assert_eq!(window.describe(1).total_pages, 1);
    }

    #[test]
    fn enormous_parameters_saturate_instead_of_overflowing() {
        let huge = i64::MAX.to_string();
        let window = query(Some(&huge), Some(&huge)).normalize();
        assert_eq!(window.page, i64::MAX as u64);
        assert_eq!(window.limit, i64::MAX as u64);
        // (page - 1) * limit would overflow; the offset clamps instead.
        assert_eq!(window.offset(), u64::MAX);
        assert_eq!(window.describe(23).total_pages, 1);
    }

    #[test]
    fn page_beyond_range_is_an_offset_not_an_error() {
        let window = PageWindow { page: 4, limit: 10 };
        let descriptor = window.describe(23);
        assert_eq!(descriptor.total_pages, 3);
        // The offset lands past the sequence; callers get an empty slice.
        assert_eq!(window.offset(), 30);
    }
}
