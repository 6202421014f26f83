//! Pagination limit resolution
//!
//! Turns the raw `limit` query parameter into the page size handed to the
//! repositories. The policy never fails: anything unusable falls back to the
//! configured default.

use std::num::{IntErrorKind, NonZeroU64};

use serde::Serialize;
use utoipa::ToSchema;

/// Page-size settings, built once from `AppConfig` at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Allow the request to override the default page size.
    pub skip_pagination: bool,
    pub default_limit: NonZeroU64,
    pub max_limit: NonZeroU64,
}

impl PaginationConfig {
    pub fn new(skip_pagination: bool, default_limit: NonZeroU64, max_limit: NonZeroU64) -> Self {
        Self {
            skip_pagination,
            default_limit,
            max_limit,
        }
    }

    /// Resolve the effective page size for one request.
    ///
    /// - overrides disabled: always `default_limit`
    /// - absent, non-numeric, zero or negative input: `default_limit`
    /// - otherwise: the requested value capped at `max_limit`
    pub fn resolve(&self, request: &LimitRequest) -> ResolvedLimit {
        if !self.skip_pagination {
            return ResolvedLimit(self.default_limit);
        }

        match request.parsed() {
            Some(requested) => ResolvedLimit(requested.min(self.max_limit)),
            None => ResolvedLimit(self.default_limit),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            skip_pagination: true,
            default_limit: NonZeroU64::new(15).unwrap_or(NonZeroU64::MIN),
            max_limit: NonZeroU64::new(100).unwrap_or(NonZeroU64::MIN),
        }
    }
}

/// Raw `limit` value exactly as it arrived in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitRequest {
    requested: Option<String>,
}

impl LimitRequest {
    pub fn new(requested: Option<String>) -> Self {
        Self { requested }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Positive integer value of the request, if it has one.
    ///
    /// Zero is "not provided", never "unlimited". Positive values too large
    /// to represent saturate, so the cap still applies to them.
    fn parsed(&self) -> Option<NonZeroU64> {
        let raw = self.requested.as_deref()?.trim();
        if raw.starts_with('-') {
            return None;
        }
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.parse::<u64>() {
            Ok(value) => NonZeroU64::new(value),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(NonZeroU64::MAX),
            Err(_) => None,
        }
    }
}

impl From<Option<String>> for LimitRequest {
    fn from(requested: Option<String>) -> Self {
        Self::new(requested)
    }
}

impl From<&str> for LimitRequest {
    fn from(requested: &str) -> Self {
        Self::new(Some(requested.to_string()))
    }
}

/// Final page size. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResolvedLimit(NonZeroU64);

impl ResolvedLimit {
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Row offset of a 1-based page, capped at what SQL can bind.
    pub fn offset_for(self, page: u64) -> u64 {
        page.max(1)
            .saturating_sub(1)
            .saturating_mul(self.get())
            .min(MAX_SQL_OFFSET)
    }
}

/// SQLite binds integers as `i64`.
const MAX_SQL_OFFSET: u64 = i64::MAX as u64;

/// One page of a listing, as returned by the repositories.
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: ResolvedLimit) -> Self {
        let limit = limit.get();
        Self {
            items,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        }
    }

    /// Swap in transformed items, keeping the page totals.
    pub fn replace_items<U>(self, items: Vec<U>) -> PaginatedResult<U> {
        PaginatedResult {
            items,
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }

    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            total: self.total,
            count: self.items.len() as u64,
            per_page: self.limit,
            current_page: self.page,
            total_pages: self.total_pages,
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: u64,
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub total_pages: u64,
}
