//! Response envelope and pagination types shared by every endpoint.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Code carried by every successful envelope
pub const SUCCESS_CODE: i32 = 0;

/// JSON envelope wrapping every API payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// `0` on success, otherwise the HTTP status of the failure
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
    pub success: bool,
    pub trace_id: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: impl Into<String>, trace_id: &TraceId) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: message.into(),
            data,
            success: true,
            trace_id: trace_id.to_string(),
        }
    }

    pub fn failure(code: i32, message: impl Into<String>, trace_id: &TraceId) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            success: false,
            trace_id: trace_id.to_string(),
        }
    }
}

/// Query parameters accepted by list and detail endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Language code, locale tag or numeric id
    pub lang: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Paging limits from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl PageRequest {
    /// Resolve the request into a concrete `(page, page_size)`.
    ///
    /// Pages are 1-based. Missing or zero values fall back to the first page
    /// and the default size, and sizes are capped at the configured maximum.
    pub fn normalize(&self, limits: PageLimits) -> (u32, u32) {
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        let page_size = self
            .page_size
            .filter(|s| *s > 0)
            .unwrap_or(limits.default_page_size)
            .clamp(1, limits.max_page_size.max(1));
        (page, page_size)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Slice `items` into the requested 1-based page.
///
/// A page past the end yields an empty `items` with correct totals.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size as usize) as u32;
    let start = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);

    let items = items
        .iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// Per-request identifier echoed in the envelope and the `X-Trace-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

static TRACE_COUNTER: AtomicU64 = AtomicU64::new(0);

impl TraceId {
    /// `<UTC yyyymmddHHMMSS>-<process-wide sequence in hex>`
    pub fn generate() -> Self {
        let sequence = TRACE_COUNTER.fetch_add(1, Ordering::Relaxed);
        TraceId(format!(
            "{}-{:08x}",
            Utc::now().format("%Y%m%d%H%M%S"),
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
