// ── Reporting view ──
//
// Response lists are fetched whole and paged locally. Exports are opaque
// spreadsheet bytes.

use bytes::Bytes;
use pekanit_api::{ApiClient, Audience, GuestResponse, StudentResponse};
use tracing::{debug, warn};

use crate::error::{CoreError, from_api};

const LOAD_FALLBACK: &str = "Failed to load data";
const EXPORT_FALLBACK: &str = "Failed to download export";

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ── Paginator ────────────────────────────────────────────────────

/// Client-side pager over an already-downloaded result set.
///
/// Pages are 1-based. An empty set still has one (empty) page.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current: usize,
}

impl<T> Paginator<T> {
    /// A page size of zero is treated as [`DEFAULT_PAGE_SIZE`].
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            items,
            page_size,
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Rows of the current page.
    pub fn page(&self) -> &[T] {
        let start = (self.current - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        self.items.get(start..end).unwrap_or_default()
    }

    /// 1-based index of the first row on the current page.
    pub fn first_row_number(&self) -> usize {
        (self.current - 1) * self.page_size + 1
    }

    /// Jump to `page`. Out-of-range requests leave the pager unchanged
    /// and return `false`.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.current > 1 && self.go_to(self.current - 1)
    }
}

// ── Fetching ─────────────────────────────────────────────────────

fn list_error(audience: Audience, err: pekanit_api::Error) -> CoreError {
    warn!(%audience, error = %err, "response list unavailable");
    match err {
        pekanit_api::Error::UnexpectedPayload { message } => CoreError::Report {
            message,
            source: None,
        },
        other => from_api!(Report, other, LOAD_FALLBACK),
    }
}

pub(crate) async fn student_responses(api: &ApiClient) -> Result<Vec<StudentResponse>, CoreError> {
    let rows = api
        .list_student_responses()
        .await
        .map_err(|e| list_error(Audience::Siswa, e))?;
    debug!(count = rows.len(), "student responses loaded");
    Ok(rows)
}

pub(crate) async fn guest_responses(api: &ApiClient) -> Result<Vec<GuestResponse>, CoreError> {
    let rows = api
        .list_guest_responses()
        .await
        .map_err(|e| list_error(Audience::Tamu, e))?;
    debug!(count = rows.len(), "guest responses loaded");
    Ok(rows)
}

pub(crate) async fn export(api: &ApiClient, audience: Audience) -> Result<Bytes, CoreError> {
    api.export(audience).await.map_err(|e| {
        warn!(%audience, error = %e, "export failed");
        from_api!(Report, e, EXPORT_FALLBACK)
    })
}
