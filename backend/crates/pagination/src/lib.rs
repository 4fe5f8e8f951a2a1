//! Page/limit pagination primitives shared by backend endpoints.
//!
//! Listing endpoints accept a requested page and page size as raw query
//! parameters. [`PageRequest`] normalises them (page floored to 1, limit
//! clamped to `[MIN_LIMIT, MAX_LIMIT]`), [`Pagination`] is the response
//! envelope computed from the normalised request and a result total, and
//! [`slice_page`] applies the window to an in-memory result set for filter
//! modes the underlying store cannot evaluate itself.

use serde::{Deserialize, Serialize};

/// Page used when the request omits one or supplies a value below 1.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the request omits one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Smallest accepted page size.
pub const MIN_LIMIT: u64 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u64 = 100;

/// Normalised pagination request.
///
/// Construction clamps out-of-range input instead of rejecting it, so a
/// hand-edited query string degrades to the nearest valid window rather
/// than failing the whole request.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::from_raw(Some(3), Some(250));
/// assert_eq!(request.page(), 3);
/// assert_eq!(request.limit(), 100);
/// assert_eq!(request.offset(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request from already-numeric values, clamping both.
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(DEFAULT_PAGE),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Build a request from raw, possibly absent or negative, query values.
    ///
    /// Absent values fall back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`];
    /// zero or negative values clamp the same way as [`PageRequest::new`].
    #[must_use]
    pub fn from_raw(page: Option<i64>, limit: Option<i64>) -> Self {
        let floored_page = page.map_or(DEFAULT_PAGE, |raw| {
            u64::try_from(raw).unwrap_or(DEFAULT_PAGE).max(DEFAULT_PAGE)
        });
        let clamped_limit = limit.map_or(DEFAULT_LIMIT, |raw| {
            u64::try_from(raw)
                .unwrap_or(MIN_LIMIT)
                .clamp(MIN_LIMIT, MAX_LIMIT)
        });
        Self {
            page: floored_page,
            limit: clamped_limit,
        }
    }

    /// Requested page, always at least 1.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Requested page size, always within `[MIN_LIMIT, MAX_LIMIT]`.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }

    /// Number of leading results the window skips.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination envelope returned alongside a page of results.
///
/// `total_pages` is zero when the result set is empty; otherwise it is the
/// ceiling of `total / limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Size of the full (filtered) result set.
    pub total: u64,
    /// Page the accompanying slice belongs to.
    pub page: u64,
    /// Window size used for the slice.
    pub limit: u64,
    /// Number of pages the full result set spans.
    pub total_pages: u64,
}

impl Pagination {
    /// Compute the envelope for a normalised request and a result total.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Pagination};
    ///
    /// let envelope = Pagination::for_total(PageRequest::from_raw(Some(3), Some(10)), 25);
    /// assert_eq!(envelope.total_pages, 3);
    ///
    /// let empty = Pagination::for_total(PageRequest::default(), 0);
    /// assert_eq!(empty.total_pages, 0);
    /// ```
    #[must_use]
    pub const fn for_total(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page: request.page(),
            limit: request.limit(),
            total_pages: total.div_ceil(request.limit()),
        }
    }
}

/// Apply a request's window to an already-filtered, already-ordered slice.
///
/// Used by in-memory filter modes: the window applies to the filtered
/// list, never the unfiltered collection it was derived from. A window
/// beyond the end of `items` yields an empty page, not an error.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, slice_page};
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = slice_page(&items, PageRequest::from_raw(Some(3), Some(10)));
/// assert_eq!(page, (21..=25).collect::<Vec<u32>>());
/// ```
#[must_use]
pub fn slice_page<T: Clone>(items: &[T], request: PageRequest) -> Vec<T> {
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    items.iter().skip(skip).take(take).cloned().collect()
}
