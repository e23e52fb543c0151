// ── Pagination ──
//
// The list view's page/limit lives in the URL query string. This module
// reads it back with `parseInt`-style leniency and turns the backend's
// page metadata into previous/next/index navigation targets.

use serde::Serialize;
use url::Url;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum number of clickable page indices.
const INDEX_WINDOW: u32 = 5;

// ── PageQuery ────────────────────────────────────────────────────────

/// A requested `(page, limit)` pair, as carried in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Derive the requested page from a URL's `page` / `limit` parameters.
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Derive the requested page from query pairs. The first occurrence of
    /// each key wins; other keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut page = None;
        let mut limit = None;
        for (key, value) in pairs {
            match key.as_ref() {
                "page" if page.is_none() => page = Some(value.as_ref().to_owned()),
                "limit" if limit.is_none() => limit = Some(value.as_ref().to_owned()),
                _ => {}
            }
        }
        Self::from_raw(page.as_deref(), limit.as_deref())
    }

    /// Interpret raw user-supplied values. Anything that does not start
    /// with a positive integer falls back to the default.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Replace the URL's query string with this page/limit pair.
    pub fn write_to(&self, url: &mut Url) {
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string());
    }

    /// A copy of `base` pointing at this page.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        self.write_to(&mut url);
        url
    }
}

/// `parseInt` semantics: optional leading whitespace and sign, then as many
/// decimal digits as are present. Trailing garbage is ignored.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits.get(..end)?.parse().ok()?;
    Some(if negative { -value } else { value })
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(parse_int_prefix)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

// ── Page ─────────────────────────────────────────────────────────────

/// Server-reported pagination state of the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub current_page: u32,
    pub current_limit: u32,
    pub total_pages: Option<u32>,
    pub total: Option<u64>,
    pub previous: Option<PageQuery>,
    pub next: Option<PageQuery>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            current_page: DEFAULT_PAGE,
            current_limit: DEFAULT_LIMIT,
            total_pages: None,
            total: None,
            previous: None,
            next: None,
        }
    }
}

impl Page {
    /// The `(page, limit)` this page answers.
    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.current_page, self.current_limit)
    }
}

// ── Navigation ───────────────────────────────────────────────────────

/// Navigation affordances derived from a [`Page`].
///
/// Stateless: every method is a pure function of the page metadata. The
/// caller writes the returned [`PageQuery`] into the URL.
#[derive(Debug, Clone, Copy)]
pub struct Pagination<'a> {
    page: &'a Page,
}

impl<'a> Pagination<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    pub fn has_previous(&self) -> bool {
        self.page.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.page.next.is_some()
    }

    /// Target of the "previous" control; `None` when it must be hidden.
    pub fn previous(&self) -> Option<PageQuery> {
        self.has_previous().then(|| {
            PageQuery::new(
                self.page.current_page.saturating_sub(1).max(DEFAULT_PAGE),
                self.page.current_limit,
            )
        })
    }

    /// Target of the "next" control; `None` when it must be hidden.
    pub fn next(&self) -> Option<PageQuery> {
        self.has_next().then(|| {
            PageQuery::new(
                self.page.current_page.saturating_add(1),
                self.page.current_limit,
            )
        })
    }

    /// Target of a direct jump to page `index`.
    pub fn index(&self, index: u32) -> PageQuery {
        PageQuery::new(index.max(DEFAULT_PAGE), self.page.current_limit)
    }

    /// Page indices to render as clickable controls.
    pub fn indices(&self) -> Vec<u32> {
        index_window(self.page.current_page, self.page.total_pages)
    }

    pub fn is_current(&self, index: u32) -> bool {
        self.page.current_page == index
    }
}

/// Up to five page indices around `current`.
///
/// Pages 1-5 show the first five pages; past that the window is
/// `current-3 ..= current+1`, clamped to `1 ..= total_pages`. Unknown
/// totals render nothing.
pub fn index_window(current: u32, total_pages: Option<u32>) -> Vec<u32> {
    let Some(total) = total_pages else {
        return Vec::new();
    };
    if current <= INDEX_WINDOW {
        return (1..=total.min(INDEX_WINDOW)).collect();
    }
    let start = current.saturating_sub(3).max(1);
    let end = current.saturating_add(1).min(total);
    (start..=end).collect()
}
