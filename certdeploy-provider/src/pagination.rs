//! Page cursors for draining provider listings.
//!
//! Two shapes are supported: numbered pages with a reported total
//! ([`PageCursor`], Aliyun and Tencent Cloud) and opaque continuation links
//! ([`LinkCursor`], Azure `nextLink`). Both stop after [`MAX_PAGES`] requests
//! so a listing that keeps growing cannot loop forever.

use std::collections::HashSet;
use std::future::Future;

use crate::error::{DeployError, Result, ResultExt};

/// Upper bound on requests issued by one enumeration loop.
pub const MAX_PAGES: u32 = 1000;

/// One page of a numbered listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items the provider reports for the whole listing.
    pub total: u64,
}

/// 分页游标：页码从 1 开始
#[derive(Debug, Clone)]
pub struct PageCursor {
    provider: &'static str,
    page_number: u32,
    page_size: u32,
    last_total: Option<u64>,
}

impl PageCursor {
    pub fn new(provider: &'static str, page_size: u32) -> Self {
        Self {
            provider,
            page_number: 1,
            page_size: page_size.max(1),
            last_total: None,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based item offset of the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }

    /// Record the total reported by the current page and move to the next one.
    ///
    /// Returns `Ok(true)` when another page must be fetched. Fails once the
    /// next page would exceed [`MAX_PAGES`].
    pub fn advance(&mut self, total: u64) -> Result<bool> {
        if let Some(previous) = self.last_total
            && total > previous
        {
            log::warn!(
                "[{}] Listing grew from {previous} to {total} while on page {}",
                self.provider,
                self.page_number
            );
        }
        self.last_total = Some(total);

        let fetched = u64::from(self.page_size) * u64::from(self.page_number);
        if total <= fetched {
            return Ok(false);
        }
        if self.page_number >= MAX_PAGES {
            return Err(DeployError::Enumeration {
                provider: self.provider.to_string(),
                detail: format!(
                    "listing of {total} items did not finish within {MAX_PAGES} pages of {}",
                    self.page_size
                ),
            });
        }
        self.page_number += 1;
        Ok(true)
    }
}

/// Drain a numbered listing into one `Vec`, in page order.
///
/// `fetch` receives `(page_number, page_size)`. A page that comes back empty
/// ends the loop even if the reported total says otherwise.
pub async fn collect_pages<T, F, Fut>(
    provider: &'static str,
    page_size: u32,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut cursor = PageCursor::new(provider, page_size);
    let mut items = Vec::new();

    loop {
        let page_number = cursor.page_number();
        let page = fetch(page_number, cursor.page_size())
            .await
            .with_context(|| format!("page {page_number}"))?;

        if page.items.is_empty() {
            if page.total > cursor.offset() {
                log::warn!(
                    "[{provider}] Page {page_number} is empty but {} items were reported",
                    page.total
                );
            }
            break;
        }
        items.extend(page.items);

        if !cursor.advance(page.total)? {
            break;
        }
    }

    Ok(items)
}

/// Continuation-link cursor (`nextLink` style listings).
#[derive(Debug)]
pub struct LinkCursor {
    provider: &'static str,
    seen: HashSet<String>,
    pages: u32,
}

impl LinkCursor {
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            seen: HashSet::new(),
            pages: 1,
        }
    }

    /// Accept the continuation link of the page just read.
    ///
    /// Returns the link to fetch next, or `None` when the listing is done.
    /// A link that was already followed or a listing longer than
    /// [`MAX_PAGES`] is an enumeration error.
    pub fn next(&mut self, next_link: Option<String>) -> Result<Option<String>> {
        let Some(link) = next_link.filter(|l| !l.trim().is_empty()) else {
            return Ok(None);
        };
        if !self.seen.insert(link.clone()) {
            return Err(DeployError::Enumeration {
                provider: self.provider.to_string(),
                detail: format!("continuation link repeated: {link}"),
            });
        }
        if self.pages >= MAX_PAGES {
            return Err(DeployError::Enumeration {
                provider: self.provider.to_string(),
                detail: format!("listing did not finish within {MAX_PAGES} pages"),
            });
        }
        self.pages += 1;
        Ok(Some(link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stops_at_total() {
        let mut cursor = PageCursor::new("test", 50);
        assert_eq!(cursor.offset(), 0);
        assert!(matches!(cursor.advance(120), Ok(true)));
        assert_eq!(cursor.page_number(), 2);
        assert_eq!(cursor.offset(), 50);
        assert!(matches!(cursor.advance(120), Ok(true)));
        assert_eq!(cursor.page_number(), 3);
        assert!(matches!(cursor.advance(120), Ok(false)));
    }

    #[test]
    fn cursor_exact_multiple_needs_no_extra_page() {
        let mut cursor = PageCursor::new("test", 50);
        assert!(matches!(cursor.advance(100), Ok(true)));
        assert!(matches!(cursor.advance(100), Ok(false)));
        assert_eq!(cursor.page_number(), 2);
    }

    #[test]
    fn growing_total_hits_page_cap() {
        let mut cursor = PageCursor::new("test", 1);
        let mut result = Ok(true);
        let mut total = 10;
        while matches!(result, Ok(true)) {
            total += 5;
            result = cursor.advance(total);
        }
        assert!(matches!(result, Err(DeployError::Enumeration { .. })));
        assert_eq!(cursor.page_number(), MAX_PAGES);
    }

    #[tokio::test]
    async fn collect_pages_issues_three_requests_for_120_items() {
        let mut requests = Vec::new();
        let items = collect_pages("test", 50, |page, size| {
            requests.push(page);
            let start = (page - 1) * size;
            let end = (start + size).min(120);
            async move {
                Ok(Page {
                    items: (start..end).collect::<Vec<u32>>(),
                    total: 120,
                })
            }
        })
        .await
        .unwrap_or_default();

        assert_eq!(requests, vec![1, 2, 3]);
        assert_eq!(items.len(), 120);
        assert_eq!(items.first(), Some(&0));
        assert_eq!(items.last(), Some(&119));
    }

    #[tokio::test]
    async fn collect_pages_stops_on_empty_page() {
        let mut calls = 0;
        let items: Vec<u32> = collect_pages("test", 10, |_, _| {
            calls += 1;
            async move {
                Ok(Page {
                    items: Vec::new(),
                    total: 500,
                })
            }
        })
        .await
        .unwrap_or_default();
        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn collect_pages_wraps_error_with_page() {
        let result: Result<Vec<u32>> = collect_pages("test", 10, |page, _| async move {
            if page == 2 {
                Err(DeployError::configuration("boom"))
            } else {
                Ok(Page {
                    items: vec![1; 10],
                    total: 30,
                })
            }
        })
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "page 2: Configuration error: boom");
    }

    #[test]
    fn link_cursor_follows_until_none() {
        let mut cursor = LinkCursor::new("test");
        assert_eq!(
            cursor.next(Some("https://v/certs?skip=1".into())).ok().flatten().as_deref(),
            Some("https://v/certs?skip=1")
        );
        assert!(matches!(cursor.next(Some(String::new())), Ok(None)));
        assert!(matches!(cursor.next(None), Ok(None)));
    }

    #[test]
    fn link_cursor_rejects_repeated_link() {
        let mut cursor = LinkCursor::new("test");
        assert!(cursor.next(Some("a".into())).is_ok());
        assert!(matches!(
            cursor.next(Some("a".into())),
            Err(DeployError::Enumeration { .. })
        ));
    }
}
