//! Offset/limit pagination shared by the paged upstream APIs.

use std::future::Future;

use crate::error::QueryError;
use crate::row::RawRecord;

/// One page of upstream results.
#[derive(Debug, Default)]
pub struct Page {
    pub records: Vec<RawRecord>,
    /// Explicit "more data" flag when the API reports one. `None` means the
    /// page length alone decides.
    pub has_more: Option<bool>,
}

impl Page {
    pub fn sized(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            has_more: None,
        }
    }

    pub fn flagged(records: Vec<RawRecord>, has_more: bool) -> Self {
        Self {
            records,
            has_more: Some(has_more),
        }
    }
}

/// Requests pages at increasing offsets until the API signals the end.
///
/// Stops on an empty page, on an explicit `has_more == false`, or (without a
/// flag) on a page shorter than `page_size`. The offset advances by the
/// number of records actually received. Errors abort the whole fetch.
pub async fn fetch_all<F, Fut>(page_size: usize, mut fetch_page: F) -> Result<Vec<RawRecord>, QueryError>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Page, QueryError>>,
{
    let page_size = page_size.max(1);
    let mut records = Vec::new();
    let mut offset = 0usize;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(offset, page_size).await?;
        pages += 1;
        let received = page.records.len();
        if received == 0 {
            break;
        }
        records.extend(page.records);

        let more = match page.has_more {
            Some(flag) => flag,
            None => received >= page_size,
        };
        if !more {
            break;
        }
        offset += received;
    }

    tracing::debug!("Fetched {} records in {} page(s)", records.len(), pages);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Api;
    use std::cell::RefCell;

    fn records(n: usize, start: usize) -> Vec<RawRecord> {
        (start..start + n)
            .map(|i| RawRecord::from([("id".to_string(), i.to_string())]))
            .collect()
    }

    #[tokio::test]
    async fn short_page_terminates() {
        let calls = RefCell::new(Vec::new());
        let out = fetch_all(3, |offset, limit| {
            calls.borrow_mut().push(offset);
            let n = if offset == 0 { limit } else { 1 };
            async move { Ok(Page::sized(records(n, offset))) }
        })
        .await
        .unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(*calls.borrow(), [0, 3]);
    }

    #[tokio::test]
    async fn empty_page_terminates() {
        let calls = RefCell::new(0);
        let out = fetch_all(2, |offset, limit| {
            *calls.borrow_mut() += 1;
            let n = if offset < 4 { limit } else { 0 };
            async move { Ok(Page::sized(records(n, offset))) }
        })
        .await
        .unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(*calls.borrow(), 3);
    }

    #[tokio::test]
    async fn explicit_flag_wins_over_page_length() {
        // Server caps pages below the requested size but keeps flagging more data.
        let out = fetch_all(10, |offset, _limit| {
            let page = match offset {
                0 => Page::flagged(records(4, 0), true),
                4 => Page::flagged(records(4, 4), true),
                _ => Page::flagged(records(2, offset), false),
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();
        assert_eq!(out.len(), 10);
        let ids: Vec<_> = out.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids.last().map(String::as_str), Some("9"));
    }

    #[tokio::test]
    async fn false_flag_on_full_page_stops() {
        let out = fetch_all(2, |_offset, _limit| async { Ok(Page::flagged(records(2, 0), false)) })
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
    }

    #[tokio::test]
    async fn errors_propagate() {
        let err = fetch_all(2, |offset, limit| async move {
            if offset == 0 {
                Ok(Page::sized(records(limit, 0)))
            } else {
                Err(QueryError::Upstream {
                    api: Api::Cms,
                    status: 503,
                    body: "busy".to_string(),
                })
            }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, QueryError::Upstream { status: 503, .. }));
    }
}
