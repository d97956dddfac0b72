//! Fetch-all-pages aggregation for upstream paginated collections.
//!
//! The upstream paginates with `startIndex`/`count` query parameters and
//! returns `itemsPerPage`/`totalResults` envelope fields. Different
//! collections use different index origins (users start at 0, invitation
//! requests at 1), so the caller supplies the starting cursor.

use crate::error::{WristbandError, WristbandResult};
use serde::Deserialize;
use std::future::Future;

/// Fixed page size for every aggregated collection fetch.
pub const PAGE_SIZE: i64 = 50;

/// Starting cursor for the tenant users collection.
pub const USER_START_INDEX: i64 = 0;

/// Starting cursor for the new-user-invitation requests collection.
pub const INVITATION_START_INDEX: i64 = 1;

/// One page of an upstream collection response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub items_per_page: i64,
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub total_results: i64,
}

/// Sequentially fetches every page of a collection and concatenates the
/// items in upstream order.
///
/// Pages are requested one at a time; each cursor depends on the
/// previous page's `itemsPerPage`. Termination: the collection is
/// exhausted once `cursor + itemsPerPage >= totalResults`. A page that
/// reports `itemsPerPage == 0` while results remain is a protocol
/// violation and aborts the aggregation rather than looping forever.
///
/// Any page failure aborts the whole fetch; partial results are
/// discarded, never returned.
pub async fn fetch_all_pages<T, F, Fut>(
    start_index: i64,
    page_size: i64,
    mut fetch: F,
) -> WristbandResult<Vec<T>>
where
    F: FnMut(i64, i64) -> Fut,
    Fut: Future<Output = WristbandResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor = start_index;
    loop {
        let page = fetch(cursor, page_size).await?;
        let items_per_page = page.items_per_page;
        let total_results = page.total_results;
        items.extend(page.items);

        if cursor + items_per_page >= total_results {
            return Ok(items);
        }
        if items_per_page <= 0 {
            return Err(WristbandError::Pagination(format!(
                "page at startIndex {cursor} reported itemsPerPage \
                 {items_per_page} with totalResults {total_results}"
            )));
        }
        cursor += items_per_page;
    }
}
