//! Pagination state for resource collections.
//!
//! The backend paginates every collection and reports navigation state
//! through its paginator meta. `PageState` mirrors that meta on the
//! client and owns the two contracts the table depends on: continuous
//! row numbering across pages, and page reset whenever the page size
//! changes (old offsets are meaningless under a new limit).

use serde::{Deserialize, Serialize};

/// Paginator meta block returned alongside every collection.
///
/// `next_page_url`/`previous_page_url` being non-null is the only
/// signal used to enable pagination controls; the client never
/// recomputes page validity from `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: u32,
    pub first_page: u32,
    pub first_page_url: String,
    pub last_page_url: String,
    pub next_page_url: Option<String>,
    pub previous_page_url: Option<String>,
}

/// Client-side pagination state for one collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page currently displayed (or requested).
    pub current_page: u32,
    pub page_size: u32,
    pub total_records: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageState {
    pub fn new(page_size: u32) -> Self {
        debug_assert!(page_size > 0);
        Self {
            current_page: 1,
            page_size,
            total_records: 0,
            has_next: false,
            has_prev: false,
        }
    }

    /// Displayed row number for the k-th (0-based) row of the current
    /// page: `(current_page - 1) * page_size + k + 1`.
    pub fn row_number(&self, local_index: usize) -> u64 {
        (self.current_page as u64 - 1) * self.page_size as u64 + local_index as u64 + 1
    }

    /// Change the page size. Resets to page 1: previous offsets are
    /// invalid under the new limit, and requesting a stale page could
    /// land out of range.
    pub fn set_page_size(&mut self, page_size: u32) {
        debug_assert!(page_size > 0);
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Move to the next page if the server said one exists.
    /// Returns whether the page changed.
    pub fn advance(&mut self) -> bool {
        if self.has_next {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page if the server said one exists.
    /// Returns whether the page changed.
    pub fn retreat(&mut self) -> bool {
        if self.has_prev && self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Adopt the server's view of where we are after a fetch.
    pub fn apply_meta(&mut self, meta: &PageMeta) {
        self.current_page = meta.current_page.max(1);
        self.page_size = meta.per_page.max(1);
        self.total_records = meta.total;
        self.has_next = meta.next_page_url.is_some();
        self.has_prev = meta.previous_page_url.is_some();
    }

    pub fn from_meta(meta: &PageMeta) -> Self {
        let mut state = Self::new(meta.per_page.max(1));
        state.apply_meta(meta);
        state
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn meta(current_page: u32, next: bool, prev: bool) -> PageMeta {
        PageMeta {
            total: 120,
            per_page: 25,
            current_page,
            last_page: 5,
            first_page: 1,
            first_page_url: "/?page=1".to_string(),
            last_page_url: "/?page=5".to_string(),
            next_page_url: next.then(|| format!("/?page={}", current_page + 1)),
            previous_page_url: prev.then(|| format!("/?page={}", current_page - 1)),
        }
    }

    #[test]
    fn first_page_numbering_starts_at_one() {
        let state = PageState::new(10);
        assert_eq!(state.row_number(0), 1);
        assert_eq!(state.row_number(9), 10);
    }

    #[test]
    fn numbering_is_continuous_across_pages() {
        let mut state = PageState::new(10);
        state.apply_meta(&meta(3, true, true));
        state.set_page_size(10);
        state.current_page = 3;
        assert_eq!(state.row_number(0), 21);
        assert_eq!(state.row_number(4), 25);
    }

    #[test]
    fn set_page_size_resets_current_page() {
        let mut state = PageState::new(10);
        state.current_page = 3;
        state.set_page_size(50);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 50);
    }

    #[test]
    fn advance_is_gated_by_has_next() {
        let mut state = PageState::new(25);
        state.apply_meta(&meta(5, false, true));
        assert!(!state.advance());
        assert_eq!(state.current_page, 5);

        state.apply_meta(&meta(2, true, true));
        assert!(state.advance());
        assert_eq!(state.current_page, 3);
    }

    #[test]
    fn retreat_is_gated_by_has_prev() {
        let mut state = PageState::new(25);
        state.apply_meta(&meta(1, true, false));
        assert!(!state.retreat());
        assert_eq!(state.current_page, 1);

        state.apply_meta(&meta(2, true, true));
        assert!(state.retreat());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn navigation_flags_come_only_from_urls() {
        // total says more records exist, but the server sent no next url;
        // the flag wins.
        let mut m = meta(1, false, false);
        m.total = 1_000;
        let state = PageState::from_meta(&m);
        assert!(!state.has_next);
        assert!(!state.has_prev);
        assert_eq!(state.total_records, 1_000);
    }

    #[test]
    fn meta_deserializes_from_camel_case() {
        let raw = r#"{
            "total": 42,
            "perPage": 10,
            "currentPage": 2,
            "lastPage": 5,
            "firstPage": 1,
            "firstPageUrl": "/?page=1",
            "lastPageUrl": "/?page=5",
            "nextPageUrl": "/?page=3",
            "previousPageUrl": "/?page=1"
        }"#;
        let parsed: PageMeta = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.per_page, 10);
        assert_eq!(parsed.next_page_url.as_deref(), Some("/?page=3"));
        let state = PageState::from_meta(&parsed);
        assert!(state.has_next && state.has_prev);
        assert_eq!(state.current_page, 2);
    }

    proptest! {
        /// Row numbering invariant: displayed index of the k-th row is
        /// (current_page - 1) * page_size + k + 1 for any valid state.
        #[test]
        fn prop_row_number_invariant(
            current_page in 1u32..10_000,
            page_size in 1u32..500,
            k in 0usize..500,
        ) {
            let state = PageState {
                current_page,
                page_size,
                total_records: 0,
                has_next: false,
                has_prev: false,
            };
            let expected = (current_page as u64 - 1) * page_size as u64 + k as u64 + 1;
            prop_assert_eq!(state.row_number(k), expected);
        }

        /// Changing page size always lands on page 1.
        #[test]
        fn prop_set_page_size_resets(
            start_page in 1u32..1_000,
            old_size in 1u32..200,
            new_size in 1u32..200,
        ) {
            let mut state = PageState::new(old_size);
            state.current_page = start_page;
            state.set_page_size(new_size);
            prop_assert_eq!(state.current_page, 1);
            prop_assert_eq!(state.page_size, new_size);
        }
    }
}
