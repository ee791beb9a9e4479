//! Paginated, filterable business listing.
//!
//! [`BusinessListing`] owns the search cursor (term + offset), the single
//! in-flight admission flag, and the active name filter. It mediates between
//! a [`SearchBusinesses`] client and a passive display surface, which reads
//! [`BusinessListing::visible`] and watches [`BusinessListing::revision`]
//! for changes.
//!
//! State transitions are split-phase: `begin_*` claims the in-flight slot and
//! hands back the page request, `complete_*` applies the result and releases
//! the slot. The async [`BusinessListing::start`] and
//! [`BusinessListing::load_more`] wrappers drive both phases around one HTTP
//! round trip; callback-style hosts can call the phases directly.
//!
//! There is no cancellation and no request epoch: a fetch, once issued,
//! always resolves and its completion always applies, even if a newer filter
//! has superseded it. Callers that restart with a different term mid-flight
//! accept that staleness window.

use std::future::Future;

use crate::business::Business;

/// Sort order understood by the remote search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    BestMatched,
    Distance,
    HighestRated,
}

/// Optional search refinements. Unset fields are omitted from the request so
/// the remote API applies its own defaults.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub sort_mode: Option<SortMode>,
    /// Category codes (e.g. `"thai"`, `"asianfusion"`). Empty means no
    /// category filter.
    pub categories: Vec<String>,
    /// Restrict results to businesses currently offering deals.
    pub deals_only: bool,
}

/// One page fetch issued against the search API: the active term and the
/// offset of the first result to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub term: String,
    pub offset: u32,
}

/// The single asynchronous operation the listing needs from a search client.
///
/// `limit` is the page size; implementations deliver either a full page of
/// [`Business`] records or an error, with no retry or caching of their own.
pub trait SearchBusinesses {
    type Error: std::error::Error + Send + Sync + 'static;

    fn search(
        &self,
        term: &str,
        offset: u32,
        limit: u32,
        options: &SearchOptions,
    ) -> impl Future<Output = Result<Vec<Business>, Self::Error>> + Send;
}

/// Owns the fetched businesses, the pagination cursor, and the filter state.
///
/// At most one fetch is in flight at a time: `begin_load_more` while a fetch
/// is pending returns `None` (the call is dropped, not queued), and `start`
/// shares the same flag so the two operations are mutually exclusive.
#[derive(Debug)]
pub struct BusinessListing<S> {
    client: S,
    options: SearchOptions,
    term: String,
    page_size: u32,
    offset: u32,
    is_loading_more: bool,
    reached_end: bool,
    filter_text: String,
    all: Vec<Business>,
    visible: Vec<Business>,
    revision: u64,
}

impl<S> BusinessListing<S> {
    /// Creates an empty listing for `term`. Nothing is fetched until
    /// [`Self::start`] runs.
    pub fn new(client: S, term: impl Into<String>, page_size: u32) -> Self {
        Self::with_options(client, term, page_size, SearchOptions::default())
    }

    /// Like [`Self::new`], with search refinements forwarded to every fetch.
    pub fn with_options(
        client: S,
        term: impl Into<String>,
        page_size: u32,
        options: SearchOptions,
    ) -> Self {
        Self {
            client,
            options,
            term: term.into(),
            page_size,
            offset: 0,
            is_loading_more: false,
            reached_end: false,
            filter_text: String::new(),
            all: Vec::new(),
            visible: Vec::new(),
            revision: 0,
        }
    }

    /// The filtered, display-ready subsequence of all fetched businesses.
    #[must_use]
    pub fn visible(&self) -> &[Business] {
        &self.visible
    }

    /// Counter bumped every time the visible list is rebuilt. A passive
    /// subscriber can poll this instead of diffing the list itself.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of businesses fetched so far, before filtering.
    #[must_use]
    pub fn total_fetched(&self) -> usize {
        self.all.len()
    }

    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// True once a fetch returned an empty page; [`Self::should_load_more`]
    /// stays false from then on until [`Self::start`] resets the listing.
    #[must_use]
    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Claims the in-flight slot for a first-page fetch.
    ///
    /// Returns `None` if any fetch is already pending; `start` and
    /// `load_more` share the flag and never overlap.
    pub fn begin_start(&mut self) -> Option<PageRequest> {
        if self.is_loading_more {
            return None;
        }
        self.is_loading_more = true;
        Some(PageRequest {
            term: self.term.clone(),
            offset: 0,
        })
    }

    /// Applies the result of a first-page fetch and releases the in-flight
    /// slot.
    ///
    /// On success the page replaces any prior content, the filter is reset
    /// to empty, and the offset moves to one page size. On failure every
    /// field other than the flag is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error unchanged.
    pub fn complete_start<E>(&mut self, result: Result<Vec<Business>, E>) -> Result<(), E> {
        self.is_loading_more = false;
        let page = result?;
        tracing::debug!(term = %self.term, fetched = page.len(), "first page loaded");
        self.reached_end = page.is_empty();
        self.all = page;
        self.filter_text.clear();
        self.offset = self.page_size;
        self.recompute_visible();
        Ok(())
    }

    /// Claims the in-flight slot for a next-page fetch at the current offset.
    ///
    /// Returns `None` while another fetch is pending — the call is dropped,
    /// not queued. An explicit call after [`Self::reached_end`] still fetches;
    /// only [`Self::should_load_more`] consults the end flag.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.is_loading_more {
            return None;
        }
        self.is_loading_more = true;
        Some(PageRequest {
            term: self.term.clone(),
            offset: self.offset,
        })
    }

    /// Applies the result of a next-page fetch and releases the in-flight
    /// slot.
    ///
    /// On success the page is appended after the existing items, the offset
    /// advances by one page size (even for an empty page, which also marks
    /// the end of results), and the visible list is recomputed under the
    /// active filter. On failure the businesses and offset are exactly as
    /// before the fetch.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error unchanged.
    pub fn complete_load_more<E>(&mut self, result: Result<Vec<Business>, E>) -> Result<(), E> {
        self.is_loading_more = false;
        let page = result?;
        tracing::debug!(
            term = %self.term,
            offset = self.offset,
            fetched = page.len(),
            "next page loaded"
        );
        if page.is_empty() {
            self.reached_end = true;
        }
        self.all.extend(page);
        self.offset += self.page_size;
        self.recompute_visible();
        Ok(())
    }

    /// Sets the name filter and recomputes the visible list.
    ///
    /// Empty text means no filter. Otherwise the visible list is the
    /// subsequence of fetched businesses whose name contains `text`
    /// case-insensitively, in original order.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_owned();
        self.recompute_visible();
    }

    /// Pure predicate for the display surface's scroll handler.
    ///
    /// `scroll_fraction` is the fraction of the rendered list scrolled past,
    /// `0.0` at the top and `1.0` at the bottom. Returns true once the
    /// position crosses the trailing threshold of one page-height from the
    /// bottom, and never while a fetch is pending, after the end of results,
    /// or before anything was fetched.
    #[must_use]
    pub fn should_load_more(&self, scroll_fraction: f64) -> bool {
        if self.is_loading_more || self.reached_end || self.all.is_empty() {
            return false;
        }
        #[allow(clippy::cast_precision_loss)]
        let threshold = (1.0 - f64::from(self.page_size) / self.all.len() as f64).max(0.0);
        scroll_fraction > threshold
    }

    fn recompute_visible(&mut self) {
        if self.filter_text.is_empty() {
            self.visible = self.all.clone();
        } else {
            let needle = self.filter_text.to_lowercase();
            self.visible = self
                .all
                .iter()
                .filter(|b| b.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
        }
        self.revision += 1;
    }
}

impl<S: SearchBusinesses> BusinessListing<S> {
    /// Fetches the first page, replacing any prior content and clearing the
    /// filter. A call while another fetch is pending is dropped as an `Ok`
    /// no-op.
    ///
    /// # Errors
    ///
    /// Propagates the client error; the listing keeps its prior state apart
    /// from the released in-flight flag.
    pub async fn start(&mut self) -> Result<(), S::Error> {
        let Some(request) = self.begin_start() else {
            return Ok(());
        };
        let result = self
            .client
            .search(&request.term, request.offset, self.page_size, &self.options)
            .await;
        if let Err(err) = self.complete_start(result) {
            tracing::warn!(term = %self.term, error = %err, "initial search failed");
            return Err(err);
        }
        Ok(())
    }

    /// Fetches the next page at the current offset and appends it. A call
    /// while another fetch is pending is dropped as an `Ok` no-op.
    ///
    /// # Errors
    ///
    /// Propagates the client error; businesses and offset are exactly as
    /// before the call.
    pub async fn load_more(&mut self) -> Result<(), S::Error> {
        let Some(request) = self.begin_load_more() else {
            return Ok(());
        };
        let result = self
            .client
            .search(&request.term, request.offset, self.page_size, &self.options)
            .await;
        if let Err(err) = self.complete_load_more(result) {
            tracing::warn!(
                term = %self.term,
                offset = request.offset,
                error = %err,
                "pagination fetch failed"
            );
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A client is only needed for the async wrappers; the split-phase state
    // ops are exercised here without one.
    fn listing() -> BusinessListing<()> {
        BusinessListing::new((), "Thai", 20)
    }

    fn page(names: &[&str]) -> Vec<Business> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Business::named(format!("id-{i}"), *n))
            .collect()
    }

    #[test]
    fn begin_load_more_while_in_flight_is_dropped() {
        let mut l = listing();
        assert!(l.begin_load_more().is_some());
        assert!(l.begin_load_more().is_none(), "second begin must be dropped");
        assert_eq!(l.offset(), 0);
        assert!(l.visible().is_empty());
    }

    #[test]
    fn start_and_load_more_share_the_in_flight_flag() {
        let mut l = listing();
        assert!(l.begin_start().is_some());
        assert!(l.begin_load_more().is_none());
        l.complete_start::<std::convert::Infallible>(Ok(page(&["A"])))
            .unwrap();
        assert!(l.begin_load_more().is_some());
        assert!(l.begin_start().is_none());
    }

    #[test]
    fn failed_load_more_leaves_state_untouched() {
        let mut l = listing();
        l.begin_start();
        l.complete_start::<std::convert::Infallible>(Ok(page(&["A", "B"])))
            .unwrap();
        let before_offset = l.offset();
        let before_len = l.visible().len();

        l.begin_load_more();
        let err = l
            .complete_load_more::<std::io::Error>(Err(std::io::Error::other("boom")))
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(l.offset(), before_offset);
        assert_eq!(l.visible().len(), before_len);
        assert!(!l.is_loading_more(), "flag must be released on failure");
    }

    #[test]
    fn empty_page_advances_offset_and_marks_end() {
        let mut l = listing();
        l.begin_start();
        l.complete_start::<std::convert::Infallible>(Ok(page(&["A"])))
            .unwrap();
        assert_eq!(l.offset(), 20);

        l.begin_load_more();
        l.complete_load_more::<std::convert::Infallible>(Ok(Vec::new()))
            .unwrap();
        assert_eq!(l.offset(), 40, "offset advances even on an empty page");
        assert_eq!(l.visible().len(), 1);
        assert!(l.reached_end());
        assert!(!l.is_loading_more());
    }

    #[test]
    fn filter_is_case_insensitive_and_order_preserving() {
        let mut l = listing();
        l.begin_start();
        l.complete_start::<std::convert::Infallible>(Ok(page(&[
            "Thai House",
            "Burger Barn",
            "Little Thailand",
            "Pho Corner",
        ])))
        .unwrap();

        l.set_filter("thai");
        let names: Vec<&str> = l.visible().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Thai House", "Little Thailand"]);

        l.set_filter("");
        assert_eq!(l.visible().len(), 4, "empty filter shows everything");
    }

    #[test]
    fn start_resets_filter_and_replaces_content() {
        let mut l = listing();
        l.begin_start();
        l.complete_start::<std::convert::Infallible>(Ok(page(&["A", "B"])))
            .unwrap();
        l.set_filter("A");
        assert_eq!(l.visible().len(), 1);

        l.begin_start();
        l.complete_start::<std::convert::Infallible>(Ok(page(&["C"])))
            .unwrap();
        assert_eq!(l.filter_text(), "");
        assert_eq!(l.visible().len(), 1);
        assert_eq!(l.visible()[0].name, "C");
        assert_eq!(l.offset(), 20);
    }

    #[test]
    fn should_load_more_respects_flag_end_and_threshold() {
        let mut l = listing();
        assert!(!l.should_load_more(1.0), "empty listing never loads more");

        l.begin_start();
        let names: Vec<String> = (1..=40).map(|i| format!("B{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        l.complete_start::<std::convert::Infallible>(Ok(page(&refs)))
            .unwrap();

        // 40 items, page size 20: threshold is half-way down the list.
        assert!(!l.should_load_more(0.3));
        assert!(l.should_load_more(0.9));

        l.begin_load_more();
        assert!(!l.should_load_more(0.9), "never while a fetch is pending");
        l.complete_load_more::<std::convert::Infallible>(Ok(Vec::new()))
            .unwrap();
        assert!(!l.should_load_more(1.0), "never after the end of results");
    }

    #[test]
    fn revision_bumps_on_every_visible_change() {
        let mut l = listing();
        let r0 = l.revision();
        l.begin_start();
        l.complete_start::<std::convert::Infallible>(Ok(page(&["A"])))
            .unwrap();
        let r1 = l.revision();
        assert!(r1 > r0);
        l.set_filter("zzz");
        assert!(l.revision() > r1);
    }
}
