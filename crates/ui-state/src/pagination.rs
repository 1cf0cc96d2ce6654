//! Infinite-scroll pagination state.
//!
//! A [`Paginated`] collection owns a [`PageCursor`] and the items accumulated
//! so far. The cursor only advances when the sentinel at the end of the list
//! becomes visible, more results are believed to exist, and no fetch is in
//! flight. Merged pages are de-duplicated by identity.

use std::collections::HashSet;
use std::hash::Hash;

/// Anything with a stable identity that can be de-duplicated across pages.
pub trait Identified {
    /// Identity type of this item.
    type Id: Eq + Hash + Clone;

    /// Returns the identity of this item.
    fn id(&self) -> Self::Id;
}

/// One page worth of request parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page: u32,

    /// Number of items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Creates a new [`PageRequest`]. A zero page is clamped to the first one.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// `limit` query parameter for this page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.page_size
    }

    /// `offset` query parameter for this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Position of a listing page in its result stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    page_size: u32,
    has_more: bool,
    loading: bool,
}

impl PageCursor {
    /// Creates a cursor positioned at the first page.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            has_more: true,
            loading: false,
        }
    }

    /// Current one-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Indicator whether more results are believed to exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Indicator whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Request parameters for the current page.
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Advances to the next page if the sentinel is allowed to fire.
    ///
    /// Returns `true` when the page counter moved.
    pub fn advance(&mut self) -> bool {
        if !self.has_more || self.loading {
            return false;
        }
        self.page += 1;
        true
    }

    fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }
}

/// Items accumulated across pages together with their [`PageCursor`].
#[derive(Clone, Debug)]
pub struct Paginated<T> {
    cursor: PageCursor,
    items: Vec<T>,
}

impl<T: Identified> Paginated<T> {
    /// Creates an empty collection positioned at page one.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            cursor: PageCursor::new(page_size),
            items: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Accumulated items in merge order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drops every accumulated item and rewinds to page one.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.items.clear();
    }

    /// Marks the current page as in flight.
    ///
    /// Returns `None` if a fetch is already running, so a caller never issues
    /// two requests for the same listing at once.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.cursor.loading {
            return None;
        }
        self.cursor.loading = true;
        Some(self.cursor.request())
    }

    /// Merges a fetched page and records whether more pages exist.
    ///
    /// Returns the number of items that were actually new.
    pub fn complete(&mut self, page: Vec<T>, has_more: bool) -> usize {
        let before = self.items.len();
        merge_unique(&mut self.items, page);
        self.cursor.has_more = has_more;
        self.cursor.loading = false;
        self.items.len() - before
    }

    /// Records that the server has no more results (404-class response).
    pub fn exhaust(&mut self) {
        self.cursor.has_more = false;
        self.cursor.loading = false;
    }

    /// Records a failed fetch. Accumulated items are left untouched.
    pub fn fail(&mut self) {
        self.cursor.loading = false;
    }

    /// Called when the sentinel element scrolls into view.
    pub fn on_sentinel_visible(&mut self) -> bool {
        self.cursor.advance()
    }

    /// Items matching `predicate`, in merge order.
    pub fn filtered<'a, P>(&'a self, mut predicate: P) -> Vec<&'a T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(*item)).collect()
    }

    /// Applies `f` to the item with identity `id`.
    ///
    /// Returns `false` if no such item is loaded.
    pub fn update<F>(&mut self, id: &T::Id, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|item| item.id() == *id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// Removes the item with identity `id`, returning it.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let position = self.items.iter().position(|item| item.id() == *id)?;
        Some(self.items.remove(position))
    }
}

/// Appends `incoming` to `existing`, skipping anything whose identity is
/// already present. The first occurrence wins, including duplicates inside
/// `incoming` itself.
pub fn merge_unique<T: Identified>(existing: &mut Vec<T>, incoming: Vec<T>) {
    let mut seen: HashSet<T::Id> = existing.iter().map(|item| item.id()).collect();
    for item in incoming {
        if seen.insert(item.id()) {
            existing.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: char,
        active: bool,
    }

    impl Identified for Item {
        type Id = char;

        fn id(&self) -> char {
            self.id
        }
    }

    fn items(ids: &str) -> Vec<Item> {
        ids.chars().map(|id| Item { id, active: true }).collect()
    }

    fn ids(list: &Paginated<Item>) -> String {
        list.items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_page_request_offsets_are_one_based() {
        assert_eq!(PageRequest::new(1, 12).offset(), 0);
        assert_eq!(PageRequest::new(3, 12).offset(), 24);
        assert_eq!(PageRequest::new(0, 12).page, 1);
        assert_eq!(PageRequest::new(2, 5).limit(), 5);
    }

    #[test]
    fn test_overlapping_pages_are_deduplicated() {
        let mut list = Paginated::new(3);

        assert_eq!(list.begin_load(), Some(PageRequest::new(1, 3)));
        list.complete(items("ABC"), true);
        assert!(list.on_sentinel_visible());

        assert_eq!(list.begin_load(), Some(PageRequest::new(2, 3)));
        let added = list.complete(items("CD"), true);

        assert_eq!(added, 1);
        assert_eq!(ids(&list), "ABCD");
    }

    #[test]
    fn test_duplicates_within_a_page_keep_first_position() {
        let mut existing = items("AB");
        merge_unique(&mut existing, items("CACDB"));
        let merged: String = existing.iter().map(|i| i.id).collect();
        assert_eq!(merged, "ABCD");
    }

    #[test]
    fn test_no_duplicates_for_arbitrary_page_sequences() {
        let pages = ["ABC", "CDE", "AAF", "", "FGHA", "BBBB", "Z"];
        let mut list = Paginated::new(4);
        for page in pages {
            list.begin_load();
            list.complete(items(page), true);
            list.on_sentinel_visible();

            let mut seen = HashSet::new();
            assert!(list.items().iter().all(|item| seen.insert(item.id)));
        }
        assert_eq!(ids(&list), "ABCDEFGHZ");
    }

    #[test]
    fn test_sentinel_does_not_advance_while_loading() {
        let mut list: Paginated<Item> = Paginated::new(10);
        list.begin_load();

        assert!(!list.on_sentinel_visible());
        assert_eq!(list.cursor().page(), 1);
        assert_eq!(list.begin_load(), None);
    }

    #[test]
    fn test_sentinel_does_not_advance_without_more_results() {
        let mut list = Paginated::new(10);
        list.begin_load();
        list.complete(items("AB"), false);

        assert!(!list.on_sentinel_visible());
        assert_eq!(list.cursor().page(), 1);
    }

    #[test]
    fn test_exhaust_stops_pagination_and_keeps_items() {
        let mut list = Paginated::new(2);
        list.begin_load();
        list.complete(items("AB"), true);
        list.on_sentinel_visible();
        list.begin_load();
        list.exhaust();

        assert!(!list.cursor().has_more());
        assert!(!list.cursor().is_loading());
        assert_eq!(ids(&list), "AB");
        assert!(!list.on_sentinel_visible());
    }

    #[test]
    fn test_failure_clears_loading_without_rollback() {
        let mut list = Paginated::new(2);
        list.begin_load();
        list.complete(items("AB"), true);
        list.on_sentinel_visible();
        list.begin_load();
        list.fail();

        assert!(!list.cursor().is_loading());
        assert!(list.cursor().has_more());
        assert_eq!(list.cursor().page(), 2);
        assert_eq!(ids(&list), "AB");
    }

    #[test]
    fn test_reset_rewinds_everything() {
        let mut list = Paginated::new(2);
        list.begin_load();
        list.complete(items("AB"), false);
        list.reset();

        assert!(list.is_empty());
        assert_eq!(list.cursor(), &PageCursor::new(2));
    }

    #[test]
    fn test_update_touches_only_the_matching_item() {
        let mut list = Paginated::new(5);
        list.begin_load();
        list.complete(items("ABC"), false);

        assert!(list.update(&'B', |item| item.active = false));
        assert!(!list.update(&'X', |item| item.active = false));

        let inactive: Vec<char> = list.filtered(|i| !i.active).iter().map(|i| i.id).collect();
        assert_eq!(inactive, vec!['B']);
        assert_eq!(list.remove(&'A').map(|i| i.id), Some('A'));
        assert_eq!(ids(&list), "BC");
    }
}
