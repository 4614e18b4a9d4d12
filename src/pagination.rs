//! Catalog Pagination
//!
//! State machine for the questionnaire listing. Two retrieval modes: a
//! classic pager that replaces the page wholesale, and "load more" infinite
//! accumulation driven by a viewport sentinel. The controller never touches
//! the network: transitions hand out a [`FetchTicket`] and the caller feeds
//! the response back through [`Catalog::apply`], which keeps all of this
//! testable without a browser.

use crate::models::QuestionnaireSummary;

pub const PAGE_SIZE: u32 = 6;

/// Catalog sort orders offered by the listing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Name,
    QuestionsCount,
    Completions,
}

impl SortKey {
    /// Query-string value for `sortBy`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::Name => "name",
            SortKey::QuestionsCount => "questionsCount",
            SortKey::Completions => "completions",
        }
    }

    /// Parse a `<select>` value; unknown values fall back to newest-first.
    pub fn from_value(value: &str) -> Self {
        match value {
            "name" => SortKey::Name,
            "questionsCount" => SortKey::QuestionsCount,
            "completions" => SortKey::Completions,
            _ => SortKey::CreatedAt,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchMode {
    #[default]
    Pager,
    Infinite,
}

/// Description of one fetch the component must issue. The ticket carries the
/// sort key it was issued under so a response that arrives after a sort
/// change can be recognized as stale and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub sort_key: SortKey,
    pub page: u32,
    pub replace: bool,
}

/// Listing state for the catalog page
#[derive(Clone, Debug)]
pub struct Catalog {
    pub sort_key: SortKey,
    pub mode: FetchMode,
    pub page: u32,
    pub items: Vec<QuestionnaireSummary>,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading: bool,
    pub loaded: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            sort_key: SortKey::default(),
            mode: FetchMode::default(),
            page: 1,
            items: Vec::new(),
            total_pages: 1,
            has_more: true,
            loading: false,
            loaded: false,
        }
    }

    /// Switch the sort order. Accumulated items are dropped before the next
    /// batch is applied, even mid-infinite-scroll.
    pub fn set_sort_key(&mut self, key: SortKey) -> FetchTicket {
        self.sort_key = key;
        self.mode = FetchMode::Pager;
        self.page = 1;
        self.items.clear();
        self.total_pages = 1;
        self.has_more = true;
        self.loading = true;
        FetchTicket {
            sort_key: key,
            page: 1,
            replace: true,
        }
    }

    /// Pager "Next". Explicit navigation is always allowed; the UI disables
    /// the button on the last page.
    pub fn next(&mut self) -> FetchTicket {
        self.mode = FetchMode::Pager;
        self.page += 1;
        self.loading = true;
        FetchTicket {
            sort_key: self.sort_key,
            page: self.page,
            replace: true,
        }
    }

    /// Pager "Previous", floored at page 1.
    pub fn prev(&mut self) -> Option<FetchTicket> {
        if self.page <= 1 {
            return None;
        }
        self.mode = FetchMode::Pager;
        self.page -= 1;
        self.loading = true;
        Some(FetchTicket {
            sort_key: self.sort_key,
            page: self.page,
            replace: true,
        })
    }

    /// Flip to infinite mode. Fetching starts when the sentinel reports in.
    pub fn load_more(&mut self) {
        self.mode = FetchMode::Infinite;
    }

    /// The off-screen sentinel entered the viewport. At most one append fetch
    /// per crossing; a fetch in flight or exhausted data suppresses it.
    pub fn sentinel_visible(&mut self) -> Option<FetchTicket> {
        if self.mode != FetchMode::Infinite || self.loading || !self.has_more {
            return None;
        }
        if self.page >= self.total_pages {
            return None;
        }
        self.page += 1;
        self.loading = true;
        Some(FetchTicket {
            sort_key: self.sort_key,
            page: self.page,
            replace: false,
        })
    }

    /// Feed a successful response back. Returns `false` when the ticket was
    /// issued under a superseded sort key and the response was discarded.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        batch: Vec<QuestionnaireSummary>,
        total: u32,
    ) -> bool {
        if ticket.sort_key != self.sort_key {
            return false;
        }
        self.loading = false;
        self.loaded = true;
        self.total_pages = total.div_ceil(PAGE_SIZE).max(1);
        if batch.is_empty() {
            self.has_more = false;
            return true;
        }
        if ticket.replace {
            self.items = batch;
        } else {
            self.items.extend(batch);
        }
        if ticket.page >= self.total_pages {
            self.has_more = false;
        }
        true
    }

    /// A fetch failed: clear the in-flight flag, touch nothing else.
    pub fn fetch_failed(&mut self, ticket: &FetchTicket) {
        if ticket.sort_key != self.sort_key {
            return;
        }
        self.loading = false;
    }

    /// Drop one entry in place (after a successful DELETE).
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|q| q.id != id);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_summary(id: &str) -> QuestionnaireSummary {
        QuestionnaireSummary {
            id: id.to_string(),
            name: format!("Quiz {}", id),
            description: String::new(),
            questions_count: 1,
            completions: 0,
            created_at: String::new(),
        }
    }

    fn batch(range: std::ops::Range<u32>) -> Vec<QuestionnaireSummary> {
        range.map(|i| make_summary(&format!("id-{}", i))).collect()
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        assert!(catalog.apply(&ticket, batch(0..6), 13));
        assert_eq!(catalog.total_pages, 3);
        assert!(catalog.has_more);
    }

    #[test]
    fn test_infinite_accumulation_no_duplicates() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 13);
        catalog.load_more();

        let ticket = catalog.sentinel_visible().expect("page 2 fetch");
        assert_eq!(ticket.page, 2);
        assert!(!ticket.replace);
        catalog.apply(&ticket, batch(6..12), 13);
        assert!(catalog.has_more);

        let ticket = catalog.sentinel_visible().expect("page 3 fetch");
        catalog.apply(&ticket, batch(12..13), 13);

        assert_eq!(catalog.items.len(), 13);
        let mut ids: Vec<&str> = catalog.items.iter().map(|q| q.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 13);

        // last page reached: no further sentinel fetches
        assert!(!catalog.has_more);
        assert_eq!(catalog.sentinel_visible(), None);
    }

    #[test]
    fn test_empty_batch_marks_end_without_touching_items() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 13);
        let before = catalog.items.clone();

        let ticket = FetchTicket {
            sort_key: SortKey::CreatedAt,
            page: 4,
            replace: false,
        };
        catalog.apply(&ticket, Vec::new(), 13);

        assert!(!catalog.has_more);
        assert_eq!(catalog.items, before);
    }

    #[test]
    fn test_in_flight_guard_suppresses_sentinel() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 13);
        catalog.load_more();

        let first = catalog.sentinel_visible();
        assert!(first.is_some());
        // second crossing while the fetch is still in flight
        assert_eq!(catalog.sentinel_visible(), None);
    }

    #[test]
    fn test_pager_replaces_wholesale() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 13);

        let ticket = catalog.next();
        assert_eq!(ticket.page, 2);
        assert!(ticket.replace);
        catalog.apply(&ticket, batch(6..12), 13);
        assert_eq!(catalog.items.len(), 6);
        assert_eq!(catalog.items[0].id, "id-6");

        let ticket = catalog.prev().expect("page 1 fetch");
        assert_eq!(ticket.page, 1);
        catalog.apply(&ticket, batch(0..6), 13);
        assert_eq!(catalog.items[0].id, "id-0");

        // floored at page 1
        assert!(catalog.prev().is_none());
    }

    #[test]
    fn test_sort_change_resets_accumulation() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 13);
        catalog.load_more();
        let ticket = catalog.sentinel_visible().expect("page 2 fetch");
        catalog.apply(&ticket, batch(6..12), 13);
        assert_eq!(catalog.items.len(), 12);

        let ticket = catalog.set_sort_key(SortKey::Name);
        assert!(catalog.items.is_empty());
        assert_eq!(catalog.page, 1);
        assert_eq!(catalog.mode, FetchMode::Pager);
        assert!(catalog.has_more);

        catalog.apply(&ticket, batch(0..6), 13);
        assert_eq!(catalog.items.len(), 6);
    }

    #[test]
    fn test_stale_response_after_sort_change_is_discarded() {
        let mut catalog = Catalog::new();
        let old_ticket = catalog.set_sort_key(SortKey::CreatedAt);
        let new_ticket = catalog.set_sort_key(SortKey::Name);

        // the old fetch resolves late; its batch must not land
        assert!(!catalog.apply(&old_ticket, batch(0..6), 13));
        assert!(catalog.items.is_empty());
        assert!(catalog.loading);

        assert!(catalog.apply(&new_ticket, batch(6..12), 6));
        assert_eq!(catalog.items.len(), 6);
        assert!(!catalog.loading);
    }

    #[test]
    fn test_fetch_failed_leaves_state_unchanged() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 13);

        let ticket = catalog.next();
        catalog.fetch_failed(&ticket);
        assert!(!catalog.loading);
        assert_eq!(catalog.items.len(), 6);
        assert_eq!(catalog.page, 2);
    }

    #[test]
    fn test_remove_drops_single_entry() {
        let mut catalog = Catalog::new();
        let ticket = catalog.set_sort_key(SortKey::CreatedAt);
        catalog.apply(&ticket, batch(0..6), 6);

        catalog.remove("id-3");
        assert_eq!(catalog.items.len(), 5);
        assert!(catalog.items.iter().all(|q| q.id != "id-3"));
    }
}
