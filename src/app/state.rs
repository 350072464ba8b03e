use std::sync::Arc;

use tokio::sync::watch;

use crate::models::Movie;

/// What the result area currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPhase {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The latest fetch failed; holds the message shown to the user
    Failed(String),
    /// The latest fetch succeeded
    Loaded(Vec<Movie>),
}

/// Result of one settled fetch, applied to the state by [`SearchStore::settle`]
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Movies(Vec<Movie>),
    Failed(String),
}

impl From<SearchOutcome> for SearchPhase {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Movies(movies) => SearchPhase::Loaded(movies),
            SearchOutcome::Failed(message) => SearchPhase::Failed(message),
        }
    }
}

/// UI state of the search screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text exactly as typed
    pub raw_query: String,
    /// Text the latest fetch was issued for
    pub debounced_query: String,
    pub phase: SearchPhase,
    /// Sequence number of the latest issued fetch
    fetch_seq: u64,
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Movies of the latest successful fetch, empty in every other phase
    pub fn movies(&self) -> &[Movie] {
        match &self.phase {
            SearchPhase::Loaded(movies) => movies,
            _ => &[],
        }
    }
}

/// Proof that a fetch was started; must be handed back to [`SearchStore::settle`]
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a fetch ticket must be settled or the screen stays in the loading state"]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Search state store backed by a watch channel
///
/// Readers borrow the current value without locking; the renderer subscribes and
/// redraws on every change.
#[derive(Clone, Debug)]
pub struct SearchStore {
    sender: Arc<watch::Sender<SearchState>>,
    receiver: watch::Receiver<SearchState>,
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStore {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(SearchState::default());
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get a snapshot of the current state
    pub fn current(&self) -> SearchState {
        self.receiver.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.sender.subscribe()
    }

    pub fn set_raw_query(&self, raw_query: &str) {
        self.sender.send_if_modified(|state| {
            if state.raw_query == raw_query {
                return false;
            }
            state.raw_query = raw_query.to_string();
            true
        });
    }

    /// Enters the loading phase for `query` and returns the ticket of the new fetch
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&self, query: &str) -> FetchTicket {
        let mut seq = 0;
        self.sender.send_modify(|state| {
            state.fetch_seq += 1;
            seq = state.fetch_seq;
            state.debounced_query = query.to_string();
            state.phase = SearchPhase::Loading;
        });
        tracing::debug!(seq = seq, query = %query, "Fetch started");
        FetchTicket { seq }
    }

    /// Applies the outcome of the fetch identified by `ticket`
    ///
    /// Returns `false` and leaves the state untouched when a newer fetch has started
    /// since, so a late response never overwrites the result of a newer query.
    pub fn settle(&self, ticket: FetchTicket, outcome: SearchOutcome) -> bool {
        let applied = self.sender.send_if_modified(|state| {
            if state.fetch_seq != ticket.seq {
                return false;
            }
            state.phase = outcome.into();
            true
        });

        if !applied {
            tracing::debug!(seq = ticket.seq, "Discarding stale fetch result");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: None,
            popularity: 0.0,
            release_date: None,
            vote_average: 0.0,
            original_language: "en".to_string(),
            stream_info: None,
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let store = SearchStore::new();
        let state = store.current();

        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), None);
        assert!(state.movies().is_empty());
    }

    #[test]
    fn test_begin_fetch_enters_loading() {
        let store = SearchStore::new();
        let ticket = store.begin_fetch("Inception");

        let state = store.current();
        assert!(state.is_loading());
        assert_eq!(state.debounced_query, "Inception");
        assert_eq!(ticket.seq(), 1);
    }

    #[test]
    fn test_settle_success_clears_error() {
        let store = SearchStore::new();

        let ticket = store.begin_fetch("broken");
        assert!(store.settle(ticket, SearchOutcome::Failed("Something went wrong!".into())));
        assert_eq!(store.current().error_message(), Some("Something went wrong!"));

        let ticket = store.begin_fetch("Inception");
        assert!(store.settle(ticket, SearchOutcome::Movies(vec![movie(27205, "Inception")])));

        let state = store.current();
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), None);
        assert_eq!(state.movies(), &[movie(27205, "Inception")]);
    }

    #[test]
    fn test_settle_failure_clears_movies() {
        let store = SearchStore::new();

        let ticket = store.begin_fetch("Inception");
        assert!(store.settle(ticket, SearchOutcome::Movies(vec![movie(27205, "Inception")])));

        let ticket = store.begin_fetch("nothing");
        assert!(store.settle(ticket, SearchOutcome::Failed("Movie not found!".into())));

        let state = store.current();
        assert!(!state.is_loading());
        assert!(state.movies().is_empty());
        assert_eq!(state.error_message(), Some("Movie not found!"));
    }

    #[test]
    fn test_stale_result_discarded() {
        let store = SearchStore::new();

        let first = store.begin_fetch("Incep");
        let second = store.begin_fetch("Inception");

        assert!(store.settle(second, SearchOutcome::Movies(vec![movie(27205, "Inception")])));
        assert!(!store.settle(first, SearchOutcome::Movies(vec![movie(1, "Inceptional")])));

        let state = store.current();
        assert_eq!(state.debounced_query, "Inception");
        assert_eq!(state.movies()[0].id, 27205);
    }

    #[test]
    fn test_stale_result_keeps_loading_until_latest_settles() {
        let store = SearchStore::new();

        let first = store.begin_fetch("a");
        let second = store.begin_fetch("ab");

        assert!(!store.settle(first, SearchOutcome::Failed("Something went wrong!".into())));
        assert!(store.current().is_loading());

        assert!(store.settle(second, SearchOutcome::Movies(vec![])));
        assert!(!store.current().is_loading());
    }

    #[test]
    fn test_set_raw_query() {
        let store = SearchStore::new();
        store.set_raw_query("Incep");

        let state = store.current();
        assert_eq!(state.raw_query, "Incep");
        assert_eq!(state.debounced_query, "");
        assert_eq!(state.phase, SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_subscribers_notified() {
        let store = SearchStore::new();
        let mut rx = store.subscribe();

        let ticket = store.begin_fetch("");
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        let _ = store.settle(ticket, SearchOutcome::Movies(vec![]));
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_loading());
    }
}
