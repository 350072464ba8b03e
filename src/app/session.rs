use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    app::{
        debounce::DebounceOutput,
        state::{FetchTicket, SearchOutcome, SearchStore},
    },
    config::Config,
    services::{enrichment, movie_search, providers::MovieCatalog},
};

/// Knobs of the fetch flow taken from [`Config`]
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub enrich_providers: bool,
    pub watch_region: String,
    pub enrichment_concurrency: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            enrich_providers: true,
            watch_region: "HU".to_string(),
            enrichment_concurrency: 8,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            enrich_providers: config.enrich_providers,
            watch_region: config.watch_region.clone(),
            enrichment_concurrency: config.enrichment_concurrency,
        }
    }
}

/// The search screen: owns the state and turns settled queries into fetches
pub struct SearchSession {
    catalog: Arc<dyn MovieCatalog>,
    store: SearchStore,
    options: SessionOptions,
}

impl SearchSession {
    pub fn new(catalog: Arc<dyn MovieCatalog>, options: SessionOptions) -> Self {
        Self {
            catalog,
            store: SearchStore::new(),
            options,
        }
    }

    pub fn store(&self) -> &SearchStore {
        &self.store
    }

    /// Records the text currently in the search box
    pub fn set_raw_query(&self, raw_query: &str) {
        self.store.set_raw_query(raw_query);
    }

    /// Runs one full fetch for `query` and applies its outcome
    pub async fn run_query(&self, query: &str) {
        let ticket = self.store.begin_fetch(query);
        self.complete(ticket, query).await;
    }

    async fn complete(&self, ticket: FetchTicket, query: &str) {
        let outcome = self.fetch(query).await;
        let seq = ticket.seq();

        if self.store.settle(ticket, outcome) {
            tracing::debug!(seq = seq, query = %query, "Fetch settled");
        }
    }

    async fn fetch(&self, query: &str) -> SearchOutcome {
        let result = movie_search::fetch_movies(self.catalog.as_ref(), query).await;

        match result {
            Ok(movies) if self.options.enrich_providers => {
                let movies = enrichment::enrich_movies(
                    self.catalog.as_ref(),
                    movies,
                    &self.options.watch_region,
                    self.options.enrichment_concurrency,
                )
                .await;
                SearchOutcome::Movies(movies)
            }
            other => movie_search::classify(other),
        }
    }

    /// Drives the session until the debounced input closes
    ///
    /// Popular movies are fetched right away. After that, every settled query that
    /// differs from the previous one starts its own fetch; older fetches keep running
    /// but their results are discarded once a newer one has started.
    pub async fn run(self: Arc<Self>, mut queries: DebounceOutput<String>) {
        let mut tasks = JoinSet::new();
        let mut last_query = String::new();
        self.spawn_fetch(&mut tasks, last_query.clone());

        while let Some(query) = queries.next().await {
            if query == last_query {
                tracing::debug!(query = %query, "Query unchanged, skipping fetch");
                continue;
            }
            last_query = query.clone();
            self.spawn_fetch(&mut tasks, query);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Fetch task failed");
            }
        }
    }

    fn spawn_fetch(self: &Arc<Self>, tasks: &mut JoinSet<()>, query: String) {
        // Tickets are issued in input order before the task is spawned.
        let ticket = self.store.begin_fetch(&query);
        let session = Arc::clone(self);
        tasks.spawn(async move { session.complete(ticket, &query).await });
    }
}
