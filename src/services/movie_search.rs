use crate::{
    app::state::SearchOutcome,
    error::AppResult,
    models::Movie,
    services::providers::MovieCatalog,
};

/// Which listing a query maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieQuery<'a> {
    /// No text typed: first page of popular movies
    Popular,
    /// Title search with the text exactly as typed
    Search(&'a str),
}

impl<'a> MovieQuery<'a> {
    pub fn from_text(query: &'a str) -> Self {
        if query.is_empty() {
            MovieQuery::Popular
        } else {
            MovieQuery::Search(query)
        }
    }
}

/// Service function for movie lookup
///
/// An empty query lists popular movies; anything else, whitespace included, is a
/// title search.
pub async fn fetch_movies(catalog: &dyn MovieCatalog, query: &str) -> AppResult<Vec<Movie>> {
    match MovieQuery::from_text(query) {
        MovieQuery::Popular => catalog.discover_movies().await,
        MovieQuery::Search(text) => catalog.search_movies(text).await,
    }
}

/// Folds a fetch result into what the screen shows
pub fn classify(result: AppResult<Vec<Movie>>) -> SearchOutcome {
    match result {
        Ok(movies) => SearchOutcome::Movies(movies),
        Err(e) => {
            tracing::warn!(error = %e, "Movie fetch failed");
            SearchOutcome::Failed(e.user_message())
        }
    }
}
