//! Movie metadata source abstraction
//!
//! The session and the enrichment step only talk to [`MovieCatalog`], so tests can swap
//! the HTTP-backed TMDB implementation for a mock.
use crate::{error::AppResult, models::Movie};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Every method maps a single outbound request. Payload-level failure flags are turned
/// into [`crate::error::AppError::ApiReported`] by the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search movies by title text
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// First page of popular movies, used when there is no query
    async fn discover_movies(&self) -> AppResult<Vec<Movie>>;

    /// Provider display names for one movie in `region`
    ///
    /// Flat-rate offers win over buy offers, which win over rent offers. An empty list
    /// means nothing is offered in that region.
    async fn fetch_provider_names(&self, movie_id: i64, region: &str) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
