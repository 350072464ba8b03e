//! Streaming provider enrichment for a page of movies.
//!
//! Each movie gets one watch-providers lookup. Lookups run concurrently up to a fixed
//! limit, and the page is returned only once every lookup has settled, in the original
//! order. A failed lookup degrades to the fallback text for that movie alone.

use futures::stream::{self, StreamExt};

use crate::{
    models::{Movie, ProviderInfo},
    services::providers::MovieCatalog,
};

/// Provider text for a single movie, never failing
pub async fn provider_info(catalog: &dyn MovieCatalog, movie_id: i64, region: &str) -> ProviderInfo {
    match catalog.fetch_provider_names(movie_id, region).await {
        Ok(names) => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            ProviderInfo::from_names(&names)
        }
        Err(e) => {
            tracing::warn!(
                movie_id = movie_id,
                error = %e,
                "Watch provider lookup failed"
            );
            ProviderInfo::unavailable()
        }
    }
}

/// Attaches `stream_info` to every movie, keeping order
pub async fn enrich_movies(
    catalog: &dyn MovieCatalog,
    movies: Vec<Movie>,
    region: &str,
    concurrency: usize,
) -> Vec<Movie> {
    let total = movies.len();

    let enriched: Vec<Movie> = stream::iter(movies)
        .map(|mut movie| async move {
            movie.stream_info = Some(provider_info(catalog, movie.id, region).await.into_string());
            movie
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    tracing::debug!(movies = total, region = %region, "Provider enrichment completed");

    enriched
}
