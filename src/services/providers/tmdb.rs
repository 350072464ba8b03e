/// TMDB API provider
///
/// API Flow:
/// 1. Search: /search/movie?query=... → paginated movie list
/// 2. Discover: /discover/movie?...&sort_by=popularity.desc → popular movies, page 1
/// 3. Providers: /movie/{id}/watch/providers → offers keyed by region
///
/// Authentication is a static bearer token installed as a default header on the
/// shared HTTP client, together with `accept: application/json`.
use crate::{
    config::Config,
    error::{AppError, AppResult, DEFAULT_API_ERROR_MESSAGE},
    models::{ApiMoviePage, ApiWatchProviders, Movie},
    services::providers::MovieCatalog,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client as HttpClient,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DISCOVER_QUERY: &str =
    "include_adult=false&include_video=false&language=en-US&page=1&sort_by=popularity.desc";

/// Characters `encodeURIComponent` leaves as-is besides ASCII alphanumerics
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a provider whose client sends the bearer token on every request
    pub fn new(api_key: &str, api_url: &str, timeout: Duration) -> AppResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| AppError::Config(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(&config.api_key, &config.api_url, config.request_timeout())
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?query={}",
            self.api_url,
            utf8_percent_encode(query, QUERY_COMPONENT)
        )
    }

    pub fn discover_url(&self) -> String {
        format!("{}/discover/movie?{}", self.api_url, DISCOVER_QUERY)
    }

    pub fn watch_providers_url(&self, movie_id: i64) -> String {
        format!("{}/movie/{}/watch/providers", self.api_url, movie_id)
    }

    /// GETs `url` and decodes the body, treating any non-success status as an error
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = %status,
                body = %body,
                "TMDB request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, url = %url, "Failed to deserialize TMDB response");
            AppError::Decode(e)
        })
    }

    /// Turns a result page into movies, surfacing a payload failure flag as an error
    fn into_movies(page: ApiMoviePage) -> AppResult<Vec<Movie>> {
        if let Some(message) = page.reported_failure() {
            return Err(AppError::ApiReported(
                message.unwrap_or(DEFAULT_API_ERROR_MESSAGE).to_string(),
            ));
        }
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        let page: ApiMoviePage = self.get_json(&self.search_url(query)).await?;
        let movies = Self::into_movies(page)?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn discover_movies(&self) -> AppResult<Vec<Movie>> {
        let page: ApiMoviePage = self.get_json(&self.discover_url()).await?;
        let movies = Self::into_movies(page)?;

        tracing::info!(
            results = movies.len(),
            provider = self.name(),
            "Popular movies fetched"
        );

        Ok(movies)
    }

    async fn fetch_provider_names(&self, movie_id: i64, region: &str) -> AppResult<Vec<String>> {
        let providers: ApiWatchProviders =
            self.get_json(&self.watch_providers_url(movie_id)).await?;

        let names: Vec<String> = providers
            .provider_names(region)
            .into_iter()
            .map(str::to_string)
            .collect();

        tracing::debug!(
            movie_id = movie_id,
            region = %region,
            providers = names.len(),
            "Watch providers fetched"
        );

        Ok(names)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
