use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Shown on a card when no provider list could be resolved
pub const PROVIDER_FALLBACK: &str = "Sorry, we can't provide platform";

/// A movie as shown on a result card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    /// Human-readable provider list, attached by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_info: Option<String>,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}

/// TMDB sends `""` for unknown release dates; anything that is not a full
/// `YYYY-MM-DD` date is treated as unknown too
fn deserialize_release_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}

/// Display-only fields: `null` reads as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw payload of `/search/movie` and `/discover/movie`
///
/// Besides the paginated result list, a payload may carry a failure flag instead:
/// either `"Response": "False"` with an `"Error"` message, or TMDB's own
/// `"success": false` with a `"status_message"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMoviePage {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: Option<i64>,
    #[serde(default)]
    pub total_results: Option<i64>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl ApiMoviePage {
    /// Returns the failure the payload reports, if any
    ///
    /// The outer `Option` says whether a failure was flagged, the inner one carries
    /// the message when the API supplied one.
    pub fn reported_failure(&self) -> Option<Option<&str>> {
        if self.response.as_deref() == Some("False") {
            return Some(self.error.as_deref());
        }
        if self.success == Some(false) {
            return Some(self.status_message.as_deref());
        }
        None
    }
}

/// Payload of `/movie/{id}/watch/providers`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiWatchProviders {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub results: HashMap<String, ApiRegionProviders>,
}

/// Offers for one region, grouped by offer category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Option<Vec<ApiProvider>>,
    #[serde(default)]
    pub buy: Option<Vec<ApiProvider>>,
    #[serde(default)]
    pub rent: Option<Vec<ApiProvider>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProvider {
    #[serde(default)]
    pub provider_id: Option<i64>,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

impl ApiWatchProviders {
    /// Provider names for `region`, preferring flat-rate, then buy, then rent
    pub fn provider_names(&self, region: &str) -> Vec<&str> {
        let Some(offers) = self.results.get(region) else {
            return Vec::new();
        };

        [&offers.flatrate, &offers.buy, &offers.rent]
            .into_iter()
            .flatten()
            .find(|list| !list.is_empty())
            .map(|list| list.iter().map(|p| p.provider_name.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Display string for a movie's streaming availability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo(String);

impl ProviderInfo {
    pub fn from_names(names: &[&str]) -> Self {
        if names.is_empty() {
            Self::unavailable()
        } else {
            Self(names.join(", "))
        }
    }

    pub fn unavailable() -> Self {
        Self(PROVIDER_FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ProviderInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
