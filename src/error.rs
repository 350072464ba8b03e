/// Message shown for any failure the API did not describe itself
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Message shown when the API flags a failure without saying why
pub const DEFAULT_API_ERROR_MESSAGE: &str = "Failed to fetch movies";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload itself reported a failure
    #[error("API reported failure: {0}")]
    ApiReported(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown to the user in place of the movie list
    pub fn user_message(&self) -> String {
        match self {
            AppError::ApiReported(msg) => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
