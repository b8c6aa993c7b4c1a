use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("No API key configured")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response shape: {0}")]
    BadResponse(String),
}
