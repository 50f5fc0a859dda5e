use thiserror::Error;

/// Failures surfaced by the resolution pipeline.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Empty or whitespace-only place name; rejected before any lookup.
    #[error("Please enter a place name")]
    Input,

    /// The geocoding service returned no candidates.
    #[error("No location found for '{0}'")]
    NotFound(String),

    /// Transport failure, unexpected status or malformed response.
    #[error(transparent)]
    Lookup(#[from] anyhow::Error),
}
