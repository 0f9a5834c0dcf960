//! Error types shared by the catalog client and the playback core.

/// Failures talking to the remote catalog / stream resolver.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request rejected, connection refused or timed out
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status; `message` is the API's `error` field when present
    #[error("catalog returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Body was not the JSON we expected
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed response without usable content
    #[error("no results: {0}")]
    EmptyResult(String),
}

impl CatalogError {
    pub fn empty(what: impl Into<String>) -> Self {
        Self::EmptyResult(what.into())
    }

    /// True for responses that carried no content rather than a transport failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult(_))
    }
}

/// Failures starting or switching playback.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("could not resolve playback: {0}")]
    Resolution(#[from] CatalogError),

    #[error("catalog returned no stream url for {0}")]
    MissingUrl(String),

    /// A newer `start_playback` began while this one was in flight.
    #[error("playback request for {0} was superseded")]
    Superseded(String),

    #[error("media output: {0}")]
    Output(String),
}

impl PlaybackError {
    /// Errors the user should see. Superseded requests are dropped silently.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Superseded(_))
    }
}
