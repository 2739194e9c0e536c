/// All errors that can occur while fetching or decoding a replay batch.
///
/// The statistics engine itself never fails; these only come out of the
/// client and the player id parsers.
#[derive(thiserror::Error, Debug)]
pub enum ReplayStatsError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server answered with a status of 400 or above.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not a valid replay batch.
    #[error("failed to decode replay batch: {0}")]
    Decode(#[from] serde_json::Error),

    /// A player profile link could not be parsed as a URL.
    #[error("invalid profile url: {0}")]
    ProfileUrl(#[from] url::ParseError),

    /// A player id or profile path did not have the `platform/id` shape.
    #[error("invalid player id: {0}")]
    InvalidPlayerId(String),
}

pub type Result<T> = std::result::Result<T, ReplayStatsError>;
