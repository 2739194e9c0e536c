use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{ReplayStatsError, Result};
use crate::ingest::dedup_by_match_guid;
use crate::model::{PlayerId, ReplayBatch};

const FETCH_REPLAYS_PATH: &str = "/api/players/fetch_replays";

#[derive(Serialize)]
struct FetchReplaysRequest {
    player_id: String,
}

/// Fetches replay batches from the stats backend.
///
/// `ReplayClient` wraps a [`reqwest::Client`] and a backend base URL. The
/// returned batch is already de-duplicated by match guid and ready for
/// [`PlayerReport`](crate::PlayerReport).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> replay_stats::Result<()> {
/// use replay_stats::{PlayerId, ReplayClient};
///
/// let client = ReplayClient::new("http://localhost:3000");
/// let profile = "https://ballchasing.com/player/steam/76561198000000000";
/// let player = PlayerId::from_profile_url(profile)?;
/// let replays = client.fetch_replays(&player).await?;
/// println!("Fetched {} replays", replays.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReplayClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReplayClient {
    /// Create a new client with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http: client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every replay the backend holds for `player`.
    ///
    /// Any status of 400 or above is an error; nothing is retried.
    #[instrument(skip(self, player), fields(player = %player))]
    pub async fn fetch_replays(&self, player: &PlayerId) -> Result<ReplayBatch> {
        let url = format!("{}{FETCH_REPLAYS_PATH}", self.base_url);
        let body = serde_json::to_string(&FetchReplaysRequest {
            player_id: player.to_string(),
        })?;
        debug!(url, "fetching replays");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ReplayStatsError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(ReplayStatsError::UnexpectedStatus { url, status });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ReplayStatsError::ResponseBody {
                url: url.clone(),
                source: e,
            })?;

        let replays: ReplayBatch = serde_json::from_str(&text)?;
        debug!(count = replays.len(), "decoded replay batch");
        Ok(dedup_by_match_guid(replays))
    }
}
