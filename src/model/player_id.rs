use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::error::{ReplayStatsError, Result};

/// Account platform a player id belongs to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Steam,
    Epic,
    Ps4,
    Xbox,
    Switch,
}

/// Stable per-platform player key, written `platform:id`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerId {
    pub platform: Platform,
    pub id: String,
}

impl PlayerId {
    pub fn new(platform: Platform, id: impl Into<String>) -> Self {
        Self {
            platform,
            id: id.into(),
        }
    }

    /// Parse a replay site profile link of the form
    /// `https://<host>/player/<platform>/<platform-id>`.
    pub fn from_profile_url(link: &str) -> Result<Self> {
        let url = Url::parse(link.trim())?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["player", platform, id] => Self::from_parts(platform, id),
            _ => Err(ReplayStatsError::InvalidPlayerId(link.to_owned())),
        }
    }

    fn from_parts(platform: &str, id: &str) -> Result<Self> {
        let platform = platform
            .parse::<Platform>()
            .map_err(|_| ReplayStatsError::InvalidPlayerId(format!("{platform}:{id}")))?;
        if id.is_empty() {
            return Err(ReplayStatsError::InvalidPlayerId(format!("{platform}:")));
        }
        Ok(Self::new(platform, id))
    }
}

impl FromStr for PlayerId {
    type Err = ReplayStatsError;

    fn from_str(s: &str) -> Result<Self> {
        let (platform, id) = s
            .split_once(':')
            .ok_or_else(|| ReplayStatsError::InvalidPlayerId(s.to_owned()))?;
        Self::from_parts(platform, id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.id)
    }
}
