use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use super::PlayerId;

/// A fetched batch of replays, in the order the server returned them.
pub type ReplayBatch = Vec<Replay>;

/// One of the two competing rosters in a replay.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Blue,
    Orange,
}

impl Side {
    /// The opposing side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Orange,
            Side::Orange => Side::Blue,
        }
    }
}

/// One completed match record.
///
/// Deserialized from the wire shape and never mutated afterwards. The
/// per-side [`Scoreboard`] is derived once while decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ReplayWire")]
pub struct Replay {
    pub replay_id: String,
    pub match_guid: Option<String>,
    pub map_name: String,
    pub date: DateTime<FixedOffset>,
    pub overtime_seconds: Option<u32>,
    pub playlist_id: String,
    pub blue: Team,
    pub orange: Team,
    pub score: Scoreboard,
}

impl Replay {
    /// The roster playing on `side`.
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Blue => &self.blue,
            Side::Orange => &self.orange,
        }
    }

    /// Calendar date of the match in its own UTC offset.
    pub fn played_on(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Overtime length in seconds, or `None` when the match ended in regulation.
    pub fn overtime(&self) -> Option<u32> {
        self.overtime_seconds.filter(|&secs| secs > 0)
    }
}

/// Wire shape of a replay as served by the fetch endpoint.
#[derive(Deserialize)]
struct ReplayWire {
    #[serde(alias = "id")]
    replay_id: String,
    #[serde(default)]
    match_guid: Option<String>,
    #[serde(default)]
    map_name: String,
    date: DateTime<FixedOffset>,
    #[serde(default)]
    overtime_seconds: Option<u32>,
    #[serde(default)]
    playlist_id: String,
    #[serde(default)]
    blue: Option<Team>,
    #[serde(default)]
    orange: Option<Team>,
}

impl From<ReplayWire> for Replay {
    fn from(wire: ReplayWire) -> Self {
        let blue = wire.blue.unwrap_or_default();
        let orange = wire.orange.unwrap_or_default();
        let score = Scoreboard::from_rosters(&blue, &orange);
        Replay {
            replay_id: wire.replay_id,
            match_guid: wire.match_guid,
            map_name: wire.map_name,
            date: wire.date,
            overtime_seconds: wire.overtime_seconds,
            playlist_id: wire.playlist_id,
            blue,
            orange,
            score,
        }
    }
}

/// Goals scored by each side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub blue: u32,
    pub orange: u32,
}

impl Scoreboard {
    /// Derive the score from the rosters.
    ///
    /// `goals_against` is a team figure copied onto every player, so a side's
    /// goals are read from the first listed player of the opposing side. An
    /// empty roster reads as 0.
    pub fn from_rosters(blue: &Team, orange: &Team) -> Self {
        let conceded = |team: &Team| {
            team.players
                .first()
                .map(|p| p.stats.core.goals_against)
                .unwrap_or_default()
        };
        Scoreboard {
            blue: conceded(orange),
            orange: conceded(blue),
        }
    }

    pub fn goals(&self, side: Side) -> u32 {
        match side {
            Side::Blue => self.blue,
            Side::Orange => self.orange,
        }
    }

    /// Blue wins only with a strictly higher score; everything else goes to orange.
    pub fn winner(&self) -> Side {
        if self.blue > self.orange {
            Side::Blue
        } else {
            Side::Orange
        }
    }

    pub fn difference(&self) -> u32 {
        self.blue.abs_diff(self.orange)
    }
}

/// A roster for one side.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerRecord>,
}

/// One participant's performance in one replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// `None` when the wire omits the id or carries one that does not parse.
    #[serde(default, deserialize_with = "lenient_player_id")]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub car_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: PlayerStats,
}

/// Stat sub-records for a player. Missing or `null` sections decode as zero.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    #[serde(deserialize_with = "null_as_default")]
    pub core: CoreStats,
    #[serde(deserialize_with = "null_as_default")]
    pub boost: BoostStats,
    #[serde(deserialize_with = "null_as_default")]
    pub movement: MovementStats,
    #[serde(deserialize_with = "null_as_default")]
    pub demo: DemoStats,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreStats {
    #[serde(deserialize_with = "null_as_default")]
    pub goals: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub shots: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub saves: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub assists: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub score: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub shooting_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub goals_against: u32,
}

/// Boost usage, per minute of play.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostStats {
    #[serde(deserialize_with = "null_as_default")]
    pub bpm: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub bcpm: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementStats {
    #[serde(deserialize_with = "null_as_default")]
    pub percent_supersonic_speed: f64,
    /// Unreal units per second.
    #[serde(deserialize_with = "null_as_default")]
    pub avg_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_distance: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoStats {
    #[serde(deserialize_with = "null_as_default")]
    pub inflicted: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub taken: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_player_id<'de, D>(deserializer: D) -> std::result::Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(PlayerId::deserialize(value).ok())
}
