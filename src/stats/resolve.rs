use crate::model::{PlayerId, PlayerRecord, Replay, Side};

const SEARCH_ORDER: [Side; 2] = [Side::Blue, Side::Orange];

/// Find `name` in the replay, searching blue before orange.
///
/// Matching is exact and case-sensitive. Returns `None` when no roster holds
/// the name.
pub fn resolve_player<'a>(replay: &'a Replay, name: &str) -> Option<&'a PlayerRecord> {
    resolve_with_side(replay, name).map(|(_, player)| player)
}

/// The side `name` played on, if the player is in the replay.
pub fn player_side(replay: &Replay, name: &str) -> Option<Side> {
    resolve_with_side(replay, name).map(|(side, _)| side)
}

/// Find a player by stable platform id rather than display name.
///
/// Records that carry no id never match.
pub fn resolve_player_by_id<'a>(replay: &'a Replay, id: &PlayerId) -> Option<&'a PlayerRecord> {
    SEARCH_ORDER.iter().find_map(|&side| {
        replay
            .team(side)
            .players
            .iter()
            .find(|p| p.id.as_ref() == Some(id))
    })
}

fn resolve_with_side<'a>(replay: &'a Replay, name: &str) -> Option<(Side, &'a PlayerRecord)> {
    SEARCH_ORDER.iter().find_map(|&side| {
        replay
            .team(side)
            .players
            .iter()
            .find(|p| p.name == name)
            .map(|p| (side, p))
    })
}
