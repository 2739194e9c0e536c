use crate::model::{MarginBucket, MarginHistogram, Replay, Side};
use crate::stats::resolve::player_side;

/// Side whose derived score is strictly higher; ties go to orange.
pub fn winning_side(replay: &Replay) -> Side {
    replay.score.winner()
}

/// Absolute difference between the two derived scores.
pub fn goal_difference(replay: &Replay) -> u32 {
    replay.score.difference()
}

/// Whether `name` played on the winning side. `false` when the player is not
/// in the replay.
pub fn is_player_winner(replay: &Replay, name: &str) -> bool {
    player_side(replay, name).is_some_and(|side| side == winning_side(replay))
}

/// Whether the game was decided by exactly `n` goals, with `n == 5` standing
/// for "5 or more".
pub fn is_goal_difference(replay: &Replay, n: u32) -> bool {
    let diff = goal_difference(replay);
    match n {
        5 => diff >= 5,
        _ => diff == n,
    }
}

/// Goal-margin bucket for the tracked player, or `None` when the player is
/// missing or the derived scores are level.
pub fn margin_bucket(replay: &Replay, name: &str) -> Option<MarginBucket> {
    player_side(replay, name)?;
    let margin = (1..=5).find(|&n| is_goal_difference(replay, n))?;
    if is_player_winner(replay, name) {
        Some(MarginBucket::Win(margin))
    } else {
        Some(MarginBucket::Loss(margin))
    }
}

/// Count games per goal-margin bucket, from the tracked player's side.
pub fn margin_histogram<'a, I>(replays: I, name: &str) -> MarginHistogram
where
    I: IntoIterator<Item = &'a Replay>,
{
    replays
        .into_iter()
        .filter_map(|replay| margin_bucket(replay, name))
        .fold(MarginHistogram::default(), |mut histogram, bucket| {
            histogram.increment(bucket);
            histogram
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::stats::fixtures::{game, RIVAL, TRACKED};

    #[test]
    fn test_score_read_from_opposing_first_player() {
        // blue's goals come from orange's first player and vice versa
        let replay: Replay = serde_json::from_value(json!({
            "replay_id": "r1",
            "date": "2024-03-04T20:00:00Z",
            "blue": { "players": [
                { "name": TRACKED, "stats": { "core": { "goals_against": 1 } } }
            ]},
            "orange": { "players": [
                { "name": RIVAL, "stats": { "core": { "goals_against": 3 } } }
            ]}
        }))
        .unwrap();

        assert_eq!(replay.score.goals(Side::Blue), 3);
        assert_eq!(replay.score.goals(Side::Orange), 1);
        assert_eq!(winning_side(&replay), Side::Blue);
        assert_eq!(goal_difference(&replay), 2);
        assert!(is_player_winner(&replay, TRACKED));
        assert!(!is_player_winner(&replay, RIVAL));
    }

    #[test]
    fn test_winner_on_orange() {
        let replay = game("r1").side(Side::Orange).score(4, 2).build();

        assert_eq!(winning_side(&replay), Side::Orange);
        assert!(is_player_winner(&replay, TRACKED));
        assert_eq!(goal_difference(&replay), 2);
    }

    #[test]
    fn test_unresolved_player_never_wins() {
        let blue_win = game("r1").side(Side::Blue).score(3, 0).build();
        let orange_win = game("r2").side(Side::Orange).score(3, 0).build();

        assert!(!is_player_winner(&blue_win, "Nobody"));
        assert!(!is_player_winner(&orange_win, "Nobody"));
        assert_eq!(margin_bucket(&blue_win, "Nobody"), None);
    }

    #[test]
    fn test_goal_difference_buckets() {
        let by_four = game("r1").score(5, 1).build();
        let by_seven = game("r2").score(7, 0).build();
        let by_five = game("r3").score(0, 5).build();

        assert!(is_goal_difference(&by_four, 4));
        assert!(!is_goal_difference(&by_four, 5));
        assert!(is_goal_difference(&by_seven, 5));
        assert!(!is_goal_difference(&by_seven, 4));
        assert!(is_goal_difference(&by_five, 5));
    }

    #[test]
    fn test_margin_histogram() {
        let replays = vec![
            game("w1").score(2, 1).build(),
            game("w1b").score(3, 2).build(),
            game("w6").score(6, 0).build(),
            game("l2").side(Side::Orange).score(1, 3).build(),
            game("l5").score(0, 5).build(),
            game("level").score(2, 2).build(),
        ];

        let histogram = margin_histogram(&replays, TRACKED);
        assert_eq!(histogram.get(MarginBucket::Win(1)), 2);
        assert_eq!(histogram.get(MarginBucket::Win(5)), 1);
        assert_eq!(histogram.get(MarginBucket::Loss(2)), 1);
        assert_eq!(histogram.get(MarginBucket::Loss(5)), 1);
        assert_eq!(histogram.counts.iter().sum::<usize>(), 5);
    }
}
