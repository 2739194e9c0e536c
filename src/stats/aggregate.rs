use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::model::{CarFilter, CoreAverages, CoreStats, MaxGroups, OvertimeSummary, Replay};
use crate::stats::metrics::{core_stats, used_car, with_used_car};
use crate::stats::outcome::{goal_difference, is_player_winner};
use crate::stats::resolve::player_side;

/// Partition replays by `key`, keeping input order inside each group.
pub fn group_by<'a, I, K, F>(replays: I, mut key: F) -> BTreeMap<K, Vec<&'a Replay>>
where
    I: IntoIterator<Item = &'a Replay>,
    K: Ord,
    F: FnMut(&Replay) -> K,
{
    replays
        .into_iter()
        .fold(BTreeMap::new(), |mut groups, replay| {
            groups.entry(key(replay)).or_insert_with(Vec::new).push(replay);
            groups
        })
}

pub fn games_per_group<K: Ord + Clone>(groups: &BTreeMap<K, Vec<&Replay>>) -> BTreeMap<K, usize> {
    groups
        .iter()
        .map(|(key, games)| (key.clone(), games.len()))
        .collect()
}

/// Number of games in each group that `name` won. Groups without a win are
/// kept with a count of 0.
pub fn wins_per_group<K: Ord + Clone>(
    groups: &BTreeMap<K, Vec<&Replay>>,
    name: &str,
) -> BTreeMap<K, usize> {
    groups
        .iter()
        .map(|(key, games)| {
            let wins = games.iter().filter(|r| is_player_winner(r, name)).count();
            (key.clone(), wins)
        })
        .collect()
}

/// All keys sharing the largest count, in key order. Ties are never broken.
pub fn groups_with_max<K: Clone>(counts: &BTreeMap<K, usize>) -> MaxGroups<K> {
    let Some(&max_val) = counts.values().max() else {
        return MaxGroups::default();
    };
    MaxGroups {
        max_val,
        max_keys: counts
            .iter()
            .filter(|&(_, &count)| count == max_val)
            .map(|(key, _)| key.clone())
            .collect(),
    }
}

pub fn maps_with_most_wins<'a, I>(replays: I, name: &str) -> MaxGroups<String>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let by_map = group_by(replays, |r| r.map_name.clone());
    groups_with_max(&wins_per_group(&by_map, name))
}

pub fn maps_with_most_games<'a, I>(replays: I) -> MaxGroups<String>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let by_map = group_by(replays, |r| r.map_name.clone());
    groups_with_max(&games_per_group(&by_map))
}

pub fn dates_with_most_wins<'a, I>(replays: I, name: &str) -> MaxGroups<NaiveDate>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let by_date = group_by(replays, Replay::played_on);
    groups_with_max(&wins_per_group(&by_date, name))
}

pub fn dates_with_most_games<'a, I>(replays: I) -> MaxGroups<NaiveDate>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let by_date = group_by(replays, Replay::played_on);
    groups_with_max(&games_per_group(&by_date))
}

pub fn sum<'a, I, F, T>(replays: I, mut metric: F) -> f64
where
    I: IntoIterator<Item = &'a Replay>,
    F: FnMut(&Replay) -> T,
    T: Into<f64>,
{
    replays
        .into_iter()
        .map(|r| -> f64 { metric(r).into() })
        .sum()
}

/// Arithmetic mean of `metric`, or `None` over an empty sequence.
pub fn average<'a, I, F, T>(replays: I, mut metric: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Replay>,
    F: FnMut(&Replay) -> T,
    T: Into<f64>,
{
    let (total, count) = replays.into_iter().fold((0.0, 0usize), |(total, count), r| {
        let value: f64 = metric(r).into();
        (total + value, count + 1)
    });
    ratio(total, count)
}

pub(crate) fn ratio(numerator: f64, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator / denominator as f64)
}

/// Games `name` won.
pub fn wins<'a, I>(replays: I, name: &str) -> Vec<&'a Replay>
where
    I: IntoIterator<Item = &'a Replay>,
{
    replays
        .into_iter()
        .filter(|r| is_player_winner(r, name))
        .collect()
}

/// Games `name` played in and lost. Replays without the player are in
/// neither [`wins`] nor `losses`.
pub fn losses<'a, I>(replays: I, name: &str) -> Vec<&'a Replay>
where
    I: IntoIterator<Item = &'a Replay>,
{
    replays
        .into_iter()
        .filter(|r| player_side(r, name).is_some() && !is_player_winner(r, name))
        .collect()
}

pub fn with_car<'a, I>(replays: I, name: &str, filter: &CarFilter) -> Vec<&'a Replay>
where
    I: IntoIterator<Item = &'a Replay>,
{
    match filter {
        CarFilter::All => replays.into_iter().collect(),
        CarFilter::Car(car) => replays
            .into_iter()
            .filter(|r| with_used_car(r, name, car))
            .collect(),
    }
}

/// Distinct cars `name` drove, in first-seen order.
pub fn used_cars<'a, I>(replays: I, name: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a Replay>,
{
    replays
        .into_iter()
        .filter_map(|r| used_car(r, name))
        .unique()
        .map(str::to_owned)
        .collect()
}

/// Largest single-game value of `metric`.
pub fn max_metric<'a, I, F, T>(replays: I, metric: F) -> Option<T>
where
    I: IntoIterator<Item = &'a Replay>,
    F: FnMut(&Replay) -> T,
    T: PartialOrd,
{
    replays.into_iter().map(metric).fold(None, |best, value| match best {
        Some(best) if best >= value => Some(best),
        _ => Some(value),
    })
}

/// The won game with the largest goal difference. The first one in input
/// order wins a tie.
pub fn biggest_win<'a, I>(replays: I, name: &str) -> Option<&'a Replay>
where
    I: IntoIterator<Item = &'a Replay>,
{
    replays
        .into_iter()
        .filter(|r| is_player_winner(r, name))
        .fold(None, |best, replay| match best {
            Some(best) if goal_difference(best) >= goal_difference(replay) => Some(best),
            _ => Some(replay),
        })
}

pub fn overtime_summary<'a, I>(replays: I, name: &str) -> OvertimeSummary
where
    I: IntoIterator<Item = &'a Replay>,
{
    let replays = replays.into_iter().collect_vec();
    let (won, lost): (Vec<(&Replay, u32)>, Vec<(&Replay, u32)>) = replays
        .iter()
        .filter_map(|r| r.overtime().map(|secs| (*r, secs)))
        .partition(|(r, _)| is_player_winner(r, name));
    let games = won.len() + lost.len();

    let longest_win = won.iter().map(|&(_, secs)| secs).max();
    let longest_loss = lost.iter().map(|&(_, secs)| secs).max();
    OvertimeSummary {
        games,
        fraction: ratio(games as f64, replays.len()),
        win_rate: ratio(won.len() as f64, games),
        longest: longest_win.max(longest_loss),
        longest_win,
        longest_loss,
    }
}

/// Mean core stats for `name`. Unresolved replays count as zeros.
pub fn core_averages<'a, I>(replays: I, name: &str) -> Option<CoreAverages>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let stats = replays
        .into_iter()
        .map(|r| core_stats(r, name))
        .collect_vec();
    let count = stats.len();
    let mean = |field: fn(&CoreStats) -> f64| {
        ratio(stats.iter().map(field).sum(), count)
    };

    Some(CoreAverages {
        goals: mean(|s| s.goals.into())?,
        shots: mean(|s| s.shots.into())?,
        saves: mean(|s| s.saves.into())?,
        assists: mean(|s| s.assists.into())?,
        score: mean(|s| s.score.into())?,
        shooting_percentage: mean(|s| s.shooting_percentage)?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Side;
    use crate::stats::fixtures::{game, TRACKED};
    use crate::stats::metrics::{demos_inflicted, percent_supersonic_speed};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_group_by_preserves_order() {
        let replays = vec![
            game("1").map("Mannfield").build(),
            game("2").map("Beckwith Park").build(),
            game("3").map("Mannfield").build(),
        ];

        let groups = group_by(&replays, |r| r.map_name.clone());
        let ids: Vec<_> = groups["Mannfield"].iter().map(|r| r.replay_id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(groups.keys().collect_vec(), ["Beckwith Park", "Mannfield"]);
    }

    #[test]
    fn test_group_by_empty() {
        let replays: Vec<Replay> = Vec::new();
        let groups = group_by(&replays, |r| r.map_name.clone());
        assert!(groups.is_empty());
        assert_eq!(groups_with_max(&games_per_group(&groups)), MaxGroups::default());
        assert_eq!(maps_with_most_wins(&replays, TRACKED), MaxGroups::default());
    }

    #[test]
    fn test_groups_with_max_keeps_ties() {
        let counts = BTreeMap::from([("A", 3), ("B", 3), ("C", 1)]);
        assert_eq!(
            groups_with_max(&counts),
            MaxGroups {
                max_val: 3,
                max_keys: vec!["A", "B"],
            }
        );
    }

    #[test]
    fn test_maps_with_most_wins_and_games() {
        let replays = vec![
            game("1").map("A").score(2, 0).build(),
            game("2").map("A").score(0, 2).build(),
            game("3").map("A").score(1, 0).build(),
            game("4").map("B").score(3, 1).build(),
            game("5").map("B").score(4, 1).build(),
            game("6").map("C").score(0, 1).build(),
        ];

        let most_wins = maps_with_most_wins(&replays, TRACKED);
        assert_eq!(most_wins.max_val, 2);
        assert_eq!(most_wins.max_keys, ["A", "B"]);

        let most_games = maps_with_most_games(&replays);
        assert_eq!(most_games.max_val, 3);
        assert_eq!(most_games.max_keys, ["A"]);
    }

    #[test]
    fn test_dates_with_most_wins_and_games() {
        let replays = vec![
            game("1").on("2024-03-01").score(0, 1).build(),
            game("2").on("2024-03-01").score(0, 1).build(),
            game("3").on("2024-03-02").score(1, 0).build(),
        ];

        let most_wins = dates_with_most_wins(&replays, TRACKED);
        assert_eq!(most_wins.max_val, 1);
        assert_eq!(most_wins.max_keys, [date("2024-03-02")]);

        let most_games = dates_with_most_games(&replays);
        assert_eq!(most_games.max_val, 2);
        assert_eq!(most_games.max_keys, [date("2024-03-01")]);
    }

    #[test]
    fn test_average_and_sum() {
        let replays = vec![
            game("1").stats(json!({ "movement": { "percent_supersonic_speed": 10.0 } })).build(),
            game("2").stats(json!({ "movement": { "percent_supersonic_speed": 20.0 } })).build(),
        ];

        assert_eq!(average(&replays, |r| percent_supersonic_speed(r, TRACKED)), Some(15.0));
        assert_eq!(sum(&replays, |r| percent_supersonic_speed(r, TRACKED)), 30.0);
        // unresolved player counts as zero but stays in the denominator
        assert_eq!(average(&replays, |r| percent_supersonic_speed(r, "Nobody")), Some(0.0));
    }

    #[test]
    fn test_average_of_empty_is_none() {
        let replays: Vec<Replay> = Vec::new();
        assert_eq!(average(&replays, |r| demos_inflicted(r, TRACKED)), None);
        assert_eq!(core_averages(&replays, TRACKED), None);
    }

    #[test]
    fn test_wins_losses_and_missing_player() {
        let replays = vec![
            game("w").score(2, 1).build(),
            game("l").side(Side::Orange).score(0, 1).build(),
        ];

        assert_eq!(wins(&replays, TRACKED).len(), 1);
        assert_eq!(losses(&replays, TRACKED)[0].replay_id, "l");
        assert!(wins(&replays, "Nobody").is_empty());
        assert!(losses(&replays, "Nobody").is_empty());
    }

    #[test]
    fn test_car_filter_and_used_cars() {
        let replays = vec![
            game("1").car("Octane").build(),
            game("2").car("Fennec").build(),
            game("3").build(),
            game("4").car("Octane").build(),
        ];

        assert_eq!(used_cars(&replays, TRACKED), ["Octane", "Fennec"]);
        assert_eq!(with_car(&replays, TRACKED, &CarFilter::All).len(), 4);
        let octane = with_car(&replays, TRACKED, &CarFilter::Car("Octane".into()));
        assert_eq!(octane.iter().map(|r| r.replay_id.as_str()).collect_vec(), ["1", "4"]);
        assert!(with_car(&replays, TRACKED, &CarFilter::Car("Dominus".into())).is_empty());
    }

    #[test]
    fn test_extremes() {
        let replays = vec![
            game("1").score(3, 0).stats(json!({ "demo": { "inflicted": 2 } })).build(),
            game("2").score(0, 6).stats(json!({ "demo": { "inflicted": 5 } })).build(),
            game("3").score(4, 1).build(),
            game("4").score(2, 1).build(),
        ];

        assert_eq!(max_metric(&replays, |r| demos_inflicted(r, TRACKED)), Some(5));
        assert_eq!(max_metric(&Vec::<Replay>::new(), |r| demos_inflicted(r, TRACKED)), None);
        // the 6-goal loss is ignored, and "1" beats the later tie "3"
        assert_eq!(biggest_win(&replays, TRACKED).unwrap().replay_id, "1");
        assert!(biggest_win(&replays, "Nobody").is_none());
    }

    #[test]
    fn test_overtime_summary() {
        let replays = vec![
            game("1").score(2, 1).overtime(45).build(),
            game("2").score(1, 2).overtime(130).build(),
            game("3").score(3, 2).overtime(20).build(),
            game("4").score(3, 0).overtime(0).build(),
        ];

        let summary = overtime_summary(&replays, TRACKED);
        assert_eq!(summary.games, 3);
        assert_eq!(summary.fraction, Some(0.75));
        assert_eq!(summary.win_rate, Some(2.0 / 3.0));
        assert_eq!(summary.longest, Some(130));
        assert_eq!(summary.longest_win, Some(45));
        assert_eq!(summary.longest_loss, Some(130));
    }

    #[test]
    fn test_overtime_summary_without_overtime() {
        let replays = vec![game("1").build()];
        let summary = overtime_summary(&replays, TRACKED);
        assert_eq!(summary.games, 0);
        assert_eq!(summary.fraction, Some(0.0));
        assert_eq!(summary.win_rate, None);
        assert_eq!(summary.longest, None);
        assert_eq!(overtime_summary(&Vec::<Replay>::new(), TRACKED).fraction, None);
    }

    #[test]
    fn test_core_averages() {
        let replays = vec![
            game("1")
                .stats(json!({ "core": { "goals": 3, "saves": 1, "shooting_percentage": 60.0 } }))
                .build(),
            game("2")
                .stats(json!({ "core": { "goals": 1, "saves": 2, "shooting_percentage": 20.0 } }))
                .build(),
        ];

        let averages = core_averages(&replays, TRACKED).unwrap();
        assert_eq!(averages.goals, 2.0);
        assert_eq!(averages.saves, 1.5);
        assert_eq!(averages.shooting_percentage, 40.0);
        assert_eq!(averages.shots, 0.0);
    }
}
