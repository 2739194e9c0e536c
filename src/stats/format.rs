//! Human-readable renderings of aggregate results.
//!
//! Every function is pure. Absent aggregates render as [`NO_DATA`].

use chrono::NaiveDate;
use itertools::Itertools;

use crate::model::{MarginBucket, MaxGroups, Replay};
use crate::stats::resolve::player_side;

pub const NO_DATA: &str = "no data";

/// Supersonic threshold in unreal units per second.
pub const SUPERSONIC_SPEED: f64 = 2300.0;

/// `125` → `"2m 5s"`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Joins names as `"A"`, `"A and B"` or `"A, B and C"`.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_owned(),
        [init @ .., last] => format!(
            "{} and {}",
            init.iter().map(|s| s.as_ref()).join(", "),
            last.as_ref()
        ),
    }
}

/// `2024-03-04` → `"March 4, 2024"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Two decimals, or [`NO_DATA`].
pub fn format_average(value: Option<f64>) -> String {
    value.map_or_else(|| NO_DATA.to_owned(), |v| format!("{v:.2}"))
}

/// A value already on the 0–100 scale.
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| NO_DATA.to_owned(), |v| format!("{v:.2}%"))
}

/// A 0–1 fraction shown as a percentage.
pub fn format_rate(value: Option<f64>) -> String {
    format_percent(value.map(|v| v * 100.0))
}

/// Average speed as a share of supersonic plus the raw speed, e.g.
/// `"63.04% (1450uu/s)"`.
pub fn format_avg_speed(value: Option<f64>) -> String {
    match value {
        Some(speed) => format!(
            "{:.2}% ({}uu/s)",
            speed / SUPERSONIC_SPEED * 100.0,
            speed.trunc()
        ),
        None => NO_DATA.to_owned(),
    }
}

/// Longest overtime, or [`NO_DATA`] when no game went to overtime.
pub fn format_longest(seconds: Option<u32>) -> String {
    seconds.map_or_else(|| NO_DATA.to_owned(), format_duration)
}

/// Renders tied leaders with their shared count, e.g.
/// `"Mannfield and Utopia Coliseum (3 wins)"`. A zero maximum renders as
/// `"none"`.
pub fn format_max_groups<K>(
    groups: &MaxGroups<K>,
    label: impl Fn(&K) -> String,
    unit: &str,
) -> String {
    if groups.max_val == 0 || groups.max_keys.is_empty() {
        return "none".to_owned();
    }
    let names = groups.max_keys.iter().map(label).collect_vec();
    format!(
        "{} ({} {unit}{})",
        format_list(&names),
        groups.max_val,
        if groups.max_val == 1 { "" } else { "s" }
    )
}

/// Narrative for the biggest win, told from `name`'s side, e.g.
/// `"6-1 on Mannfield, March 4, 2024"`.
pub fn format_biggest_win(replay: Option<&Replay>, name: &str) -> String {
    let Some((replay, side)) = replay.and_then(|r| player_side(r, name).map(|side| (r, side)))
    else {
        return "no wins yet".to_owned();
    };
    format!(
        "{}-{} on {}, {}",
        replay.score.goals(side),
        replay.score.goals(side.opponent()),
        replay.map_name,
        format_date(replay.played_on())
    )
}

pub fn format_margin_bucket(bucket: MarginBucket) -> String {
    let (outcome, n) = match bucket {
        MarginBucket::Loss(n) => ("loss", n),
        MarginBucket::Win(n) => ("win", n),
    };
    if n >= 5 {
        format!("{outcome} by 5+")
    } else {
        format!("{outcome} by {n}")
    }
}
