//! How often games are played: per session and per calendar day.
//!
//! A session is every replay sharing one calendar date. The two averages
//! differ on purpose: per-session ignores days without games, per-day counts
//! every day from the first to the last played date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::{Itertools, MinMaxResult};

use crate::model::Replay;
use crate::stats::aggregate::{games_per_group, group_by, ratio};

/// Games per played date.
pub fn games_per_date<'a, I>(replays: I) -> BTreeMap<NaiveDate, usize>
where
    I: IntoIterator<Item = &'a Replay>,
{
    games_per_group(&group_by(replays, Replay::played_on))
}

/// Games per date over the full span from first to last played date,
/// inclusive, with idle days reported as 0.
pub fn daily_counts<'a, I>(replays: I) -> Vec<(NaiveDate, usize)>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let per_date = games_per_date(replays);
    let (first, last) = match per_date.keys().minmax() {
        MinMaxResult::NoElements => return Vec::new(),
        MinMaxResult::OneElement(&day) => (day, day),
        MinMaxResult::MinMax(&first, &last) => (first, last),
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| (day, per_date.get(&day).copied().unwrap_or_default()))
        .collect()
}

/// Mean games per session (distinct played date).
pub fn average_per_session<'a, I>(replays: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let per_date = games_per_date(replays);
    ratio(per_date.values().sum::<usize>() as f64, per_date.len())
}

/// Mean games per calendar day across the whole played span.
pub fn average_per_day<'a, I>(replays: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Replay>,
{
    let days = daily_counts(replays);
    ratio(days.iter().map(|&(_, n)| n).sum::<usize>() as f64, days.len())
}
