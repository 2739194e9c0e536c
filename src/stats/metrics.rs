//! Per-replay accessors for the tracked player's stat sections.
//!
//! Numeric extractors return 0 when the player cannot be resolved, so sums
//! and averages over a batch stay defined. Such replays are silently
//! under-counted rather than dropped.

use crate::model::{CoreStats, PlayerStats, Replay};
use crate::stats::resolve::resolve_player;

fn read<T: Default>(replay: &Replay, name: &str, field: impl Fn(&PlayerStats) -> T) -> T {
    resolve_player(replay, name)
        .map(|player| field(&player.stats))
        .unwrap_or_default()
}

pub fn percent_supersonic_speed(replay: &Replay, name: &str) -> f64 {
    read(replay, name, |s| s.movement.percent_supersonic_speed)
}

/// Average speed in unreal units per second.
pub fn avg_speed(replay: &Replay, name: &str) -> f64 {
    read(replay, name, |s| s.movement.avg_speed)
}

pub fn total_distance(replay: &Replay, name: &str) -> f64 {
    read(replay, name, |s| s.movement.total_distance)
}

/// Boost used per minute.
pub fn bpm(replay: &Replay, name: &str) -> f64 {
    read(replay, name, |s| s.boost.bpm)
}

/// Boost collected per minute.
pub fn bcpm(replay: &Replay, name: &str) -> f64 {
    read(replay, name, |s| s.boost.bcpm)
}

pub fn demos_inflicted(replay: &Replay, name: &str) -> u32 {
    read(replay, name, |s| s.demo.inflicted)
}

pub fn demos_taken(replay: &Replay, name: &str) -> u32 {
    read(replay, name, |s| s.demo.taken)
}

/// Core stats, all zero when the player is missing.
pub fn core_stats(replay: &Replay, name: &str) -> CoreStats {
    read(replay, name, |s| s.core)
}

/// The car the player drove, if recorded.
pub fn used_car<'a>(replay: &'a Replay, name: &str) -> Option<&'a str> {
    resolve_player(replay, name)?.car_name.as_deref()
}

pub fn with_used_car(replay: &Replay, name: &str, car: &str) -> bool {
    used_car(replay, name) == Some(car)
}
