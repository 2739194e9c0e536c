use chrono::NaiveDate;
use tracing::debug;

use crate::model::{CarFilter, CoreAverages, MarginHistogram, MaxGroups, OvertimeSummary, Replay};
use crate::stats::{self, aggregate, cadence, metrics, outcome};

/// Statistics for one tracked player over a replay batch.
///
/// `PlayerReport` borrows the batch and exposes every aggregate as a method.
/// An optional [`CarFilter`] restricts the games the aggregates see; the
/// list of cars to choose from always comes from the whole batch.
///
/// # Examples
///
/// ```no_run
/// # fn example(replays: Vec<replay_stats::Replay>) {
/// use replay_stats::{CarFilter, PlayerReport};
///
/// let report = PlayerReport::new(&replays, "BijouBug");
/// for car in report.used_cars() {
///     let per_car = report.with_car(CarFilter::Car(car.clone()));
///     println!("{car}: {:?} goals per game", per_car.core_averages().map(|c| c.goals));
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PlayerReport<'a> {
    all: Vec<&'a Replay>,
    games: Vec<&'a Replay>,
    player: &'a str,
    car: CarFilter,
}

impl<'a> PlayerReport<'a> {
    /// Report over every replay in `replays`.
    pub fn new(replays: &'a [Replay], player: &'a str) -> Self {
        let all: Vec<&Replay> = replays.iter().collect();
        Self {
            games: all.clone(),
            all,
            player,
            car: CarFilter::All,
        }
    }

    /// A copy of this report restricted to games driven in `car`.
    pub fn with_car(&self, car: CarFilter) -> Self {
        let games = aggregate::with_car(self.all.iter().copied(), self.player, &car);
        debug!(player = self.player, ?car, games = games.len(), "applied car filter");
        Self {
            all: self.all.clone(),
            games,
            player: self.player,
            car,
        }
    }

    pub fn player(&self) -> &str {
        self.player
    }

    pub fn car(&self) -> &CarFilter {
        &self.car
    }

    /// Games the aggregates run over, in input order.
    pub fn games(&self) -> &[&'a Replay] {
        &self.games
    }

    /// Cars the player drove anywhere in the batch.
    pub fn used_cars(&self) -> Vec<String> {
        aggregate::used_cars(self.all.iter().copied(), self.player)
    }

    fn iter(&self) -> impl Iterator<Item = &'a Replay> + '_ {
        self.games.iter().copied()
    }

    fn average_of<T: Into<f64>>(&self, metric: fn(&Replay, &str) -> T) -> Option<f64> {
        aggregate::average(self.iter(), |r| metric(r, self.player))
    }

    pub fn wins(&self) -> Vec<&'a Replay> {
        aggregate::wins(self.iter(), self.player)
    }

    pub fn losses(&self) -> Vec<&'a Replay> {
        aggregate::losses(self.iter(), self.player)
    }

    /// Share of games won, 0.0..=1.0.
    pub fn win_rate(&self) -> Option<f64> {
        aggregate::ratio(self.wins().len() as f64, self.games.len())
    }

    pub fn average_supersonic(&self) -> Option<f64> {
        self.average_of(metrics::percent_supersonic_speed)
    }

    pub fn average_speed(&self) -> Option<f64> {
        self.average_of(metrics::avg_speed)
    }

    pub fn average_bpm(&self) -> Option<f64> {
        self.average_of(metrics::bpm)
    }

    pub fn average_bcpm(&self) -> Option<f64> {
        self.average_of(metrics::bcpm)
    }

    pub fn average_distance(&self) -> Option<f64> {
        self.average_of(metrics::total_distance)
    }

    pub fn total_distance(&self) -> f64 {
        aggregate::sum(self.iter(), |r| metrics::total_distance(r, self.player))
    }

    pub fn average_demos_inflicted(&self) -> Option<f64> {
        self.average_of(metrics::demos_inflicted)
    }

    pub fn average_demos_taken(&self) -> Option<f64> {
        self.average_of(metrics::demos_taken)
    }

    /// Average demolitions inflicted, counting won games only.
    pub fn average_demos_in_wins(&self) -> Option<f64> {
        aggregate::average(self.wins(), |r| metrics::demos_inflicted(r, self.player))
    }

    pub fn most_demos_in_game(&self) -> Option<u32> {
        aggregate::max_metric(self.iter(), |r| metrics::demos_inflicted(r, self.player))
    }

    pub fn core_averages(&self) -> Option<CoreAverages> {
        aggregate::core_averages(self.iter(), self.player)
    }

    pub fn maps_with_most_wins(&self) -> MaxGroups<String> {
        aggregate::maps_with_most_wins(self.iter(), self.player)
    }

    pub fn maps_with_most_games(&self) -> MaxGroups<String> {
        aggregate::maps_with_most_games(self.iter())
    }

    pub fn dates_with_most_wins(&self) -> MaxGroups<NaiveDate> {
        aggregate::dates_with_most_wins(self.iter(), self.player)
    }

    pub fn dates_with_most_games(&self) -> MaxGroups<NaiveDate> {
        aggregate::dates_with_most_games(self.iter())
    }

    pub fn biggest_win(&self) -> Option<&'a Replay> {
        aggregate::biggest_win(self.iter(), self.player)
    }

    pub fn overtime(&self) -> OvertimeSummary {
        aggregate::overtime_summary(self.iter(), self.player)
    }

    pub fn margin_histogram(&self) -> MarginHistogram {
        outcome::margin_histogram(self.iter(), self.player)
    }

    pub fn average_per_session(&self) -> Option<f64> {
        cadence::average_per_session(self.iter())
    }

    pub fn average_per_day(&self) -> Option<f64> {
        cadence::average_per_day(self.iter())
    }

    /// Plain-text summary, one statistic per line.
    pub fn summary_lines(&self) -> Vec<String> {
        use stats::format::*;

        let overtime = self.overtime();
        vec![
            format!("games: {}", self.games.len()),
            format!("win rate: {}", format_rate(self.win_rate())),
            format!("average % supersonic: {}", format_percent(self.average_supersonic())),
            format!("average overall speed: {}", format_avg_speed(self.average_speed())),
            format!("average boost used per minute: {}", format_average(self.average_bpm())),
            format!(
                "average boost collected per minute: {}",
                format_average(self.average_bcpm())
            ),
            format!("average distance per game: {}", format_average(self.average_distance())),
            format!(
                "average demos inflicted: {}",
                format_average(self.average_demos_inflicted())
            ),
            format!("average demos taken: {}", format_average(self.average_demos_taken())),
            format!(
                "most demos in one game: {}",
                self.most_demos_in_game()
                    .map_or_else(|| NO_DATA.to_owned(), |n| n.to_string())
            ),
            format!(
                "map(s) with most wins: {}",
                format_max_groups(&self.maps_with_most_wins(), String::clone, "win")
            ),
            format!(
                "map(s) played most: {}",
                format_max_groups(&self.maps_with_most_games(), String::clone, "game")
            ),
            format!(
                "best day(s): {}",
                format_max_groups(&self.dates_with_most_wins(), |d| format_date(*d), "win")
            ),
            format!(
                "busiest day(s): {}",
                format_max_groups(&self.dates_with_most_games(), |d| format_date(*d), "game")
            ),
            format!("biggest win: {}", format_biggest_win(self.biggest_win(), self.player)),
            format!("games to overtime: {}", format_rate(overtime.fraction)),
            format!("overtime win rate: {}", format_rate(overtime.win_rate)),
            format!("longest overtime: {}", format_longest(overtime.longest)),
            format!("average games per session: {}", format_average(self.average_per_session())),
            format!("average games per day: {}", format_average(self.average_per_day())),
        ]
    }
}
