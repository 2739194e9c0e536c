use serde::Serialize;

/// Every group key tied for the largest count, with that count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxGroups<K> {
    pub max_val: usize,
    pub max_keys: Vec<K>,
}

impl<K> Default for MaxGroups<K> {
    fn default() -> Self {
        Self {
            max_val: 0,
            max_keys: Vec::new(),
        }
    }
}

/// Restricts aggregates to the games where the tracked player drove a given car.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CarFilter {
    #[default]
    All,
    Car(String),
}

/// Overtime statistics for a tracked player.
///
/// Every field is `None` when its subset is empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct OvertimeSummary {
    pub games: usize,
    /// Share of all games that went to overtime, 0.0..=1.0.
    pub fraction: Option<f64>,
    /// Win rate over overtime games only, 0.0..=1.0.
    pub win_rate: Option<f64>,
    pub longest: Option<u32>,
    pub longest_win: Option<u32>,
    pub longest_loss: Option<u32>,
}

/// Mean core stats over a set of games.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct CoreAverages {
    pub goals: f64,
    pub shots: f64,
    pub saves: f64,
    pub assists: f64,
    pub score: f64,
    pub shooting_percentage: f64,
}

/// Goal-margin class of a game from the tracked player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MarginBucket {
    /// Lost by this many goals; 5 means 5 or more.
    Loss(u32),
    /// Won by this many goals; 5 means 5 or more.
    Win(u32),
}

impl MarginBucket {
    /// The ten buckets in display order: loss by 5+ down to loss by 1, then
    /// win by 1 up to win by 5+.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=5)
            .rev()
            .map(MarginBucket::Loss)
            .chain((1..=5).map(MarginBucket::Win))
    }
}

/// Game counts per [`MarginBucket`], in [`MarginBucket::all`] order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MarginHistogram {
    pub counts: [usize; 10],
}

impl MarginHistogram {
    pub fn get(&self, bucket: MarginBucket) -> usize {
        self.counts[Self::index(bucket)]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MarginBucket, usize)> + '_ {
        MarginBucket::all().zip(self.counts.iter().copied())
    }

    pub(crate) fn increment(&mut self, bucket: MarginBucket) {
        self.counts[Self::index(bucket)] += 1;
    }

    fn index(bucket: MarginBucket) -> usize {
        match bucket {
            MarginBucket::Loss(n) => 5 - n.clamp(1, 5) as usize,
            MarginBucket::Win(n) => 4 + n.clamp(1, 5) as usize,
        }
    }
}
