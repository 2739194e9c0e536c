//! Per-player statistics over batches of Rocket League replays.
//!
//! A batch is fetched once with [`ReplayClient`], then every statistic is a
//! pure function of the batch and a tracked player name. [`PlayerReport`]
//! bundles the two; the free functions under [`stats`] can be used directly.

pub use client::ReplayClient;
pub use error::{ReplayStatsError, Result};
pub use model::*;
pub use report::PlayerReport;

mod client;
mod error;
pub mod ingest;
mod model;
mod report;
pub mod stats;
