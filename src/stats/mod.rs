//! The statistics engine: pure functions over a borrowed replay sequence.
//!
//! Nothing here performs I/O or fails. A player that cannot be found in a
//! replay contributes zero (or `None`, or `false`) instead of an error, so
//! group denominators stay the same whether or not every record resolves.

pub mod aggregate;
pub mod cadence;
pub mod format;
pub mod metrics;
pub mod outcome;
pub mod resolve;

pub use aggregate::*;
pub use cadence::*;
pub use metrics::*;
pub use outcome::*;
pub use resolve::*;
