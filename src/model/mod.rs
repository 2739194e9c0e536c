mod player_id;
mod replay;
mod summary;

pub use player_id::*;
pub use replay::*;
pub use summary::*;
