mod collection;
pub mod mapping;
pub mod models;
mod progress;

pub use collection::TeamScoreBook;
pub use mapping::{map_rolling_event, map_round};
pub use models::*;
pub use progress::ScoreProgress;
