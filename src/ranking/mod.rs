pub mod competition;
pub mod rounds;

pub use competition::competition_ranks;
pub use rounds::{RankSummary, recalculate_round_ranks};
