pub mod rank;
pub mod sync;
