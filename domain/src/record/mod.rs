//! Finished-game result records

pub mod game_record;

pub use game_record::GameResultRecord;
