//! Interactive coach session

pub mod repl;

pub use repl::CoachRepl;
