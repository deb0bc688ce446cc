//! Pipeline execution

pub mod command;
pub mod executor;

pub use command::CommandWork;
pub use executor::Executor;
