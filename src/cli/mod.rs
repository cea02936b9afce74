//! Command line: argument parsing, telemetry setup and the resulting action.

pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod telemetry;

mod start;
pub use self::start::start;
