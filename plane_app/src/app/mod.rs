//! App state and stdin commands

mod command;
mod config;
pub mod defaults;
pub mod output;
mod state;

pub use command::Command;
pub use config::{get_command, Config};
pub use state::{Flow, State};
