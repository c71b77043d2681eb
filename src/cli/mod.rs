pub mod commands;
pub mod context;
pub mod io;
pub mod output;
mod shell;

pub use context::{CliMode, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
