pub mod commands;
pub mod output;
pub mod render;
mod shell;
pub mod shell_context;
pub mod toast;

pub use shell::run_cli;
pub use shell_context::{CliMode, LoopControl, ShellContext};

/// Environment variable switching the shell to line-by-line stdin.
pub const SCRIPT_ENV: &str = "BATCH_ENTRY_CLI_SCRIPT";
