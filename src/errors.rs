use std::io;

use thiserror::Error;

use bge_config::ConfigError;
use bge_core::{CoreError, GatewayError, WizardStage};

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Storage unavailable: {0}")]
    Storage(#[from] GatewayError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Failures of a single command; reported and the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("`{command}` is not available on the {stage} screen")]
    Unavailable {
        command: &'static str,
        stage: WizardStage,
    },
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<GatewayError> for CommandError {
    fn from(err: GatewayError) -> Self {
        CommandError::Core(CoreError::Gateway(err))
    }
}

pub type CommandResult = Result<(), CommandError>;
