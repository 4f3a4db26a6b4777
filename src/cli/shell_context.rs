use std::sync::Arc;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use tracing::info;

use bge_config::{resolve_home, Config, ConfigManager};
use bge_core::{MountRequest, RemoteGateway, WizardNavigator, WizardStage};
use bge_storage_json::JsonGateway;

use crate::cli::commands::{all_definitions, CommandDefinition, CommandRegistry};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::render;
use crate::cli::toast::ConsoleNotifier;
use crate::errors::{CliError, CommandError};
use crate::settings::wizard_settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub navigator: WizardNavigator,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(resolve_home())?;
        let config = config_manager.load()?;
        apply_output_preferences(&config, mode);

        let data_dir = config_manager.data_dir(&config);
        let gateway: Arc<dyn RemoteGateway> = Arc::new(JsonGateway::new(data_dir.clone())?);
        info!(data_dir = %data_dir.display(), "opened catalog");

        let navigator = WizardNavigator::new(
            gateway,
            Box::new(ConsoleNotifier),
            wizard_settings(&config),
        );

        Ok(Self {
            mode,
            registry: CommandRegistry::new(all_definitions()),
            navigator,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("batch-entry ({})> ", self.navigator.stage().title().to_lowercase())
    }

    /// Command words usable on the mounted screen, sorted for completion.
    pub fn available_commands(&self) -> Vec<&'static str> {
        let stage = self.stage();
        let mut names: Vec<&'static str> = self
            .registry
            .iter()
            .filter(|definition| definition.available_on(stage))
            .map(|definition| definition.name)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub fn stage(&self) -> WizardStage {
        self.navigator.stage()
    }

    /// Mounts the requested screen and renders it.
    pub fn mount(&mut self, request: MountRequest) {
        self.navigator.mount(request);
        if self.mode == CliMode::Interactive {
            render::clear_screen();
        }
        render::screen(&self.navigator);
    }

    pub fn render(&self) {
        render::screen(&self.navigator);
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command).cloned() else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        if !definition.available_on(self.stage()) {
            return Err(CommandError::Unavailable {
                command: definition.name,
                stage: self.stage(),
            });
        }
        match (definition.handler)(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    /// Asks before a destructive action. Script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Unavailable { .. } => {
                output::error(err.to_string());
                output::hint("Use `help` to list the commands for this screen.");
            }
            other => {
                for line in other.to_string().lines() {
                    output::error(line);
                }
            }
        }
    }

    /// Writes the configuration and refreshes what depends on it.
    pub(crate) fn persist_config(&mut self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        apply_output_preferences(&self.config, self.mode);
        self.navigator.set_settings(wizard_settings(&self.config));
        Ok(())
    }
}

fn apply_output_preferences(config: &Config, mode: CliMode) {
    output::set_preferences(OutputPreferences {
        plain_output: config.plain_output,
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
    });
}
