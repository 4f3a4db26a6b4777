use std::collections::HashMap;

use bge_core::WizardStage;
use bge_domain::NamedEntity;

pub mod batch;
pub mod editor;
pub mod entry;
pub mod navigation;
pub mod system;
pub mod template;

use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(navigation::definitions());
    commands.extend(batch::definitions());
    commands.extend(template::definitions());
    commands.extend(editor::definitions());
    commands.extend(entry::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    /// Screens the command works on; empty means every screen.
    pub stages: &'static [WizardStage],
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            stages: &[],
            handler,
        }
    }

    pub fn on(mut self, stages: &'static [WizardStage]) -> Self {
        self.stages = stages;
        self
    }

    pub fn available_on(&self, stage: WizardStage) -> bool {
        self.stages.is_empty() || self.stages.contains(&stage)
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Parses a 1-based list position into a 0-based index.
pub(crate) fn parse_position(raw: Option<&&str>, usage: &str) -> Result<usize, CommandError> {
    let raw = raw.ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))?;
    match raw.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a valid position (expected 1 or more)",
            raw
        ))),
    }
}

/// Joins the remaining arguments into one value.
pub(crate) fn join_args(args: &[&str]) -> String {
    args.join(" ")
}

/// Trimmed record name, `None` while it is still blank.
pub(crate) fn display_name<T: NamedEntity>(record: &T) -> Option<&str> {
    let name = record.name().trim();
    (!name.is_empty()).then_some(name)
}

/// Error for a handler reached on a screen it does not serve.
pub(crate) fn wrong_screen(command: &'static str, context: &ShellContext) -> CommandError {
    CommandError::Unavailable {
        command,
        stage: context.stage(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_have_no_display_name() {
        assert_eq!(display_name(&bge_domain::FieldRow::blank()), None);
        assert_eq!(
            display_name(&bge_domain::FieldRow::named(" Amount ")),
            Some("Amount")
        );
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse_position(Some(&"2"), "open <n>").expect("index"), 1);
        assert!(parse_position(Some(&"0"), "open <n>").is_err());
        assert!(parse_position(Some(&"two"), "open <n>").is_err());
        assert!(parse_position(None, "open <n>").is_err());
    }

    #[test]
    fn command_names_are_unique() {
        let definitions = all_definitions();
        let registry = CommandRegistry::new(definitions.clone());
        assert_eq!(registry.iter().count(), definitions.len());
    }
}
