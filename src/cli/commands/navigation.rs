use bge_core::{MountRequest, Screen, WizardStage};

use crate::cli::commands::{wrong_screen, CommandDefinition};
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

const INITIAL: &[WizardStage] = &[WizardStage::Initial];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("home", "Return to the start screen", "home", cmd_home),
        CommandDefinition::new("back", "Go to the previous step", "back", cmd_back),
        CommandDefinition::new(
            "continue",
            "Continue an existing batch",
            "continue",
            cmd_continue,
        )
        .on(INITIAL),
        CommandDefinition::new(
            "create-batch",
            "Start a new batch",
            "create-batch",
            cmd_create_batch,
        )
        .on(INITIAL),
        CommandDefinition::new(
            "create-template",
            "Design a new template",
            "create-template",
            cmd_create_template,
        )
        .on(INITIAL),
    ]
}

fn cmd_home(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.mount(MountRequest::Initial);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = match context.navigator.screen() {
        Screen::Initial(_) => {
            return Err(CommandError::InvalidArguments(
                "Already on the start screen.".into(),
            ))
        }
        Screen::BatchSelection(selector) => selector.next_to_initial(),
        Screen::BatchCreation(creator) => creator.next_to_initial(),
        Screen::TemplateSelection(selector) => selector.next_to_batch_creation(),
        Screen::TemplateCreation(editor) => editor.next_to_initial(),
        Screen::EnterData(sheet) => sheet.next_to_template_selection(),
    };
    context.mount(request);
    Ok(())
}

fn cmd_continue(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = initial_action(context, "continue", |screen| screen.next_to_continue_batch())?;
    context.mount(request);
    Ok(())
}

fn cmd_create_batch(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = initial_action(context, "create-batch", |screen| screen.next_to_create_batch())?;
    context.mount(request);
    Ok(())
}

fn cmd_create_template(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = initial_action(context, "create-template", |screen| {
        screen.next_to_create_template()
    })?;
    context.mount(request);
    Ok(())
}

fn initial_action(
    context: &ShellContext,
    command: &'static str,
    action: impl FnOnce(&bge_core::InitialScreen) -> MountRequest,
) -> Result<MountRequest, CommandError> {
    match context.navigator.screen() {
        Screen::Initial(screen) => Ok(action(screen)),
        _ => Err(wrong_screen(command, context)),
    }
}
