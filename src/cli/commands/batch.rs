use bge_core::{Screen, WizardStage};

use crate::cli::commands::{join_args, parse_position, wrong_screen, CommandDefinition};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

const CREATION: &[WizardStage] = &[WizardStage::BatchCreation];
const SELECTION: &[WizardStage] = &[WizardStage::BatchSelection];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "set",
            "Set a batch field (name, description, expected_count, expected_total)",
            "set <field> <value>",
            cmd_set,
        )
        .on(CREATION),
        CommandDefinition::new(
            "next",
            "Check required fields and choose a template",
            "next",
            cmd_next,
        )
        .on(CREATION),
        CommandDefinition::new("open", "Continue the batch at a position", "open <number>", cmd_open)
            .on(SELECTION),
    ]
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((field, value)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value>".into(),
        ));
    };
    let Screen::BatchCreation(creator) = context.navigator.screen_mut() else {
        return Err(wrong_screen("set", context));
    };
    creator.set_field(field, &join_args(value))?;
    output::success(format!("Batch {} updated.", field));
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Screen::BatchCreation(creator) = context.navigator.screen() else {
        return Err(wrong_screen("next", context));
    };
    let request = creator.save()?;
    context.mount(request);
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_position(args.first(), "open <number>")?;
    let Screen::BatchSelection(selector) = context.navigator.screen() else {
        return Err(wrong_screen("open", context));
    };
    let request = selector.continue_batch(index).ok_or_else(|| {
        CommandError::InvalidArguments(format!("Batch {} does not exist.", index + 1))
    })?;
    context.mount(request);
    Ok(())
}
