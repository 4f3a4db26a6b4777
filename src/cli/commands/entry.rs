use bge_core::{EntrySheet, Notifier, RemoteGateway, Screen, WizardStage};

use crate::cli::commands::{join_args, parse_position, CommandDefinition};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

const ENTRY: &[WizardStage] = &[WizardStage::EnterData];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add-entry",
            "Start a new data row",
            "add-entry",
            cmd_add_entry,
        )
        .on(ENTRY),
        CommandDefinition::new(
            "value",
            "Set a field value on a data row",
            "value <number> <field> <value>",
            cmd_value,
        )
        .on(ENTRY),
        CommandDefinition::new(
            "remove-entry",
            "Discard a pending data row",
            "remove-entry <number>",
            cmd_remove_entry,
        )
        .on(ENTRY),
    ]
}

fn cmd_add_entry(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let index = with_sheet(context, "add-entry", |sheet, _, _| {
        sheet.add_entry().ok_or_else(|| {
            CommandError::InvalidArguments("No batch selected for data entry.".into())
        })
    })?;
    output::success(format!("Entry {} added.", index + 1));
    context.render();
    Ok(())
}

fn cmd_value(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "value <number> <field> <value>";
    let index = parse_position(args.first(), usage)?;
    let field = args
        .get(1)
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))?;
    let value = join_args(args.get(2..).unwrap_or_default());
    with_sheet(context, "value", |sheet, _, _| {
        Ok(sheet.set_value(index, field, &value)?)
    })?;
    context.render();
    Ok(())
}

fn cmd_remove_entry(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_position(args.first(), "remove-entry <number>")?;
    with_sheet(context, "remove-entry", |sheet, _, _| {
        sheet.remove_entry(index).map(|_| ()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("Entry {} does not exist.", index + 1))
        })
    })?;
    output::success(format!("Entry {} removed.", index + 1));
    context.render();
    Ok(())
}

pub(crate) fn validate(context: &mut ShellContext) -> CommandResult {
    with_sheet(context, "validate", |sheet, _, _| Ok(sheet.validate()?))?;
    output::success("All entries have their required values.");
    Ok(())
}

pub(crate) fn save(context: &mut ShellContext) -> CommandResult {
    let stored = with_sheet(context, "save", |sheet, gateway, notifier| {
        Ok(sheet.save(gateway, notifier)?)
    })?;
    if stored == 0 {
        output::info("No pending entries to save.");
    } else {
        output::info(format!("{} entries stored.", stored));
    }
    Ok(())
}

fn with_sheet<T>(
    context: &mut ShellContext,
    command: &'static str,
    op: impl FnOnce(&mut EntrySheet, &dyn RemoteGateway, &mut dyn Notifier) -> Result<T, CommandError>,
) -> Result<T, CommandError> {
    let stage = context.stage();
    let parts = context.navigator.parts();
    match parts.screen {
        Screen::EnterData(sheet) => op(sheet, parts.gateway, parts.notifier),
        _ => Err(CommandError::Unavailable { command, stage }),
    }
}
