use bge_core::{
    CoreError, Notifier, RemoteGateway, SaveOutcome, Screen, TemplateEditor, WizardStage,
};
use bge_domain::FieldAttribute;

use crate::cli::commands::{display_name, entry, join_args, parse_position, CommandDefinition};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

const EDITOR: &[WizardStage] = &[WizardStage::TemplateCreation];
const SAVING: &[WizardStage] = &[WizardStage::TemplateCreation, WizardStage::EnterData];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("name", "Set the template name", "name <text>", cmd_name).on(EDITOR),
        CommandDefinition::new(
            "description",
            "Set the template description",
            "description <text>",
            cmd_description,
        )
        .on(EDITOR),
        CommandDefinition::new("add-row", "Append a blank field row", "add-row", cmd_add_row)
            .on(EDITOR),
        CommandDefinition::new(
            "remove-row",
            "Remove the field row at a position",
            "remove-row <number>",
            cmd_remove_row,
        )
        .on(EDITOR),
        CommandDefinition::new(
            "row",
            "Set a row attribute (name, order, read-only, required, sticky, sticky-value, sticky-visible)",
            "row <number> <attribute> <value>",
            cmd_row,
        )
        .on(EDITOR),
        CommandDefinition::new(
            "validate",
            "Check the rows for missing values",
            "validate",
            cmd_validate,
        )
        .on(SAVING),
        CommandDefinition::new("save", "Save the template or the pending entries", "save", cmd_save)
            .on(SAVING),
    ]
}

fn cmd_name(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = join_args(args);
    with_editor(context, "name", |editor, _, _| {
        editor.set_name(name.trim());
        if !editor.can_advance() {
            output::hint("Template names need at least 3 characters.");
        }
        Ok(())
    })?;
    context.render();
    Ok(())
}

fn cmd_description(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let description = join_args(args);
    with_editor(context, "description", |editor, _, _| {
        editor.set_description(&description);
        Ok(())
    })?;
    context.render();
    Ok(())
}

fn cmd_add_row(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let index = with_editor(context, "add-row", |editor, _, _| Ok(editor.add_row()))?;
    output::success(format!("Row {} added.", index + 1));
    context.render();
    Ok(())
}

fn cmd_remove_row(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_position(args.first(), "remove-row <number>")?;
    let removed = with_editor(context, "remove-row", |editor, _, _| {
        editor
            .remove_row(index)
            .ok_or(CommandError::Core(CoreError::RowOutOfRange(index + 1)))
    })?;
    let label = match display_name(&removed) {
        Some(name) => format!("Row {} ({})", index + 1, name),
        None => format!("Row {}", index + 1),
    };
    output::success(format!("{} removed.", label));
    context.render();
    Ok(())
}

fn cmd_row(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "row <number> <attribute> <value>";
    let index = parse_position(args.first(), usage)?;
    let attribute = args
        .get(1)
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))?;
    let attribute = FieldAttribute::parse(attribute).map_err(CoreError::from)?;
    let value = join_args(args.get(2..).unwrap_or_default());
    with_editor(context, "row", |editor, _, _| {
        Ok(editor.set_row_attribute(index, attribute, &value)?)
    })?;
    context.render();
    Ok(())
}

fn cmd_validate(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.stage() == WizardStage::EnterData {
        return entry::validate(context);
    }
    let report = with_editor(context, "validate", |editor, _, _| {
        Ok(editor.validate_required().err())
    })?;
    match report {
        None => output::success("All rows have a name."),
        Some(report) => {
            for message in report.messages() {
                output::error(message);
            }
        }
    }
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.stage() == WizardStage::EnterData {
        return entry::save(context);
    }
    let outcome = with_editor(context, "save", |editor, gateway, notifier| {
        if !editor.can_advance() {
            return Err(CommandError::InvalidArguments(
                "Template names need at least 3 characters.".into(),
            ));
        }
        Ok(editor.save(gateway, notifier)?)
    })?;
    match outcome {
        SaveOutcome::Saved => output::hint("Use `home` to return to the start screen."),
        SaveOutcome::DuplicateName => output::hint("Change the name with `name <text>` and save again."),
    }
    Ok(())
}

fn with_editor<T>(
    context: &mut ShellContext,
    command: &'static str,
    op: impl FnOnce(&mut TemplateEditor, &dyn RemoteGateway, &mut dyn Notifier) -> Result<T, CommandError>,
) -> Result<T, CommandError> {
    let stage = context.stage();
    let parts = context.navigator.parts();
    match parts.screen {
        Screen::TemplateCreation(editor) => op(editor, parts.gateway, parts.notifier),
        _ => Err(CommandError::Unavailable { command, stage }),
    }
}
