use bge_core::{
    RemoteGateway, Screen, SelectorOutcome, TemplateAction, TemplateSelector, WizardStage,
};
use bge_domain::Template;

use crate::cli::commands::{display_name, parse_position, CommandDefinition};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};

const SELECTION: &[WizardStage] = &[WizardStage::TemplateSelection];
const UNNAMED: &str = "(unnamed)";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "select",
            "Highlight the template at a position",
            "select <number>",
            cmd_select,
        )
        .on(SELECTION),
        CommandDefinition::new(
            "edit",
            "Edit the highlighted template",
            "edit [number]",
            cmd_edit,
        )
        .on(SELECTION),
        CommandDefinition::new(
            "clone",
            "Copy the highlighted template under a new name",
            "clone [number]",
            cmd_clone,
        )
        .on(SELECTION),
        CommandDefinition::new(
            "delete",
            "Delete the highlighted template",
            "delete [number]",
            cmd_delete,
        )
        .on(SELECTION),
        CommandDefinition::new(
            "use",
            "Save the batch with a template and enter data",
            "use <number>",
            cmd_use,
        )
        .on(SELECTION),
        CommandDefinition::new(
            "new-template",
            "Design a new template",
            "new-template",
            cmd_new_template,
        )
        .on(SELECTION),
    ]
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_position(args.first(), "select <number>")?;
    let name = with_selector(context, "select", |selector, _| highlight(selector, index))?;
    output::info(format!("Selected template `{}`.", name));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run_action(context, "edit", TemplateAction::Edit, args)
}

fn cmd_clone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run_action(context, "clone", TemplateAction::Clone, args)
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    highlight_from_args(context, "delete", args)?;
    let current = with_selector(context, "delete", |selector, _| {
        Ok(selector.current().map(template_name))
    })?;
    let Some(name) = current else {
        output::info("Select a template first with `select <number>`.");
        return Ok(());
    };
    if !context.confirm(&format!("Delete template `{}`?", name))? {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    run_action(context, "delete", TemplateAction::Delete, &[])
}

fn cmd_use(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_position(args.first(), "use <number>")?;
    let request = with_selector(context, "use", |selector, gateway| {
        Ok(selector.next_to_enter_data(index, gateway)?)
    })?;
    match request {
        Some(request) => {
            output::success("Batch saved.");
            context.mount(request);
        }
        None => output::warning("No batch in progress. Use `back` to create one first."),
    }
    Ok(())
}

fn cmd_new_template(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = with_selector(context, "new-template", |selector, _| {
        Ok(selector.next_to_template_creation())
    })?;
    context.mount(request);
    Ok(())
}

fn run_action(
    context: &mut ShellContext,
    command: &'static str,
    action: TemplateAction,
    args: &[&str],
) -> CommandResult {
    highlight_from_args(context, command, args)?;
    let outcome = with_selector(context, command, |selector, gateway| {
        Ok(selector.select_template(action, gateway)?)
    })?;
    match outcome {
        SelectorOutcome::Idle => output::info("Select a template first with `select <number>`."),
        SelectorOutcome::Navigate(request) => context.mount(request),
        SelectorOutcome::Deleted(template) => {
            output::success(format!("Template `{}` deleted.", template_name(&template)));
            context.render();
        }
    }
    Ok(())
}

fn highlight_from_args(
    context: &mut ShellContext,
    command: &'static str,
    args: &[&str],
) -> CommandResult {
    if args.is_empty() {
        return Ok(());
    }
    let index = parse_position(args.first(), &format!("{command} [number]"))?;
    with_selector(context, command, |selector, _| highlight(selector, index).map(|_| ()))
}

fn highlight(selector: &mut TemplateSelector, index: usize) -> Result<String, CommandError> {
    let missing = || CommandError::InvalidArguments(format!("Template {} does not exist.", index + 1));
    if index >= selector.templates().len() {
        return Err(missing());
    }
    selector
        .highlight(index)
        .map(template_name)
        .ok_or_else(missing)
}

fn template_name(template: &Template) -> String {
    display_name(template).unwrap_or(UNNAMED).to_string()
}

fn with_selector<T>(
    context: &mut ShellContext,
    command: &'static str,
    op: impl FnOnce(&mut TemplateSelector, &dyn RemoteGateway) -> Result<T, CommandError>,
) -> Result<T, CommandError> {
    let stage = context.stage();
    let parts = context.navigator.parts();
    match parts.screen {
        Screen::TemplateSelection(selector) => op(selector, parts.gateway),
        _ => Err(CommandError::Unavailable { command, stage }),
    }
}
