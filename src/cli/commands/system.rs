use crate::cli::commands::{join_args, CommandDefinition};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::errors::{CommandError, CommandResult};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("screen", "Show the current screen again", "screen", cmd_screen),
        CommandDefinition::new(
            "config",
            "Show or change preferences",
            "config [show | set <key> <value>]",
            cmd_config,
        ),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(command) => {
                output::section(command.name);
                output::line(format!("  {}", command.description));
                output::line(format!("  Usage: {}", command.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    let stage = context.stage();
    output::section(format!("Commands ({})", stage.title()));
    for command in context.registry.iter().filter(|c| c.available_on(stage)) {
        output::line(format!("  {:<16} {}", command.name, command.description));
    }
    Ok(())
}

fn cmd_screen(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.render();
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("show") => {
            output::section("Configuration");
            output::line(format!(
                "  {:<22} {}",
                "file",
                context.config_manager.config_path().display()
            ));
            for (key, value) in context.config.entries() {
                output::line(format!("  {:<22} {}", key, value));
            }
            Ok(())
        }
        Some("set") => {
            let key = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: config set <key> <value>".into())
            })?;
            let value = join_args(args.get(2..).unwrap_or_default());
            context.config.set(key, &value)?;
            context.persist_config()?;
            output::success("Configuration updated.");
            if key.trim().eq_ignore_ascii_case("data_dir") {
                output::info("The new data directory is used from the next start.");
            }
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Batch Entry {}", meta.version));
    output::line(format!("  Build hash : {} ({})", meta.git_hash, meta.git_status));
    output::line(format!("  Built at   : {}", meta.timestamp));
    output::line(format!("  Target     : {}", meta.target));
    output::line(format!("  Profile    : {}", meta.profile));
    output::line(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
