use std::io::{self, StdinLock};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::output;
use crate::cli::shell_context::{CliMode, LoopControl, ShellContext};
use crate::cli::SCRIPT_ENV;
use crate::errors::{CliError, CommandError};

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let mut source = match mode {
        CliMode::Interactive => LineSource::prompt()?,
        CliMode::Script => LineSource::Script(io::stdin().lines()),
    };
    context.render();

    while context.running {
        let Some(line) = source.next_command(&context)? else {
            break;
        };
        if let Err(err) = execute(&mut context, &line) {
            context.report_error(err);
        }
    }
    Ok(())
}

/// Where command lines come from: the line editor or piped stdin.
enum LineSource {
    Prompt(Editor<ScreenCompleter, DefaultHistory>),
    Script(io::Lines<StdinLock<'static>>),
}

impl LineSource {
    fn prompt() -> Result<Self, CliError> {
        let mut editor = Editor::<ScreenCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ScreenCompleter::default()));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(LineSource::Prompt(editor))
    }

    /// Next non-blank command line, or `None` once input ends or the user
    /// leaves. Script lines starting with `#` are comments.
    fn next_command(&mut self, context: &ShellContext) -> Result<Option<String>, CliError> {
        loop {
            let line = match self {
                LineSource::Script(lines) => match lines.next() {
                    Some(line) => line?,
                    None => return Ok(None),
                },
                LineSource::Prompt(editor) => {
                    if let Some(completer) = editor.helper_mut() {
                        completer.words = context.available_commands();
                    }
                    match editor.readline(&context.prompt()) {
                        Ok(line) => {
                            editor.add_history_entry(line.trim()).ok();
                            line
                        }
                        Err(ReadlineError::Interrupted) => {
                            if context.confirm_exit()? {
                                return Ok(None);
                            }
                            continue;
                        }
                        Err(ReadlineError::Eof) => {
                            output::info("Exiting shell.");
                            return Ok(None);
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            };

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Ok(Some(line.to_string()));
        }
    }
}

/// Runs one command line against the mounted screen.
fn execute(context: &mut ShellContext, line: &str) -> Result<(), CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not read `{line}`: {err}"));
            return Ok(());
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(());
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    if context.dispatch(&raw.to_lowercase(), raw, &args)? == LoopControl::Exit {
        context.running = false;
    }
    Ok(())
}

/// Completes the command word from the commands the mounted screen accepts.
#[derive(Default)]
struct ScreenCompleter {
    words: Vec<&'static str>,
}

impl ScreenCompleter {
    /// Start of the word being completed and the matching commands. Arguments
    /// never complete.
    fn candidates(&self, typed: &str) -> (usize, Vec<&'static str>) {
        let start = typed.len() - typed.trim_start().len();
        let word = &typed[start..];
        if word.contains(char::is_whitespace) {
            return (typed.len(), Vec::new());
        }
        let word = word.to_ascii_lowercase();
        let matches = self
            .words
            .iter()
            .copied()
            .filter(|name| name.starts_with(&word))
            .collect();
        (start, matches)
    }
}

impl Completer for ScreenCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ScreenCompleter {
    type Hint = String;
}

impl Highlighter for ScreenCompleter {}

impl Validator for ScreenCompleter {}

impl Helper for ScreenCompleter {}
