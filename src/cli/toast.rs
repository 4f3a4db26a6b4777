use bge_core::{Notifier, Severity, Toast};

use crate::cli::output;

/// Prints toasts as labelled output lines.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, toast: Toast) {
        let text = format!("{} {}", toast.title, toast.message);
        match toast.severity {
            Severity::Success => output::success(text),
            Severity::Warning => output::warning(text),
        }
    }
}
