//! User-facing notification channel (toasts).

use std::fmt;

/// Toast severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
        };
        f.write_str(label)
    }
}

/// Transient notice shown once per completed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub duration_secs: u32,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        duration_secs: u32,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            duration_secs,
        }
    }

    pub fn saved(duration_secs: u32) -> Self {
        Self::new(
            "Success!",
            "The record has been saved successfully.",
            Severity::Success,
            duration_secs,
        )
    }

    pub fn duplicate_name(duration_secs: u32) -> Self {
        Self::new(
            "Warning!",
            "A record with this name already exists, please change it.",
            Severity::Warning,
            duration_secs,
        )
    }
}

/// Receives toasts fired by the screens.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Keeps every toast in memory; used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Vec<Toast>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}
