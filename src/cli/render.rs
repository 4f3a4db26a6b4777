//! Text rendering of the mounted wizard screen.

use std::io::{self, IsTerminal};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use bge_core::{
    BatchCreator, BatchSelector, EntrySheet, ProgressIndicator, Screen, TemplateEditor,
    TemplateSelector, WizardNavigator,
};
use bge_domain::{Batch, Displayable};

use crate::cli::output;

/// Clears the terminal before a freshly mounted screen. No-op when stdout is
/// not a terminal.
pub fn clear_screen() {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        let _ = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0));
    }
}

pub fn screen(navigator: &WizardNavigator) {
    output::section(navigator.stage().title());
    if let Some(progress) = navigator.progress() {
        output::line(progress_bar(&progress));
    }
    match navigator.screen() {
        Screen::Initial(_) => initial(),
        Screen::BatchSelection(selector) => batch_selection(selector),
        Screen::BatchCreation(creator) => batch_creation(creator),
        Screen::TemplateSelection(selector) => template_selection(selector),
        Screen::TemplateCreation(editor) => template_editor(editor),
        Screen::EnterData(sheet) => entry_sheet(sheet),
    }
}

/// One-line progress bar; the current step is bracketed.
pub fn progress_bar(progress: &ProgressIndicator) -> String {
    progress
        .steps()
        .into_iter()
        .enumerate()
        .map(|(index, (label, current))| {
            if current {
                format!("[{}. {}]", index + 1, label)
            } else {
                format!(" {}. {} ", index + 1, label)
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

fn initial() {
    output::line("  continue         Continue an existing batch");
    output::line("  create-batch     Start a new batch");
    output::line("  create-template  Design a new template");
}

fn batch_selection(selector: &BatchSelector) {
    if selector.batches().is_empty() {
        output::info("No batches saved yet. Use `back` then `create-batch`.");
        return;
    }
    for (index, batch) in selector.batches().iter().enumerate() {
        output::line(format!("  {}. {}", index + 1, batch_summary(batch)));
    }
    output::hint("Use `open <number>` to continue a batch.");
}

fn batch_creation(creator: &BatchCreator) {
    let draft = creator.draft();
    for key in Batch::FIELD_KEYS {
        let value = draft.field_value(key).unwrap_or_else(|| "-".into());
        let marker = if creator.required_fields().iter().any(|field| field.key == key) {
            "*"
        } else {
            " "
        };
        output::line(format!("  {marker}{key:<16} {value}"));
    }
    output::hint("Use `set <field> <value>` then `next`.");
}

fn template_selection(selector: &TemplateSelector) {
    if let Some(batch) = selector.associated_batch() {
        output::line(format!("  Batch: {}", batch.display_label()));
    }
    if selector.templates().is_empty() {
        output::info("No templates yet. Use `new-template` to create one.");
        return;
    }
    let current = selector.current().and_then(|template| template.id);
    for (index, template) in selector.templates().iter().enumerate() {
        let marker = if template.id.is_some() && template.id == current {
            ">"
        } else {
            " "
        };
        let description = template.description.as_deref().unwrap_or("");
        output::line(format!(
            " {marker}{}. {} {}",
            index + 1,
            template.display_label(),
            description
        ));
    }
}

fn template_editor(editor: &TemplateEditor) {
    let template = editor.template();
    output::line(format!("  Mode: {}", editor.mode().label()));
    output::line(format!(
        "  Name: {}",
        if template.name.is_empty() {
            "-"
        } else {
            template.name.as_str()
        }
    ));
    if let Some(description) = &template.description {
        output::line(format!("  Description: {description}"));
    }
    output::line(format!(
        "  {:>3}  {:<20} {:>5}  {:<14} {}",
        "#", "Field", "Order", "Flags", "Sticky value"
    ));
    for (index, row) in editor.rows().iter().enumerate() {
        let name = if row.name.is_empty() { "-" } else { row.name.as_str() };
        output::line(format!(
            "  {:>3}  {:<20} {:>5}  {:<14} {}",
            index + 1,
            name,
            row.order,
            row.flag_summary(),
            row.sticky_value
        ));
    }
    if !editor.deletions().is_empty() {
        output::line(format!(
            "  Pending deletions: {}",
            editor.deletions().len()
        ));
    }
    if !editor.can_advance() {
        output::hint("Give the template a name of at least 3 characters before saving.");
    }
}

fn entry_sheet(sheet: &EntrySheet) {
    let Some(batch) = sheet.batch() else {
        output::warning("No batch selected. Use `back` to choose a template.");
        return;
    };
    output::line(format!("  Batch: {}", batch_summary(batch)));
    let fields: Vec<String> = sheet
        .fields()
        .iter()
        .map(|field| {
            let flags = field.flag_summary();
            if flags == "-" {
                field.name.clone()
            } else {
                format!("{} ({})", field.name, flags)
            }
        })
        .collect();
    output::line(format!("  Fields: {}", fields.join(", ")));
    if sheet.entries().is_empty() {
        output::info("No pending entries. Use `add-entry` to start one.");
    }
    for (index, entry) in sheet.entries().iter().enumerate() {
        let values: Vec<String> = sheet
            .fields()
            .iter()
            .map(|field| {
                format!(
                    "{}={}",
                    field.name,
                    entry.value(&field.name).unwrap_or("")
                )
            })
            .collect();
        output::line(format!("  {}. {}", index + 1, values.join("  ")));
    }
}

fn batch_summary(batch: &Batch) -> String {
    let mut summary = format!(
        "{} [{}] created {}",
        batch.name,
        batch.status,
        batch.created_at.format("%Y-%m-%d")
    );
    if let Some(count) = batch.expected_count {
        summary.push_str(&format!(", expecting {count} entries"));
    }
    summary
}
