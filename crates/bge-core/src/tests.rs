use std::sync::Arc;

use bge_domain::{Batch, FieldAttribute, FieldId, FieldRow, Identifiable, Template};

use crate::{
    BatchCreator, BatchSelector, Catalog, ContainerFlags, CoreError, EditorMode, EntrySheet,
    GatewayAction, GatewayError, InMemoryGateway, MountRequest, ProcessStage, RecordingNotifier,
    RemoteGateway, SaveOutcome, Screen, SelectorOutcome, Severity, TemplateAction,
    TemplateEditor, TemplateSelector, WizardNavigator, WizardSettings, WizardStage,
};

fn settings() -> WizardSettings {
    WizardSettings::default()
}

fn seeded_gateway() -> (InMemoryGateway, Template) {
    let mut catalog = Catalog::new();
    let rows = vec![
        FieldRow::named("Amount"),
        FieldRow::named("Donor"),
        FieldRow::named("Campaign"),
    ];
    catalog
        .save_template(&Template::new("Gifts"), &rows)
        .expect("seed template");
    let template = catalog.templates().remove(0);
    (InMemoryGateway::with_catalog(catalog), template)
}

fn persisted_row(name: &str) -> FieldRow {
    FieldRow::named(name).with_id(FieldId::new())
}

fn names(editor: &TemplateEditor) -> Vec<&str> {
    editor.rows().iter().map(|row| row.name.as_str()).collect()
}

#[test]
fn add_row_appends_default_row() {
    let mut editor = TemplateEditor::with_rows(
        Template::draft(),
        EditorMode::Create,
        vec![FieldRow::named("Amount")],
        &settings(),
    );

    let index = editor.add_row();

    assert_eq!(index, 1);
    assert_eq!(editor.rows().len(), 2);
    assert_eq!(editor.rows()[1], FieldRow::blank());
}

#[test]
fn remove_row_keeps_remaining_order() {
    let mut editor = TemplateEditor::with_rows(
        Template::draft(),
        EditorMode::Create,
        vec![
            FieldRow::named("A"),
            FieldRow::named("B"),
            FieldRow::named("C"),
        ],
        &settings(),
    );

    let removed = editor.remove_row(1).expect("row removed");

    assert_eq!(removed.name, "B");
    assert_eq!(names(&editor), vec!["A", "C"]);
    assert!(editor.remove_row(7).is_none());
    assert_eq!(editor.rows().len(), 2);
}

#[test]
fn only_persisted_rows_enter_the_deletion_set() {
    let mut editor = TemplateEditor::with_rows(
        Template::draft(),
        EditorMode::Create,
        vec![persisted_row("Stored"), FieldRow::named("Fresh")],
        &settings(),
    );

    editor.remove_row(1);
    assert!(editor.deletions().is_empty());

    editor.remove_row(0);
    assert_eq!(editor.deletions().len(), 1);
    assert_eq!(editor.deletions()[0].name, "Stored");
    assert!(editor.rows().is_empty());
}

#[test]
fn open_adds_a_blank_row_for_new_templates() {
    let gateway = InMemoryGateway::new();
    let editor = TemplateEditor::open(Template::draft(), EditorMode::Create, &gateway, &settings());

    assert_eq!(editor.rows().len(), 1);
    assert!(!editor.rows()[0].has_name());
    assert!(gateway.calls().is_empty());
}

#[test]
fn open_loads_persisted_rows_for_existing_templates() {
    let (gateway, template) = seeded_gateway();
    let id = template.id.expect("seeded id");
    let editor = TemplateEditor::open(
        template,
        EditorMode::Edit { template: id },
        &gateway,
        &settings(),
    );

    assert_eq!(names(&editor), vec!["Amount", "Donor", "Campaign"]);
    assert_eq!(gateway.calls(), vec![GatewayAction::LoadTemplateFields]);
}

#[test]
fn open_with_failed_load_still_offers_a_row() {
    let (gateway, template) = seeded_gateway();
    let id = template.id.expect("seeded id");
    gateway.fail_next(
        GatewayAction::LoadTemplateFields,
        GatewayError::Transport("offline".into()),
    );

    let editor = TemplateEditor::open(
        template,
        EditorMode::Edit { template: id },
        &gateway,
        &settings(),
    );

    assert_eq!(editor.rows().len(), 1);
    assert!(!editor.rows()[0].has_name());
}

#[test]
fn save_routes_to_the_action_matching_the_mode() {
    let (gateway, template) = seeded_gateway();
    let id = template.id.expect("seeded id");
    let mut notifier = RecordingNotifier::new();

    let mut create = TemplateEditor::with_rows(
        Template::new("Pledges"),
        EditorMode::Create,
        vec![FieldRow::named("Amount")],
        &settings(),
    );
    create.save(&gateway, &mut notifier).expect("create");

    let mut clone = TemplateEditor::with_rows(
        Template::new("Gifts copy"),
        EditorMode::Clone { source: id },
        vec![FieldRow::named("Amount")],
        &settings(),
    );
    clone.save(&gateway, &mut notifier).expect("clone");

    let mut edit = TemplateEditor::with_rows(
        template,
        EditorMode::Edit { template: id },
        vec![FieldRow::named("Amount")],
        &settings(),
    );
    edit.save(&gateway, &mut notifier).expect("edit");

    assert_eq!(
        gateway.calls(),
        vec![
            GatewayAction::SaveTemplate,
            GatewayAction::CloneTemplate,
            GatewayAction::EditTemplate,
            GatewayAction::LoadTemplateFields,
        ]
    );
    assert_eq!(notifier.toasts().len(), 3);
}

#[test]
fn repeated_edit_saves_store_each_row_once() {
    let (gateway, template) = seeded_gateway();
    let id = template.id.expect("seeded id");
    let mut editor = TemplateEditor::open(
        template,
        EditorMode::Edit { template: id },
        &gateway,
        &settings(),
    );
    let index = editor.add_row();
    editor
        .set_row_attribute(index, FieldAttribute::Name, "Notes")
        .expect("named");
    editor.remove_row(0);
    let mut notifier = RecordingNotifier::new();

    editor.save(&gateway, &mut notifier).expect("first save");
    assert!(editor.deletions().is_empty());
    assert!(editor.rows().iter().all(|row| row.is_persisted()));
    editor.save(&gateway, &mut notifier).expect("second save");

    let stored = gateway.snapshot().template_fields(id).expect("fields");
    let stored: Vec<_> = stored.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(stored, vec!["Donor", "Campaign", "Notes"]);
    assert_eq!(names(&editor), vec!["Donor", "Campaign", "Notes"]);
    assert_eq!(notifier.toasts().len(), 2);
}

#[test]
fn edit_save_sends_the_deletion_set() {
    let (gateway, template) = seeded_gateway();
    let id = template.id.expect("seeded id");
    let mut editor = TemplateEditor::open(
        template,
        EditorMode::Edit { template: id },
        &gateway,
        &settings(),
    );
    editor.remove_row(0);
    let mut notifier = RecordingNotifier::new();

    assert_eq!(
        editor.save(&gateway, &mut notifier).expect("edit"),
        SaveOutcome::Saved
    );

    let stored = gateway.snapshot().template_fields(id).expect("fields");
    let stored: Vec<_> = stored.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(stored, vec!["Donor", "Campaign"]);
}

#[test]
fn clone_starts_with_a_blank_name_and_the_source_rows() {
    let (gateway, _) = seeded_gateway();
    let mut selector = TemplateSelector::open(None, &gateway);
    selector.highlight(0).expect("highlighted");

    let outcome = selector
        .select_template(TemplateAction::Clone, &gateway)
        .expect("clone");
    let SelectorOutcome::Navigate(MountRequest::TemplateCreation { template, mode }) = outcome
    else {
        panic!("expected template creation");
    };
    assert!(template.name.is_empty());
    assert!(matches!(mode, EditorMode::Clone { .. }));

    let editor = TemplateEditor::open(template, mode, &gateway, &settings());
    assert!(editor.template().name.is_empty());
    assert!(!editor.can_advance());
    assert_eq!(names(&editor), vec!["Amount", "Donor", "Campaign"]);
}

#[test]
fn validate_required_lists_every_blank_row() {
    let editor = TemplateEditor::with_rows(
        Template::new("Gifts"),
        EditorMode::Create,
        vec![
            FieldRow::blank(),
            FieldRow::named("Amount"),
            FieldRow::named("   "),
        ],
        &settings(),
    );

    let report = editor.validate_required().expect_err("blank rows");

    assert_eq!(report.rows(), &[1, 3]);
    assert_eq!(
        report.messages(),
        vec![
            "Field name can't be blank on row number 1".to_string(),
            "Field name can't be blank on row number 3".to_string(),
        ]
    );
}

#[test]
fn duplicate_name_warns_and_keeps_edits() {
    let (gateway, _) = seeded_gateway();
    let mut editor = TemplateEditor::with_rows(
        Template::new("gifts"),
        EditorMode::Create,
        vec![FieldRow::named("Amount"), FieldRow::named("Notes")],
        &settings(),
    );
    let mut notifier = RecordingNotifier::new();

    let outcome = editor.save(&gateway, &mut notifier).expect("completed");

    assert_eq!(outcome, SaveOutcome::DuplicateName);
    let toast = notifier.last().expect("toast");
    assert_eq!(toast.severity, Severity::Warning);
    assert_eq!(toast.title, "Warning!");
    assert_eq!(
        toast.message,
        "A record with this name already exists, please change it."
    );
    assert_eq!(editor.template().name, "gifts");
    assert_eq!(names(&editor), vec!["Amount", "Notes"]);
}

#[test]
fn clone_and_edit_warn_on_duplicate_names() {
    let (gateway, template) = seeded_gateway();
    let id = template.id.expect("seeded id");
    gateway
        .save_template(&Template::new("Pledges"), &[FieldRow::named("Amount")])
        .expect("second template");
    let mut notifier = RecordingNotifier::new();

    let mut clone = TemplateEditor::with_rows(
        Template::new(" GIFTS "),
        EditorMode::Clone { source: id },
        vec![FieldRow::named("Amount")],
        &settings(),
    );
    assert_eq!(
        clone.save(&gateway, &mut notifier).expect("clone completed"),
        SaveOutcome::DuplicateName
    );

    let mut renamed = template;
    renamed.name = "pledges".into();
    let mut edit = TemplateEditor::open(
        renamed,
        EditorMode::Edit { template: id },
        &gateway,
        &settings(),
    );
    let index = edit.add_row();
    edit.set_row_attribute(index, FieldAttribute::Name, "Notes")
        .expect("named");
    assert_eq!(
        edit.save(&gateway, &mut notifier).expect("edit completed"),
        SaveOutcome::DuplicateName
    );

    assert_eq!(notifier.toasts().len(), 2);
    assert!(notifier
        .toasts()
        .iter()
        .all(|toast| toast.severity == Severity::Warning && toast.title == "Warning!"));
    assert_eq!(edit.template().name, "pledges");
    assert_eq!(edit.rows().len(), 4);
    assert_eq!(gateway.snapshot().templates().len(), 2);
    let stored = gateway.snapshot().template_fields(id).expect("fields");
    assert_eq!(stored.len(), 3);
    assert_eq!(gateway.snapshot().templates()[0].name, "Gifts");
}

#[test]
fn successful_save_fires_a_success_toast() {
    let gateway = InMemoryGateway::new();
    let mut editor = TemplateEditor::with_rows(
        Template::new("Pledges"),
        EditorMode::Create,
        vec![FieldRow::named("Amount")],
        &settings(),
    );
    let mut notifier = RecordingNotifier::new();

    editor.save(&gateway, &mut notifier).expect("saved");

    let toast = notifier.last().expect("toast");
    assert_eq!(toast.severity, Severity::Success);
    assert_eq!(toast.title, "Success!");
    assert_eq!(toast.duration_secs, 5);
}

#[test]
fn failed_save_returns_error_without_toast() {
    let gateway = InMemoryGateway::new();
    gateway.fail_next(
        GatewayAction::SaveTemplate,
        GatewayError::Server("unavailable".into()),
    );
    let mut editor = TemplateEditor::with_rows(
        Template::new("Pledges"),
        EditorMode::Create,
        vec![FieldRow::named("Amount")],
        &settings(),
    );
    let mut notifier = RecordingNotifier::new();

    let err = editor.save(&gateway, &mut notifier).expect_err("failure");

    assert!(matches!(err, CoreError::Gateway(GatewayError::Server(_))));
    assert!(notifier.toasts().is_empty());
    assert_eq!(names(&editor), vec!["Amount"]);
}

#[test]
fn blank_rows_block_the_save_when_validation_is_on() {
    let gateway = InMemoryGateway::new();
    let mut editor = TemplateEditor::with_rows(
        Template::new("Pledges"),
        EditorMode::Create,
        vec![FieldRow::blank()],
        &settings(),
    );
    let mut notifier = RecordingNotifier::new();

    let err = editor.save(&gateway, &mut notifier).expect_err("blocked");

    assert!(matches!(err, CoreError::RequiredFields(_)));
    assert!(gateway.calls().is_empty());
}

#[test]
fn blank_rows_pass_through_when_validation_is_off() {
    let gateway = InMemoryGateway::new();
    let settings = WizardSettings {
        validate_before_save: false,
        ..WizardSettings::default()
    };
    let mut editor = TemplateEditor::with_rows(
        Template::new("Pledges"),
        EditorMode::Create,
        vec![FieldRow::blank()],
        &settings,
    );
    let mut notifier = RecordingNotifier::new();

    editor.save(&gateway, &mut notifier).expect("dispatched");

    assert_eq!(gateway.calls(), vec![GatewayAction::SaveTemplate]);
}

#[test]
fn three_adds_and_a_removal_save_the_expected_rows() {
    let gateway = InMemoryGateway::new();
    let mut editor =
        TemplateEditor::open(Template::draft(), EditorMode::Create, &gateway, &settings());
    editor.set_name("Donations");
    editor.remove_row(0);
    for name in ["A", "B", "C"] {
        let index = editor.add_row();
        editor
            .set_row_attribute(index, FieldAttribute::Name, name)
            .expect("name set");
    }
    editor.remove_row(1);
    assert!(editor.deletions().is_empty());

    let mut notifier = RecordingNotifier::new();
    editor.save(&gateway, &mut notifier).expect("saved");

    let catalog = gateway.snapshot();
    let template = catalog.templates().remove(0);
    let fields = catalog
        .template_fields(template.id.expect("id"))
        .expect("fields");
    let names: Vec<_> = fields.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn can_advance_needs_three_characters() {
    let mut editor = TemplateEditor::with_rows(
        Template::draft(),
        EditorMode::Create,
        Vec::new(),
        &settings(),
    );
    editor.set_name(" ab ");
    assert!(!editor.can_advance());
    editor.set_name("abc");
    assert!(editor.can_advance());
    editor.set_name("");
    assert!(!editor.can_advance());
}

#[test]
fn set_row_attribute_rejects_missing_rows() {
    let mut editor = TemplateEditor::with_rows(
        Template::draft(),
        EditorMode::Create,
        Vec::new(),
        &settings(),
    );
    let err = editor
        .set_row_attribute(0, FieldAttribute::Name, "Amount")
        .expect_err("no rows");
    assert!(matches!(err, CoreError::RowOutOfRange(1)));
}

#[test]
fn selector_ignores_actions_without_a_highlight() {
    let (gateway, _) = seeded_gateway();
    let mut selector = TemplateSelector::open(None, &gateway);

    let outcome = selector
        .select_template(TemplateAction::Delete, &gateway)
        .expect("idle");

    assert_eq!(outcome, SelectorOutcome::Idle);
    assert_eq!(gateway.snapshot().templates.len(), 1);
}

#[test]
fn selector_delete_reloads_the_list() {
    let (gateway, _) = seeded_gateway();
    let mut selector = TemplateSelector::open(None, &gateway);
    selector.highlight(0);

    let outcome = selector
        .select_template(TemplateAction::Delete, &gateway)
        .expect("deleted");

    assert!(matches!(outcome, SelectorOutcome::Deleted(ref t) if t.name == "Gifts"));
    assert!(selector.templates().is_empty());
    assert!(selector.current().is_none());
}

#[test]
fn template_action_codes_map_to_actions() {
    assert_eq!(TemplateAction::try_from(1u8).ok(), Some(TemplateAction::Edit));
    assert_eq!(TemplateAction::try_from(2u8).ok(), Some(TemplateAction::Clone));
    assert_eq!(TemplateAction::try_from(3u8).ok(), Some(TemplateAction::Delete));
    assert!(TemplateAction::try_from(9u8).is_err());
}

#[test]
fn enter_data_without_a_batch_does_nothing() {
    let (gateway, _) = seeded_gateway();
    let mut selector = TemplateSelector::open(None, &gateway);

    let next = selector.next_to_enter_data(0, &gateway).expect("no-op");

    assert!(next.is_none());
    assert!(!gateway.calls().contains(&GatewayAction::SaveBatch));
}

#[test]
fn batch_creator_reports_missing_name() {
    let creator = BatchCreator::new(settings().batch_required_fields);

    let err = creator.save().expect_err("missing name");

    match err {
        CoreError::Validation(message) => {
            assert_eq!(message, "Please review the following fields:\n- Batch Name")
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn batch_flows_into_data_entry() {
    let (gateway, _) = seeded_gateway();
    let mut creator = BatchCreator::new(settings().batch_required_fields);
    creator.set_field("name", "March gifts").expect("name");
    creator.set_field("expected-count", "2").expect("count");
    let MountRequest::TemplateSelection { batch } = creator.save().expect("valid") else {
        panic!("expected template selection");
    };
    assert!(gateway.snapshot().batches.is_empty());

    let mut selector = TemplateSelector::open(batch, &gateway);
    let Some(MountRequest::EnterData { batch_id }) =
        selector.next_to_enter_data(0, &gateway).expect("saved")
    else {
        panic!("expected data entry");
    };

    let mut sheet = EntrySheet::open(batch_id, &gateway, &settings());
    assert!(sheet.is_ready());
    assert_eq!(sheet.fields().len(), 3);
    let first = sheet.add_entry().expect("entry");
    sheet.set_value(first, "amount", "25").expect("value");
    let mut notifier = RecordingNotifier::new();
    assert_eq!(sheet.save(&gateway, &mut notifier).expect("saved"), 1);
    assert!(sheet.entries().is_empty());

    let id = batch_id.expect("batch id");
    let stored = gateway.snapshot().entries(id);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].value("Amount"), Some("25"));
}

#[test]
fn entry_sheet_carries_sticky_values() {
    let mut catalog = Catalog::new();
    let mut campaign = FieldRow::named("Campaign");
    campaign.sticky = true;
    campaign.sticky_value = "Spring".into();
    let mut amount = FieldRow::named("Amount");
    amount.required = true;
    catalog
        .save_template(&Template::new("Gifts"), &[campaign, amount])
        .expect("template");
    let template = catalog.templates().remove(0);
    let batch = catalog
        .save_batch(&Batch::new("April"), &template)
        .expect("batch");
    let gateway = InMemoryGateway::with_catalog(catalog);

    let mut sheet = EntrySheet::open(batch.id, &gateway, &settings());
    let first = sheet.add_entry().expect("first");
    assert_eq!(sheet.entries()[first].value("Campaign"), Some("Spring"));
    sheet.set_value(first, "Campaign", "Summer").expect("override");
    let second = sheet.add_entry().expect("second");
    assert_eq!(sheet.entries()[second].value("Campaign"), Some("Summer"));

    let err = sheet.validate().expect_err("amount missing");
    assert!(err.to_string().contains("Entry 1: missing Amount"));
}

#[test]
fn entry_sheet_without_a_batch_is_inert() {
    let gateway = InMemoryGateway::new();
    let mut sheet = EntrySheet::open(None, &gateway, &settings());

    assert!(!sheet.is_ready());
    assert!(sheet.add_entry().is_none());
    assert!(gateway.calls().is_empty());
}

#[test]
fn batch_selector_continues_a_stored_batch() {
    let (gateway, template) = seeded_gateway();
    let stored = gateway
        .save_batch(&Batch::new("May"), &template)
        .expect("batch");
    let selector = BatchSelector::open(&gateway);

    assert_eq!(selector.batches().len(), 1);
    assert_eq!(
        selector.continue_batch(0),
        Some(MountRequest::EnterData {
            batch_id: stored.id
        })
    );
    assert_eq!(selector.continue_batch(4), None);
}

#[test]
fn container_flags_prefer_the_process_stage() {
    let flags = ContainerFlags {
        show_batch_creation: true,
        process_stage: Some(ProcessStage::EnterDataStage),
        ..ContainerFlags::default()
    };
    assert_eq!(flags.resolve(), Some(WizardStage::EnterData));

    let flags = ContainerFlags {
        show_template_selection: true,
        show_template_creation: true,
        ..ContainerFlags::default()
    };
    assert_eq!(flags.resolve(), Some(WizardStage::TemplateSelection));
    assert_eq!(ContainerFlags::default().resolve(), None);
    assert_eq!(
        ProcessStage::from_wire_name("selectBatchStage"),
        Some(ProcessStage::SelectBatchStage)
    );
}

#[test]
fn navigator_mounts_one_screen_at_a_time() {
    let (gateway, _) = seeded_gateway();
    let gateway: Arc<dyn RemoteGateway> = Arc::new(gateway);
    let mut navigator = WizardNavigator::new(
        gateway,
        Box::new(RecordingNotifier::new()),
        settings(),
    );
    assert_eq!(navigator.stage(), WizardStage::Initial);
    assert!(navigator.progress().is_none());

    navigator.mount(MountRequest::BatchCreation);
    assert_eq!(navigator.stage(), WizardStage::BatchCreation);
    let progress = navigator.progress().expect("progress bar");
    assert_eq!(progress.current, ProcessStage::CreateBatchStage);
    assert_eq!(progress.position(), 1);

    let next = match navigator.screen() {
        Screen::BatchCreation(creator) => creator.next_to_initial(),
        _ => panic!("batch creation expected"),
    };
    assert_eq!(navigator.apply(Some(next)), Some(WizardStage::Initial));
    assert!(matches!(navigator.screen(), Screen::Initial(_)));

    assert_eq!(navigator.apply(None), None);
    assert_eq!(navigator.stage(), WizardStage::Initial);
}

#[test]
fn navigator_mounts_from_container_flags() {
    let mut navigator = WizardNavigator::new(
        Arc::new(InMemoryGateway::new()),
        Box::new(RecordingNotifier::new()),
        settings(),
    );
    let flags = ContainerFlags {
        show_template_creation: true,
        ..ContainerFlags::default()
    };

    let stage = navigator
        .mount_with_flags(&flags, None)
        .expect("stage resolved");

    assert_eq!(stage, WizardStage::TemplateCreation);
    assert!(navigator.progress().is_none());
    match navigator.screen() {
        Screen::TemplateCreation(editor) => {
            assert_eq!(editor.mode(), EditorMode::Create);
            assert_eq!(editor.rows().len(), 1);
        }
        _ => panic!("template creation expected"),
    }
    assert!(navigator
        .mount_with_flags(&ContainerFlags::default(), None)
        .is_err());
}
