mod common;

use assert_cmd::Command;
use predicates::str::contains;
use regex::Regex;

use common::ScriptHarness;

const GIFTS_TEMPLATE: &str = "\
create-template
name Gifts
row 1 name Amount
row 1 required yes
add-row
row 2 name Campaign
row 2 sticky yes
row 2 sticky-value Spring
save
home
";

#[test]
fn script_mode_starts_on_the_initial_screen() {
    let harness = ScriptHarness::new();
    let mut cmd = Command::cargo_bin("batch_entry_cli").expect("binary exists");
    cmd.env("BATCH_ENTRY_HOME", harness.home())
        .env("BATCH_ENTRY_CLI_SCRIPT", "1")
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(contains("=== Batch Entry ==="))
        .stdout(contains("create-template"));
}

#[test]
fn full_flow_persists_template_batch_and_entries() {
    let harness = ScriptHarness::new();
    let script = format!(
        "{GIFTS_TEMPLATE}\
create-batch
next
set name \"March gifts\"
set expected_count 2
next
use 1
add-entry
value 1 Amount 25
save
exit
"
    );

    let output = harness.run_script(&script);

    assert!(output
        .stdout
        .contains("Success! The record has been saved successfully."));
    assert!(output.stdout.contains("Please review the following fields:"));
    assert!(output.stdout.contains("- Batch Name"));
    assert!(output.stdout.contains("[3. Enter data]"));
    assert!(output.stdout.contains("1 entries stored."));

    let catalog = harness.catalog();
    assert!(catalog.contains("\"Gifts\""));
    assert!(catalog.contains("\"March gifts\""));
    assert!(catalog.contains("\"Amount\": \"25\""));
    assert!(catalog.contains("\"Campaign\": \"Spring\""));

    let template_id = Regex::new(r#""template": \{\s*"id": "([0-9a-f-]{36})""#)
        .expect("regex")
        .captures(&catalog)
        .map(|caps| caps[1].to_string())
        .expect("template id");
    let linked = Regex::new(r#""template_id": "([0-9a-f-]{36})""#)
        .expect("regex")
        .captures(&catalog)
        .map(|caps| caps[1].to_string())
        .expect("batch template id");
    assert_eq!(template_id, linked);
}

#[test]
fn duplicate_template_name_warns_and_keeps_the_session() {
    let harness = ScriptHarness::new();
    let script = format!(
        "{GIFTS_TEMPLATE}\
create-template
name GIFTS
row 1 name Notes
save
screen
exit
"
    );

    let output = harness.run_script(&script);

    assert!(output
        .stdout
        .contains("Warning! A record with this name already exists, please change it."));
    assert!(output.stdout.contains("Name: GIFTS"));
    assert_eq!(harness.catalog().matches("\"Notes\"").count(), 0);
}

#[test]
fn blank_rows_block_the_save_until_named() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "create-template\nname Pledges\nadd-row\nrow 2 name Amount\nsave\nexit\n",
    );

    assert!(output
        .stdout
        .contains("Field name can't be blank on row number 1"));
    assert!(!output.stdout.contains("Success!"));
}

#[test]
fn validation_can_be_switched_off() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "config set validate_before_save false\ncreate-template\nname Pledges\nsave\nexit\n",
    );

    assert!(output.stdout.contains("Configuration updated."));
    assert!(output.stdout.contains("Success!"));
    let config = std::fs::read_to_string(harness.home().join("config").join("config.json"))
        .expect("config written");
    assert!(config.contains("\"validate_before_save\": false"));
}

#[test]
fn editing_a_template_deletes_removed_rows() {
    let harness = ScriptHarness::new();
    let script = format!(
        "{GIFTS_TEMPLATE}\
create-batch
set name April
next
edit 1
remove-row 1
save
exit
"
    );

    let output = harness.run_script(&script);

    assert!(output.stdout.contains("Mode: edit"));
    assert!(output.stdout.contains("Row 1 (Amount) removed."));
    let catalog = harness.catalog();
    assert!(!catalog.contains("\"Amount\""));
    assert!(catalog.contains("\"Campaign\""));
}

#[test]
fn cloning_clears_the_name_and_stores_a_copy() {
    let harness = ScriptHarness::new();
    let script = format!(
        "{GIFTS_TEMPLATE}\
create-batch
set name May
next
clone 1
screen
name \"Gifts copy\"
save
exit
"
    );

    let output = harness.run_script(&script);

    assert!(output.stdout.contains("Mode: clone"));
    assert!(output.stdout.contains("Name: -"));
    let catalog = harness.catalog();
    assert!(catalog.contains("\"Gifts copy\""));
    assert_eq!(catalog.matches("\"Campaign\"").count(), 2);
}

#[test]
fn continuing_a_batch_reopens_data_entry() {
    let harness = ScriptHarness::new();
    let script = format!(
        "{GIFTS_TEMPLATE}\
create-batch
set name June
next
use 1
home
continue
open 1
add-entry
exit
"
    );

    let output = harness.run_script(&script);

    assert!(output.stdout.contains("=== Continue a Batch ==="));
    assert!(output.stdout.contains("June [Open]"));
    assert!(output.stdout.contains("Entry 1 added."));
    assert!(output.stdout.contains("Campaign=Spring"));
}

#[test]
fn unknown_and_misplaced_commands_are_reported() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("ad-row\nsave\nexit\n");

    assert!(output.stdout.contains("Unknown command `ad-row`"));
    assert!(output.stdout.contains("Suggestion: `add-row`?"));
    assert!(output
        .stdout
        .contains("`save` is not available on the Batch Entry screen"));
}

#[test]
fn deleting_a_template_empties_the_list() {
    let harness = ScriptHarness::new();
    let script = format!(
        "{GIFTS_TEMPLATE}\
create-batch
set name July
next
delete 1
exit
"
    );

    let output = harness.run_script(&script);

    assert!(output.stdout.contains("Batch: July (Draft)"));
    let listed = Regex::new(r"1\. Gifts \[[0-9a-f]{8}\]").expect("pattern");
    assert!(listed.is_match(&output.stdout));
    assert!(output.stdout.contains("Template `Gifts` deleted."));
    assert!(output.stdout.contains("No templates yet."));
    assert!(!harness.catalog().contains("\"Gifts\""));
}
