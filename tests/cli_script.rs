mod common;

use assert_cmd::Command;
use predicates::str::contains;

fn script_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("microdose_planner_cli").unwrap();
    cmd.env("MICRODOSE_PLANNER_CLI_SCRIPT", "1")
        .env("MICRODOSE_PLANNER_HOME", home);
    cmd
}

#[test]
fn script_mode_exports_marked_sessions() {
    let home = common::temp_home();
    let out = home.join("plan.ics");
    let input = format!(
        "start 2025-01-01\npattern two_per_week\ntoggle 2025-01-04 3\nexport {}\nexit\n",
        out.display()
    );

    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Marked 2025-01-04."))
        .stdout(contains("Marked 2025-01-08."))
        .stdout(contains("Exported 2 marked sessions"));

    let ics = std::fs::read_to_string(&out).unwrap();
    assert!(ics.contains("UID:20250104-0@magicbar.co"));
    assert!(ics.contains("UID:20250108-1@magicbar.co"));
    assert!(!ics.contains("DTSTART;VALUE=DATE:20250101"));
}

#[test]
fn script_mode_prints_calendar_to_stdout() {
    let home = common::temp_home();
    script_cmd(&home)
        .write_stdin("start 2025-01-01\npattern eod\nexport -\n")
        .assert()
        .success()
        .stdout(contains("BEGIN:VCALENDAR"))
        .stdout(contains("DTSTART;VALUE=DATE:20250212"))
        .stdout(contains("END:VCALENDAR"));
}

#[test]
fn script_mode_reports_bad_input_and_suggestions() {
    let home = common::temp_home();
    script_cmd(&home)
        .write_stdin("start 2025-02-30\npattern two_per_wek\nexprt\n")
        .assert()
        .success()
        .stdout(contains("invalid date `2025-02-30`"))
        .stdout(contains("did you mean `two_per_week`?"))
        .stdout(contains("Suggestion: `export`?"));
}

#[test]
fn script_mode_refuses_export_of_stale_marks_only() {
    let home = common::temp_home();
    let out = home.join("stale.ics");
    let input = format!(
        "start 2025-01-01\ntoggle 2024-12-31\nexport {}\n",
        out.display()
    );

    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("ERROR: [x] nothing to export"));

    assert!(!out.exists());
}

#[test]
fn config_changes_persist_between_runs() {
    let home = common::temp_home();
    script_cmd(&home)
        .write_stdin("config set default_pattern every_other_day\nconfig set summary \"Dose day\"\n")
        .assert()
        .success()
        .stdout(contains("Set summary = Dose day."));

    script_cmd(&home)
        .write_stdin("patterns\nexport -\n")
        .assert()
        .success()
        .stdout(contains("every_other_day  Every other day - 22 sessions (current)"))
        .stdout(contains("SUMMARY:Dose day"));
}
