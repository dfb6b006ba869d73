//! CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

const DAY: &str = "2025-04-07";

struct Cli {
    dir: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create data dir"),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dayplan"));
        cmd.env("DAYPLAN_DATA_DIR", self.dir.path())
            .env_remove("DAYPLAN_LOG");
        cmd
    }

    /// Run a CLI command and return (code, stdout, stderr).
    fn run(&self, args: &[&str]) -> (i32, String, String) {
        let output = self
            .command()
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute CLI command");
        (
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }

    /// Run with `input` on stdin.
    fn run_with_input(&self, args: &[&str], input: &str) -> (i32, String, String) {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();
        (
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }

    fn place_json(&self, extra: &[&str]) -> serde_json::Value {
        let mut args = vec!["place", "--date", DAY, "--json"];
        args.extend_from_slice(extra);
        let (code, stdout, stderr) = self.run(&args);
        assert_eq!(code, 0, "place failed: {stderr}");
        serde_json::from_str(&stdout).expect("place --json output is not JSON")
    }

    fn list_json(&self) -> Vec<serde_json::Value> {
        let (code, stdout, stderr) = self.run(&["list", "--date", DAY, "--json"]);
        assert_eq!(code, 0, "list failed: {stderr}");
        let schedule: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        schedule["events"].as_array().cloned().unwrap_or_default()
    }
}

#[test]
fn test_place_fixed_without_conflict() {
    let cli = Cli::new();
    let placement = cli.place_json(&["Work", "--start", "11", "--end", "13"]);
    assert_eq!(placement["state"], "accepted");
    assert!(placement["event"]["id"].is_string());

    let events = cli.list_json();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Work");
    assert_eq!(events[0]["class"], "fixed");
}

#[test]
fn test_place_flexible_relocates() {
    let cli = Cli::new();
    cli.place_json(&["Work", "--start", "11", "--end", "13"]);
    let placement = cli.place_json(&["Study AI", "--start", "11", "--end", "12", "--flexible"]);

    assert_eq!(placement["state"], "relocated");
    assert_eq!(placement["event"]["interval"]["start"], "2025-04-07T13:00:00");
    assert_eq!(placement["event"]["interval"]["end"], "2025-04-07T14:00:00");
    assert_eq!(placement["requested"]["start"], "2025-04-07T11:00:00");
    assert_eq!(cli.list_json().len(), 2);
}

#[test]
fn test_place_no_rejects_and_persists_nothing() {
    let cli = Cli::new();
    cli.place_json(&["Work", "--start", "11", "--end", "13"]);
    let placement = cli.place_json(&["Meeting", "--start", "12:30", "--end", "14", "--no"]);

    assert_eq!(placement["state"], "rejected");
    assert_eq!(placement["reason"]["kind"], "confirmation_denied");
    assert_eq!(placement["reason"]["conflicts"][0]["title"], "Work");
    assert_eq!(cli.list_json().len(), 1);
}

#[test]
fn test_place_yes_overrides() {
    let cli = Cli::new();
    cli.place_json(&["Work", "--start", "11", "--end", "13"]);
    let placement = cli.place_json(&["Meeting", "--start", "1230", "--end", "14", "--yes"]);

    assert_eq!(placement["state"], "accepted");
    assert_eq!(placement["overridden"][0]["title"], "Work");
    assert_eq!(cli.list_json().len(), 2);
}

#[test]
fn test_place_interactive_answer() {
    let cli = Cli::new();
    cli.place_json(&["Work", "--start", "11", "--end", "13"]);

    let (code, stdout, stderr) = cli.run_with_input(
        &["place", "Meeting", "--date", DAY, "--start", "12:30", "--end", "14"],
        "yes\n",
    );
    assert_eq!(code, 0, "place failed: {stderr}");
    assert!(stderr.contains("Do you want to proceed?"));
    assert!(stdout.contains("'Meeting' added at 12:30-14:00"));
    assert_eq!(cli.list_json().len(), 2);
}

#[test]
fn test_place_closed_input_fails_closed() {
    let cli = Cli::new();
    cli.place_json(&["Work", "--start", "11", "--end", "13"]);

    let (code, stdout, _) = cli.run(&["place", "Meeting", "--date", DAY, "--start", "12", "--end", "14"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("was not added"));
    assert_eq!(cli.list_json().len(), 1);
}

#[test]
fn test_place_invalid_interval() {
    let cli = Cli::new();
    let (code, _, stderr) = cli.run(&["place", "Backwards", "--date", DAY, "--start", "14", "--end", "13"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert!(cli.list_json().is_empty());
}

#[test]
fn test_free_lists_gaps_within_configured_day() {
    let cli = Cli::new();
    assert_eq!(cli.run(&["config", "set", "day.start", "9"]).0, 0);
    assert_eq!(cli.run(&["config", "set", "day.end", "17"]).0, 0);
    cli.place_json(&["Work", "--start", "11", "--end", "13"]);

    let (code, stdout, stderr) = cli.run(&["free", "--date", DAY, "--json"]);
    assert_eq!(code, 0, "free failed: {stderr}");
    let gaps: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(gaps.len(), 2);
    assert_eq!(gaps[0]["start"], "2025-04-07T09:00:00");
    assert_eq!(gaps[0]["end"], "2025-04-07T11:00:00");
    assert_eq!(gaps[1]["start"], "2025-04-07T13:00:00");
    assert_eq!(gaps[1]["end"], "2025-04-07T17:00:00");

    let (_, stdout, _) = cli.run(&["free", "--date", DAY, "--from", "12", "--min", "300"]);
    assert!(stdout.contains("No free intervals"));
}

#[test]
fn test_config_get_set() {
    let cli = Cli::new();
    let (code, stdout, _) = cli.run(&["config", "get", "confirmation.timeout_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "120");

    assert_eq!(cli.run(&["config", "set", "day.start", "0830"]).0, 0);
    let (_, stdout, _) = cli.run(&["config", "get", "day.start"]);
    assert_eq!(stdout.trim(), "08:30");

    let (code, _, stderr) = cli.run(&["config", "set", "day.lunch", "12"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
