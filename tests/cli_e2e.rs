//! End-to-end tests for the `owl` binary

use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn owl(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_owl"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to start owl: {}", e));

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait for owl");

    if !output.status.success() {
        eprintln!("--- STDOUT ---");
        eprintln!("{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("--- STDERR ---");
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        panic!(
            "owl {:?} failed with exit code: {}",
            args,
            output.status.code().unwrap_or(-1)
        );
    }
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_run_perfect_session_json() {
    let output = owl(
        &[
            "run",
            "--activity",
            "compare",
            "--controller",
            "perfect",
            "--seed",
            "7",
            "--verbosity",
            "silent",
            "--json",
        ],
        "",
    );
    let text = stdout(&output);
    let last = text.lines().last().expect("a result line");
    let result: Value = serde_json::from_str(last).unwrap();
    assert_eq!(result["variant"], "comparison");
    assert_eq!(result["score"], 5);
    assert_eq!(result["stars"], "Three");
    assert_eq!(result["end_reason"], "Completed");
    assert_eq!(result["mistakes"], 0);
}

#[test]
fn test_run_script_controller_text() {
    let output = owl(
        &[
            "run", "-a", "compare", "--controller", "script", "--script", "0,1", "--seed", "3",
            "--max-attempts", "1", "--max-inputs", "200", "-v", "0",
        ],
        "",
    );
    let text = stdout(&output);
    assert!(text.contains("=== Session Result ==="));
    assert!(text.contains("Activity: "));
    assert!(text.contains("Ended: Completed"));
}

#[test]
fn test_run_saves_final_snapshot() {
    let path = std::env::temp_dir().join(format!("owl-cli-snapshot-{}.json", std::process::id()));
    let path_arg = path.to_string_lossy().into_owned();
    let output = owl(
        &[
            "run", "-a", "counting", "--controller", "perfect", "--seed", "4", "--think-ms",
            "250", "-v", "silent", "--json", "--snapshot", &path_arg,
        ],
        "",
    );
    let result: Value = serde_json::from_str(stdout(&output).lines().last().unwrap()).unwrap();
    // One answer per round; thinking overlaps each celebration
    assert_eq!(result["elapsed_ms"], 5 * 1500);

    let snapshot: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(snapshot["variant"], "counting");
    assert_eq!(snapshot["phase"]["phase"], "complete");
    assert_eq!(snapshot["state"]["score"], 5);
    assert_eq!(snapshot["stars"], "Three");
}

#[test]
fn test_simulate_seeded_is_reproducible() {
    let args = [
        "simulate", "--games", "50", "--seed", "12", "--controller", "random", "--json",
    ];
    let a: Value = serde_json::from_str(&stdout(&owl(&args, ""))).unwrap();
    let b: Value = serde_json::from_str(&stdout(&owl(&args, ""))).unwrap();
    similar_asserts::assert_eq!(a, b);
    assert_eq!(a["seed"], 12);
    assert_eq!(a["games"], 50);
    let ended = ["completed", "quit", "input_limit"]
        .iter()
        .map(|k| a[*k].as_u64().unwrap())
        .sum::<u64>();
    assert_eq!(ended, 50);
}

#[test]
fn test_simulate_text_report() {
    let output = owl(
        &[
            "simulate", "-g", "8", "-a", "balloons", "--controller", "perfect", "--seed", "1",
        ],
        "",
    );
    let text = stdout(&output);
    assert!(text.contains("=== Simulation Results ==="));
    assert!(text.contains("★★★ 8"));
    assert!(text.contains("balloons"));
}

#[test]
fn test_play_onboarding_then_quit() {
    let output = owl(&["play", "--seed", "5"], "Mia\n5\nq\n");
    let text = stdout(&output);
    assert!(text.contains("What's your name?"));
    assert!(text.contains("Pick a game"));
    assert!(text.contains("Bye!"));
}

#[test]
fn test_play_enter_game_and_leave() {
    // Pick the comparison game, back out to the menu, quit
    let output = owl(&["play", "--name", "Leo", "--age", "7", "--seed", "2"], "compare\nq\nq\n");
    let text = stdout(&output);
    assert!(text.contains("Round 1/5"));
    assert!(text.contains("answer group A"));
    assert!(text.contains("Bye!"));
}

#[test]
fn test_play_ends_on_eof() {
    let output = owl(&["play"], "");
    assert!(stdout(&output).contains("Bye!"));
}
