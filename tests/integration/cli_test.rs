use std::path::PathBuf;
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nqueens"))
}

fn run(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute nqueens")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_solve_four_queens() {
    let output = run(&["solve", "4", "--depth", "2", "--workers", "2"]);

    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}",
        output.status,
        stderr_of(&output)
    );

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Found 2 solutions."), "stdout: {}", stdout);
    assert!(stdout.contains("Partial configurations dispatched: 6"));
    assert!(stdout.contains("Worker Statistics:"));
    assert!(stdout.contains("worker 0:"));
    assert!(stdout.contains("worker 1:"));
}

#[test]
fn test_solve_shows_boards_in_order() {
    let output = run(&["solve", "4", "-k", "1", "-j", "3", "--show"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let first = stdout
        .find("Solution 1: [1, 3, 0, 2]")
        .expect("first solution missing");
    let second = stdout
        .find("Solution 2: [2, 0, 3, 1]")
        .expect("second solution missing");
    assert!(first < second);

    // Grid of the first solution
    assert!(stdout.contains(". Q . .\n. . . Q\nQ . . .\n. . Q .\n"));
}

#[test]
fn test_solve_eight_queens_default_depth() {
    let output = run(&["solve", "8", "--workers", "4"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("split depth 3"));
    assert!(stdout.contains("Found 92 solutions."));
}

#[test]
fn test_solve_with_spin_polling() {
    let output = run(&["solve", "6", "--depth", "2", "--workers", "2", "--poll", "spin"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("poll spin"));
    assert!(stdout.contains("Found 4 solutions."));
}

#[test]
fn test_solve_without_solutions() {
    let output = run(&["solve", "3", "--workers", "2"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Found 0 solutions."));
}

#[test]
fn test_solve_with_more_workers_than_prefixes() {
    let cases: [&[&str]; 2] = [
        &["solve", "3", "--workers", "8"],
        &["solve", "2", "--depth", "2", "--workers", "4"],
    ];
    for args in cases {
        for _ in 0..5 {
            let output = run(args);
            assert!(
                output.status.success(),
                "{:?} failed\nstderr: {}",
                args,
                stderr_of(&output)
            );
            assert!(stdout_of(&output).contains("Found 0 solutions."));
        }
    }
}

#[test]
fn test_sequential_eight_queens() {
    let output = run(&["sequential", "8"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Found 92 solutions."));
}

#[test]
fn test_depth_larger_than_board_is_rejected() {
    let output = run(&["solve", "4", "--depth", "5"]);

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("invalid parameters"), "stderr: {}", stderr);
    assert!(stderr.contains("split depth k (5) exceeds board size n (4)"));
}

#[test]
fn test_empty_board_is_rejected() {
    let output = run(&["sequential", "0"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("board size n must be at least 1"));
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run(&[]);
    assert!(!output.status.success());
}
