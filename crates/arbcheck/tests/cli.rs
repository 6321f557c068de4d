use std::path::Path;
use std::process::{Command, Output};

fn arbcheck(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_arbcheck"))
        .args(args)
        .env_remove("ARBCHECK_LOG")
        .output()
        .expect("failed to run arbcheck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn detected_index_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("flash_all.sh");
    std::fs::write(&script, "CURRENT_ANTI_VER=3\n").unwrap();

    let output = arbcheck(&[&script]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("ARB index is: 3"));
}

#[test]
fn not_detected_has_its_own_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("flash_all.bat");
    std::fs::write(&script, "@echo off\r\nfastboot reboot\r\n").unwrap();

    let output = arbcheck(&[&script]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).contains("No ARB detected!"));
}

#[test]
fn unsupported_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("foo.txt");
    std::fs::write(&input, "hello").unwrap();

    let output = arbcheck(&[&input]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("must be a Recovery / Fastboot ROM"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = arbcheck(&[&dir.path().join("flash_all.sh")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn missing_argument_is_a_usage_error() {
    let output = arbcheck(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}
