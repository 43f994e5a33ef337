//! End-to-end tests driving the `kanav` binary over its standard streams.

use std::fs::File;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

const PROMPT: &str = "Kanav> ";

fn kanav() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kanav"))
}

/// Feeds `script` to a fresh interpreter and collects everything it printed.
fn run_script(script: &str) -> Output {
    let mut child = kanav()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start kanav");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("wait for kanav")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn pipeline_routes_output_between_stages() {
    let output = run_script("echo hi | wc -w\n");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let counted: Vec<&str> = stdout
        .split(PROMPT)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(counted, vec!["1"]);
}

#[test]
fn three_stage_pipeline() {
    let output = run_script("printf b\\na\\nb\\n | sort | uniq -c\n");
    let stdout = stdout_of(&output).replace(PROMPT, "");
    let lines: Vec<Vec<&str>> = stdout
        .lines()
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(lines, vec![vec!["1", "a"], vec!["2", "b"]]);
}

#[test]
fn failing_program_returns_to_prompt() {
    let output = run_script("false\necho still here\n");
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        format!("{PROMPT}{PROMPT}still here\n{PROMPT}")
    );
}

#[test]
fn unknown_program_is_reported() {
    let output = run_script("no-such-program-for-kanav\necho after\n");
    assert!(output.status.success());
    assert!(
        stderr_of(&output)
            .contains("Error executing command: no-such-program-for-kanav: command not found")
    );
    assert!(stdout_of(&output).contains("after\n"));
}

#[test]
fn history_lists_recorded_lines() {
    let output = run_script("echo one\necho two\nhistory\n");
    assert_eq!(
        stdout_of(&output),
        format!("{PROMPT}one\n{PROMPT}two\n{PROMPT}1 echo one\n2 echo two\n3 history\n{PROMPT}")
    );
}

#[test]
fn history_size_flag_bounds_the_buffer() {
    let mut child = kanav()
        .args(["--history-size", "2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to start kanav");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"true\nfalse\nhistory\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(stdout_of(&output).contains("1 false\n2 history\n"));
}

#[test]
fn cd_changes_directory_for_later_commands() {
    let dir = tempfile::tempdir().expect("tempdir");
    let canonical = std::fs::canonicalize(dir.path()).unwrap();
    let output = run_script(&format!("cd {}\npwd\n", canonical.display()));
    assert!(stdout_of(&output).contains(&format!("{}\n", canonical.display())));
}

#[test]
fn cd_errors_are_reported() {
    let output = run_script("cd\ncd /definitely/not/here\necho ok\n");
    let stderr = stderr_of(&output);
    assert_eq!(stderr.matches("cd: expected argument to \"cd\"").count(), 1);
    assert!(stderr.contains("cd: /definitely/not/here:"));
    assert!(stdout_of(&output).contains("ok\n"));
}

#[test]
fn exit_stops_reading() {
    let output = run_script("exit\necho never\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), PROMPT);
}

#[test]
fn exit_ignores_its_arguments() {
    let output = run_script("exit -1\necho still running\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), PROMPT);
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn cd_accepts_directories_that_look_like_options() {
    let dir = tempfile::tempdir().expect("tempdir");
    let canonical = std::fs::canonicalize(dir.path()).unwrap();
    std::fs::create_dir(canonical.join("-dir")).unwrap();
    let output = run_script(&format!("cd {}\ncd -dir\npwd\n", canonical.display()));
    assert!(stdout_of(&output).contains(&format!("{}/-dir\n", canonical.display())));
}

#[test]
fn programs_are_found_without_path() {
    let mut child = kanav()
        .env_remove("PATH")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start kanav");
    child.stdin.take().unwrap().write_all(b"echo found\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert_eq!(stdout_of(&output), format!("{PROMPT}found\n{PROMPT}"));
}

#[test]
fn end_of_input_stops_cleanly() {
    let output = run_script("");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), PROMPT);
}

#[test]
fn background_command_does_not_block() {
    // Output goes to a file: a pipe would stay open as long as `sleep` runs.
    let dir = tempfile::tempdir().expect("tempdir");
    let out_path = dir.path().join("stdout");
    let stdout = File::create(&out_path).unwrap();

    let mut child = kanav()
        .stdin(Stdio::piped())
        .stdout(stdout)
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start kanav");
    let started = Instant::now();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"sleep 3 &\n")
        .unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert!(started.elapsed() < Duration::from_secs(2));

    let printed = std::fs::read_to_string(&out_path).unwrap();
    let pid_line = printed
        .lines()
        .find(|l| l.contains("Process running in background with PID: "))
        .expect("pid line");
    let pid = pid_line.rsplit(' ').next().unwrap();
    assert!(pid.parse::<u32>().is_ok(), "{pid_line}");
}

#[test]
fn empty_pipeline_stage_is_rejected() {
    let output = run_script("echo a | | wc\necho done\n");
    assert!(stderr_of(&output).contains("empty command in pipeline (stage 2)"));
    assert!(stdout_of(&output).contains("done\n"));
}

#[test]
fn too_many_stages_is_rejected() {
    let line = vec!["true"; 11].join(" | ");
    let output = run_script(&format!("{line}\n"));
    assert!(stderr_of(&output).contains("too many pipeline stages (max 10)"));
}

#[test]
fn version_flag() {
    let output = kanav().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("kanav "));
}
