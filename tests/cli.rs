use std::fs;
use std::path::Path;
use std::process::Command;

const LOG: &str = "Default schedule:\n:::0<->0\n1<->1\n2<->0\n\n\
:::Guided schedule, chunk=4:\n:::0<->1\n1<->1\n2<->0\n";

fn run_viz(args: &[&str], cwd: &Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_iterdist-viz"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run iterdist-viz");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

#[test]
fn test_renders_with_explicit_paths() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("run.log");
    let out = dir.path().join("out");
    fs::write(&log, LOG).unwrap();

    let (stdout, stderr, code) = run_viz(
        &[
            "--log_file",
            log.to_str().unwrap(),
            "--output_dir",
            out.to_str().unwrap(),
        ],
        dir.path(),
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Wrote 2 images"));
    assert!(out.join("distr_Default_chunk=None.png").exists());
    assert!(out.join("distr_Guided_chunk=4.png").exists());
    assert!(!log.exists(), "log should be removed after a successful run");
}

#[test]
fn test_defaults_resolve_against_cwd() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logs.txt"), LOG).unwrap();

    let (_stdout, stderr, code) = run_viz(&[], dir.path());
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(
        dir.path()
            .join("distributions")
            .join("distr_Default_chunk=None.png")
            .exists()
    );
}

#[test]
fn test_missing_log_fails() {
    let dir = tempfile::tempdir().unwrap();

    let (_stdout, stderr, code) = run_viz(&["--log_file", "absent.txt"], dir.path());
    assert_ne!(code, 0);
    assert!(stderr.contains("log file does not exist"), "stderr: {}", stderr);
    assert!(stderr.contains("absent.txt"));
    assert!(!dir.path().join("distributions").exists());
}

#[test]
fn test_unknown_flag_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_stdout, _stderr, code) = run_viz(&["--keep-log"], dir.path());
    assert_ne!(code, 0);
}
