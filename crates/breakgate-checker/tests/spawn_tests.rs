#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use breakgate_checker::{
    AgainstRef, BufChecker, CheckRequest, Checker, CheckerError, OutputChunk, Stream,
};
use tempfile::TempDir;

/// Helper: write an executable shell script standing in for buf.
fn fake_checker(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("buf");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn request(root: &Path) -> CheckRequest {
    CheckRequest::new(
        AgainstRef::at_commit(root, "c0ffee"),
        root.join("buf.yaml"),
        root.to_path_buf(),
    )
}

#[tokio::test]
async fn test_passes_arguments_through() {
    let dir = TempDir::new().unwrap();
    let bin = fake_checker(dir.path(), r#"for a in "$@"; do echo "$a"; done"#);

    let output = BufChecker::with_binary_path(bin)
        .check(&request(dir.path()))
        .await
        .unwrap();

    let expected = format!(
        "breaking\n--against\n{}/.git#ref=c0ffee\n--config\n{}/buf.yaml\n",
        dir.path().display(),
        dir.path().display()
    );
    assert_eq!(output.bytes(Stream::Stdout), expected.as_bytes());
    assert!(output.success());
}

#[tokio::test]
async fn test_runs_in_working_dir() {
    let dir = TempDir::new().unwrap();
    let bin = fake_checker(dir.path(), "pwd");

    let output = BufChecker::with_binary_path(bin)
        .check(&request(dir.path()))
        .await
        .unwrap();

    let stdout = String::from_utf8(output.bytes(Stream::Stdout)).unwrap();
    let reported = PathBuf::from(stdout.trim());
    assert_eq!(
        reported.canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[tokio::test]
async fn test_nonzero_exit_is_a_verdict_not_an_error() {
    let dir = TempDir::new().unwrap();
    let bin = fake_checker(
        dir.path(),
        "echo 'api/v1/a.proto:3:1:Field \"1\" on message \"A\" was deleted.'\necho 'Failure: 1 breaking change' >&2\nexit 100",
    );

    let output = BufChecker::with_binary_path(bin)
        .check(&request(dir.path()))
        .await
        .unwrap();

    assert_eq!(output.exit_code, 100);
    assert_eq!(
        output.bytes(Stream::Stdout),
        "api/v1/a.proto:3:1:Field \"1\" on message \"A\" was deleted.\n".as_bytes()
    );
    assert_eq!(
        output.bytes(Stream::Stderr),
        "Failure: 1 breaking change\n".as_bytes()
    );
}

#[tokio::test]
async fn test_non_utf8_output_is_kept_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let bin = fake_checker(dir.path(), "printf 'a.proto:\\377\\376 deleted\\n'\nexit 100");

    let output = BufChecker::with_binary_path(bin)
        .check(&request(dir.path()))
        .await
        .unwrap();

    assert_eq!(output.exit_code, 100);
    assert_eq!(output.bytes(Stream::Stdout), b"a.proto:\xff\xfe deleted\n");
}

#[tokio::test]
async fn test_streams_keep_their_interleaving() {
    let dir = TempDir::new().unwrap();
    let bin = fake_checker(
        dir.path(),
        "printf 'one\\n'\nsleep 0.2\nprintf 'two\\n' >&2\nsleep 0.2\nprintf 'three\\n'\nexit 100",
    );

    let output = BufChecker::with_binary_path(bin)
        .check(&request(dir.path()))
        .await
        .unwrap();

    assert_eq!(
        output.chunks,
        vec![
            OutputChunk::new(Stream::Stdout, &b"one\n"[..]),
            OutputChunk::new(Stream::Stderr, &b"two\n"[..]),
            OutputChunk::new(Stream::Stdout, &b"three\n"[..]),
        ]
    );
}

#[tokio::test]
async fn test_missing_binary() {
    let dir = TempDir::new().unwrap();

    let err = BufChecker::with_binary_path(dir.path().join("no-such-buf"))
        .check(&request(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckerError::NotFound(_)));
}

#[tokio::test]
async fn test_killed_checker_is_an_error() {
    let dir = TempDir::new().unwrap();
    let bin = fake_checker(dir.path(), "kill -9 $$");

    let err = BufChecker::with_binary_path(bin)
        .check(&request(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckerError::Terminated));
}
