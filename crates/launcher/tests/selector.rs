#![cfg(unix)]

use launcher::noop::NoopSelector;
use launcher::{CommandSelector, LauncherError, Opener, Selector, SystemOpener};
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;
use tempfile::tempdir;

fn candidates(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("{}.00\thttps://example.com/{i}\t[]\t{i}", n - i))
        .collect()
}

#[tokio::test]
async fn picks_the_line_the_child_prints() {
    let selector = CommandSelector::new("head", vec!["-n".into(), "1".into()]);
    let picked = selector.select(candidates(3)).await.unwrap();
    assert_eq!(picked.as_deref(), Some("3.00\thttps://example.com/0\t[]\t0"));
}

#[tokio::test]
async fn large_candidate_lists_do_not_deadlock() {
    // Far beyond a pipe buffer; `tail` only answers after reading everything.
    let selector = CommandSelector::new("tail", vec!["-n".into(), "1".into()])
        .with_timeout(Some(Duration::from_secs(30)));
    let picked = selector.select(candidates(50_000)).await.unwrap();
    assert_eq!(
        picked.as_deref(),
        Some("1.00\thttps://example.com/49999\t[]\t49999")
    );
}

#[tokio::test]
async fn early_exit_is_not_an_error() {
    let selector = CommandSelector::new("head", vec!["-n".into(), "1".into()]);
    let picked = selector.select(candidates(50_000)).await.unwrap();
    assert!(picked.is_some());
}

#[tokio::test]
async fn empty_output_means_aborted() {
    let selector = CommandSelector::new("true", vec![]);
    assert_eq!(selector.select(candidates(2)).await.unwrap(), None);
    assert_eq!(NoopSelector.select(candidates(2)).await.unwrap(), None);
}

#[tokio::test]
async fn missing_program_is_unavailable() {
    let selector = CommandSelector::new("linker-test-no-such-picker", vec![]);
    let err = selector.select(candidates(1)).await.unwrap_err();
    assert!(matches!(err, LauncherError::Unavailable { .. }));
}

#[tokio::test]
async fn slow_picker_times_out() {
    let selector = CommandSelector::new("sleep", vec!["5".into()])
        .with_timeout(Some(Duration::from_millis(200)));
    let err = selector.select(candidates(1)).await.unwrap_err();
    assert!(matches!(err, LauncherError::TimedOut { .. }));
}

#[test]
fn opener_is_fire_and_forget() {
    SystemOpener::new("true").open("https://example.com").unwrap();
    let err = SystemOpener::new("linker-test-no-such-opener")
        .open("https://example.com")
        .unwrap_err();
    assert!(matches!(err, LauncherError::Unavailable { .. }));
}

fn fake_tool(dir: &std::path::Path, name: &str, mode: u32) {
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
}

#[test]
fn detect_prefers_open_when_it_is_on_the_path() {
    let dir = tempdir().unwrap();
    fake_tool(dir.path(), "open", 0o755);
    fake_tool(dir.path(), "xdg-open", 0o755);
    let opener = SystemOpener::detect_in(Some(dir.path().as_os_str().to_owned()));
    assert_eq!(opener.program(), "open");
}

#[test]
fn detect_falls_back_to_xdg_open() {
    let empty = tempdir().unwrap();
    let opener = SystemOpener::detect_in(Some(empty.path().as_os_str().to_owned()));
    assert_eq!(opener.program(), "xdg-open");

    let dir = tempdir().unwrap();
    fake_tool(dir.path(), "open", 0o644);
    let opener = SystemOpener::detect_in(Some(dir.path().as_os_str().to_owned()));
    assert_eq!(opener.program(), "xdg-open");
}
