use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const DECK: &str = "# Welcome\n\nIntro.\n\n---\n\n## Agenda\n\n- first\n- second\n";

#[test]
fn test_style_paragraph_to_stdout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.md");
    fs::write(&path, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("style")
        .arg(path.as_os_str())
        .args(["--slide", "0", "--trace", "1", "--style", "color: blue;"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<p style=\"color: blue;\">Intro.</p>"))
        .stdout(predicate::str::contains("## Agenda"));

    // stdout only; the file is untouched
    assert_eq!(fs::read_to_string(&path).unwrap(), DECK);
}

#[test]
fn test_style_then_unstyle_list_restores_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.md");
    let styled = dir.path().join("styled.md");
    let restored = dir.path().join("restored.md");
    fs::write(&path, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("style")
        .arg(path.as_os_str())
        .args(["--slide", "1", "--trace", "1", "--style", "color: red;"])
        .arg("-o")
        .arg(styled.as_os_str());
    cmd.assert().success();

    let styled_text = fs::read_to_string(&styled).unwrap();
    assert!(styled_text.contains("wrapper outer-wrapper ul-outer-wrapper"));
    assert!(styled_text.contains("style=\"color: red;\""));

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("unstyle")
        .arg(styled.as_os_str())
        .args(["--slide", "1", "--trace", "1"])
        .arg("-o")
        .arg(restored.as_os_str());
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&restored).unwrap(), DECK);
}

#[test]
fn test_outer_wrap_disabled_by_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.md");
    fs::write(&path, DECK).unwrap();
    let config_path = dir.path().join("slidemark.toml");
    fs::write(&config_path, "[style]\nouter_wrap_tags = [\"pre\"]\n").unwrap();

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("style")
        .arg(path.as_os_str())
        .args(["--slide", "1", "--trace", "1", "--style", "color: red;"])
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<ul style=\"color: red;\">"))
        .stdout(predicate::str::contains("outer-wrapper").not());
}

#[test]
fn test_unstyle_plain_element_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.md");
    fs::write(&path, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("unstyle")
        .arg(path.as_os_str())
        .args(["--slide", "0", "--trace", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a style wrapper"));
}

#[test]
fn test_invalid_trace() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.md");
    fs::write(&path, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("style")
        .arg(path.as_os_str())
        .args(["--slide", "0", "--trace", "one", "--style", "color: red;"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not a trace"));
}

#[test]
fn test_missing_element() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.md");
    fs::write(&path, DECK).unwrap();

    let mut cmd = cargo_bin_cmd!("slidemark");
    cmd.arg("style")
        .arg(path.as_os_str())
        .args(["--slide", "0", "--trace", "7", "--style", "color: red;"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No element at trace 7 on slide 0"));
}
