//! End-to-end tests for the `pyintentions` binary.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const OPTIONAL_SOURCE: &str = "from typing import Optional\n\nx: Optional[int] = None\n";

fn bin() -> Result<Command> {
    Ok(Command::cargo_bin("pyintentions-bin")?)
}

#[test]
fn test_intentions_lists_catalogue() -> Result<()> {
    bin()?
        .arg("intentions")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-to-all"))
        .stdout(predicate::str::contains("optional-to-pipe"))
        .stdout(predicate::str::contains("docstring-to-comment"));
    Ok(())
}

#[test]
fn test_list_shows_offer_label() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, OPTIONAL_SOURCE)?;

    bin()?
        .arg("list")
        .arg(&py_file)
        .arg("--at")
        .arg("3:4")
        .assert()
        .success()
        .stdout(predicate::str::contains("optional-to-pipe"));
    Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, OPTIONAL_SOURCE)?;

    let output = bin()?
        .arg("list")
        .arg(&py_file)
        .arg("--at")
        .arg("3:4")
        .arg("--json")
        .output()?;
    assert!(output.status.success());

    let offers: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let ids: Vec<&str> = offers
        .as_array()
        .map(|entries| entries.iter().filter_map(|o| o["id"].as_str()).collect())
        .unwrap_or_default();
    assert!(ids.contains(&"optional-to-pipe"), "ids: {ids:?}");
    Ok(())
}

#[test]
fn test_list_nothing_available() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, "x = 1\n")?;

    bin()?
        .arg("list")
        .arg(&py_file)
        .arg("--offset")
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains("No intentions available"));
    Ok(())
}

#[test]
fn test_apply_prints_result() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, OPTIONAL_SOURCE)?;

    bin()?
        .arg("apply")
        .arg(&py_file)
        .arg("optional-to-pipe")
        .arg("--at")
        .arg("3:4")
        .assert()
        .success()
        .stdout(predicate::str::contains("x: int | None = None"))
        .stdout(predicate::str::contains("Optional").not());

    assert_eq!(fs::read_to_string(&py_file)?, OPTIONAL_SOURCE);
    Ok(())
}

#[test]
fn test_apply_write_updates_file() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, OPTIONAL_SOURCE)?;

    bin()?
        .arg("apply")
        .arg(&py_file)
        .arg("optional-to-pipe")
        .arg("--at")
        .arg("3:4")
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Applied"));

    let rewritten = fs::read_to_string(&py_file)?;
    assert!(rewritten.contains("x: int | None = None"));
    assert!(!rewritten.contains("Optional"));
    Ok(())
}

#[test]
fn test_apply_unavailable_intention_fails() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, "x = 1\n")?;

    bin()?
        .arg("apply")
        .arg(&py_file)
        .arg("comment-to-docstring")
        .arg("--at")
        .arg("1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not available"));

    assert_eq!(fs::read_to_string(&py_file)?, "x = 1\n");
    Ok(())
}

#[test]
fn test_apply_unknown_intention_fails() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, "x = 1\n")?;

    bin()?
        .arg("apply")
        .arg(&py_file)
        .arg("no-such-intention")
        .arg("--offset")
        .arg("0")
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_missing_file_fails() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("absent.py");

    bin()?
        .arg("list")
        .arg(&py_file)
        .arg("--at")
        .arg("1:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn test_cursor_outside_file_fails() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, "x = 1\n")?;

    bin()?
        .arg("list")
        .arg(&py_file)
        .arg("--at")
        .arg("40:1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("outside"));
    Ok(())
}

#[test]
fn test_pyproject_quote_style() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("pyproject.toml"),
        "[tool.pyintentions]\nquote_style = \"single\"\n",
    )?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, "def foo():\n    pass\n")?;

    bin()?
        .arg("apply")
        .arg(&py_file)
        .arg("add-to-all")
        .arg("--at")
        .arg("1:5")
        .assert()
        .success()
        .stdout(predicate::str::contains("__all__ = ['foo']"));
    Ok(())
}

#[test]
fn test_list_on_unclosed_all_does_not_crash() -> Result<()> {
    let temp = TempDir::new()?;
    let py_file = temp.path().join("module.py");
    fs::write(&py_file, "__all__ = [\"a\"\ndef foo(): pass\n")?;

    bin()?
        .arg("list")
        .arg(&py_file)
        .arg("--at")
        .arg("2:5")
        .assert()
        .success();
    Ok(())
}
