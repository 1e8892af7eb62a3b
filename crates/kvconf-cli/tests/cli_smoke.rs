use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use assert_cmd::Command;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", contents)?;
    Ok(tmp)
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .arg("--help")
        .assert()
        .success();
    Ok(())
}

#[test]
fn prints_entries_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = config_file("# empty\nkey1 = value1\nkey2=value2\n")?;
    let output = Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .arg(tmp.path())
        .output()?;
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout)?;
    let v: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(v, serde_json::json!({"key1": "value1", "key2": "value2"}));
    Ok(())
}

#[test]
fn reads_stdin_and_prints_lines() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .args(["--format", "lines"])
        .write_stdin("b=2\na =   one two\n")
        .assert()
        .success()
        .stdout("a = one two\nb = 2\n");
    Ok(())
}

#[test]
fn lines_accepts_carriage_return_before_end_of_input() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .args(["--format", "lines"])
        .write_stdin("a = 1\r\nk = v\r")
        .assert()
        .success()
        .stdout("a = 1\nk = v\n");
    Ok(())
}

#[test]
fn unicode_keys_are_opt_in() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .args(["--get", "größe"])
        .write_stdin("größe = 3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1, column 3"));
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .args(["--unicode-keys", "--get", "größe"])
        .write_stdin("größe = 3\n")
        .assert()
        .success()
        .stdout("3\n");
    Ok(())
}

#[test]
fn get_prints_single_value() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = config_file("host = example.org\nport = 8080")?;
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .args(["--get", "port"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout("8080\n");
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .args(["--get", "missing"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    Ok(())
}

#[test]
fn malformed_config_fails_with_position() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = config_file("ok = 1\n1key = v\n")?;
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2, column 1"));
    Ok(())
}

#[test]
fn missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    Command::new(assert_cmd::cargo::cargo_bin!("kvconf-cli"))
        .arg(dir.path().join("nope.conf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
    Ok(())
}
