use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn init_creates_config_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .locsyncrc.json"));

    let content = test.read_file(".locsyncrc.json")?;
    assert!(content.contains("\"sourceLocale\": \"en\""));
    assert!(content.contains("\"batchSize\": 100"));
    Ok(())
}

#[test]
fn init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("already exists"));
    Ok(())
}

#[test]
fn no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
    Ok(())
}
