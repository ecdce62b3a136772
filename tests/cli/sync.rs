use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn sync_without_configured_locales_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", "{}")?;
    test.write_file("phrases.json", r#"[{"greeting": "Hello"}]"#)?;

    let output = test.command().arg("sync").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no target locales configured"));
    Ok(())
}

#[test]
fn sync_without_source_catalog_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", r#"{ "locales": ["fr"] }"#)?;

    let output = test.command().arg("sync").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("source catalog"));
    Ok(())
}

#[test]
fn sync_with_unknown_locale_flag_fails() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;

    let output = test
        .command()
        .args(["sync", "--locale", "xx"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("not in the configured locales"));
    Ok(())
}

#[test]
fn sync_with_nothing_changed_needs_no_credentials() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    // The store already records both phrases at their current values and no
    // pending failures, so the run never reaches the translator.
    test.seed_store_source(&[("greeting", "Hello"), ("farewell", "Bye")])?;

    let output = test.command().arg("sync").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("no changes"));
    Ok(())
}

#[test]
fn sync_with_pending_work_requires_a_key() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;

    let output = test.command().arg("sync").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("API key"));
    Ok(())
}

#[test]
fn force_flag_needs_credentials_even_when_synced() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    test.seed_store_source(&[("greeting", "Hello"), ("farewell", "Bye")])?;

    let output = test.command().args(["sync", "--force"]).output()?;
    // Forced runs always have work, so the missing key is now fatal.
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("API key"));
    Ok(())
}

#[test]
fn recorded_failures_count_as_pending_work() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    test.seed_store_source(&[("greeting", "Hello"), ("farewell", "Bye")])?;
    // A previous run failed "greeting" for fr; the next run must retry it
    // even though the diff is empty.
    test.write_file(".locsync/failed/fr.json", r#"["greeting"]"#)?;

    let output = test.command().arg("sync").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("API key"));
    Ok(())
}
