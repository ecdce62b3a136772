use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn mark_flips_provenance_and_keeps_the_value() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    test.seed_store_translations("fr", &[("greeting", "Bonjour", "automatic")])?;

    let output = test
        .command()
        .args(["mark", "--locale", "fr", "greeting"])
        .output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Marked 1 key(s) as manual in fr"));

    let table = test.read_file(".locsync/translations/fr.json")?;
    assert!(table.contains("\"manual\""));
    assert!(table.contains("Bonjour"));
    Ok(())
}

#[test]
fn mark_is_idempotent() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    test.seed_store_translations("fr", &[("greeting", "Salut", "manual")])?;

    let output = test
        .command()
        .args(["mark", "--locale", "fr", "greeting"])
        .output()?;
    assert!(output.status.success());

    let table = test.read_file(".locsync/translations/fr.json")?;
    assert!(table.contains("Salut"));
    assert!(table.contains("\"manual\""));
    Ok(())
}

#[test]
fn mark_unknown_key_fails_per_key() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    test.seed_store_translations("fr", &[("greeting", "Bonjour", "automatic")])?;

    let output = test
        .command()
        .args(["mark", "--locale", "fr", "greeting", "missing-key"])
        .output()?;
    // The existing key is still marked; the absent one fails the command.
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Marked 1 key(s) as manual in fr"));
    assert!(out.contains("\"missing-key\" has no translation in fr yet"));
    Ok(())
}

#[test]
fn mark_requires_at_least_one_key() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;

    let output = test.command().args(["mark", "--locale", "fr"]).output()?;
    assert!(!output.status.success());
    Ok(())
}
