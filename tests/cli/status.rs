use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn status_on_an_empty_project() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;

    let output = test.command().arg("status").output()?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("0 source phrases"));
    assert!(out.contains("fr: 0 translated (0 manual), 0 pending failure(s)"));
    Ok(())
}

#[test]
fn status_reports_per_locale_counts() -> Result<()> {
    let test = CliTest::with_project(&["fr", "de"])?;
    test.seed_store_source(&[("greeting", "Hello"), ("farewell", "Bye")])?;
    test.seed_store_translations(
        "fr",
        &[
            ("greeting", "Bonjour", "automatic"),
            ("farewell", "Salut", "manual"),
        ],
    )?;
    test.write_file(".locsync/failed/de.json", r#"["greeting"]"#)?;

    let output = test.command().arg("status").output()?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("2 source phrases"));
    assert!(out.contains("fr: 2 translated (1 manual), 0 pending failure(s)"));
    assert!(out.contains("de: 0 translated (0 manual), 1 pending failure(s)"));
    Ok(())
}

#[test]
fn status_includes_store_locales_missing_from_config() -> Result<()> {
    let test = CliTest::with_project(&["fr"])?;
    test.seed_store_translations("es", &[("greeting", "Hola", "automatic")])?;

    let output = test.command().arg("status").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("es: 1 translated"));
    Ok(())
}
