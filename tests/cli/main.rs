use std::{fs, path::PathBuf, process::Command};

use anyhow::{Context, Result};
use tempfile::TempDir;

mod init;
mod mark;
mod status;
mod sync;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery from escaping the sandbox.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with a config file and a one-phrase source catalog.
    pub fn with_project(locales: &[&str]) -> Result<Self> {
        let test = Self::new()?;
        let locales = locales
            .iter()
            .map(|l| format!("\"{}\"", l))
            .collect::<Vec<_>>()
            .join(", ");
        test.write_file(
            ".locsyncrc.json",
            &format!("{{ \"locales\": [{}] }}", locales),
        )?;
        test.write_file(
            "phrases.json",
            r#"[{"greeting": "Hello"}, {"farewell": "Bye"}]"#,
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_locsync"));
        cmd.current_dir(&self.project_dir);
        cmd.env_remove("LOCSYNC_TRANSLATOR_KEY");
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Seed the store so the catalog looks already synced.
    pub fn seed_store_source(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let entries = pairs
            .iter()
            .map(|(k, v)| format!("  \"{}\": {{ \"value\": \"{}\", \"lastUpdated\": 1 }}", k, v))
            .collect::<Vec<_>>()
            .join(",\n");
        self.write_file(".locsync/source.json", &format!("{{\n{}\n}}\n", entries))
    }

    /// Seed one locale's translation table.
    pub fn seed_store_translations(
        &self,
        locale: &str,
        pairs: &[(&str, &str, &str)],
    ) -> Result<()> {
        let entries = pairs
            .iter()
            .map(|(k, v, provenance)| {
                format!(
                    "  \"{}\": {{ \"value\": \"{}\", \"provenance\": \"{}\", \"lastUpdated\": 1 }}",
                    k, v, provenance
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");
        self.write_file(
            &format!(".locsync/translations/{}.json", locale),
            &format!("{{\n{}\n}}\n", entries),
        )
    }
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
