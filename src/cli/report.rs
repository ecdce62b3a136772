//! Report formatting and printing for CLI output.
//!
//! Separate from the engine so sync results can be rendered (and tested)
//! without going through stdout.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::status::StatusRow;
use crate::config::CONFIG_FILE_NAME;
use crate::sync::SyncReport;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_no_changes(total: usize) {
    print_no_changes_to(total, &mut io::stdout().lock());
}

pub fn print_no_changes_to<W: Write>(total: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no changes, nothing to translate",
            total,
            if total == 1 { "phrase" } else { "phrases" }
        )
        .green()
    );
}

pub fn print_sync_report(report: &SyncReport, verbose: bool) {
    print_sync_report_to(report, verbose, &mut io::stdout().lock());
}

pub fn print_sync_report_to<W: Write>(report: &SyncReport, verbose: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} source {}",
        "Diffed".bold(),
        report.diffed,
        if report.diffed == 1 {
            "phrase"
        } else {
            "phrases"
        }
    );

    for locale in &report.locales {
        if let Some(error) = &locale.error {
            let _ = writeln!(
                writer,
                "{} {}: abandoned ({})",
                FAILURE_MARK.red(),
                locale.locale.bold(),
                error
            );
            continue;
        }

        let mark = if locale.failed > 0 {
            FAILURE_MARK.red()
        } else {
            SUCCESS_MARK.green()
        };
        let _ = writeln!(
            writer,
            "{} {}: {} translated, {} manual kept, {} failed",
            mark,
            locale.locale.bold(),
            locale.translated,
            locale.skipped_manual,
            locale.failed
        );

        if locale.passthrough > 0 && verbose {
            let _ = writeln!(
                writer,
                "  {} {} translation(s) came back identical to the source text",
                "warning:".bold().yellow(),
                locale.passthrough
            );
        }
    }

    let total_failed: usize = report.locales.iter().map(|l| l.failed).sum();
    if total_failed > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} key(s) failed; they will be retried on the next run",
            FAILURE_MARK.red(),
            total_failed
        );
    }
}

pub fn print_status(phrase_count: usize, rows: &[StatusRow]) {
    print_status_to(phrase_count, rows, &mut io::stdout().lock());
}

pub fn print_status_to<W: Write>(phrase_count: usize, rows: &[StatusRow], writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} source {}",
        phrase_count.to_string().bold(),
        if phrase_count == 1 {
            "phrase"
        } else {
            "phrases"
        }
    );
    for row in rows {
        let _ = writeln!(
            writer,
            "  {}: {} translated ({} manual), {} pending failure(s)",
            row.locale.bold(),
            row.translated,
            row.manual,
            row.failed
        );
    }
}

pub fn print_mark_missing(key: &str, locale: &str) {
    println!(
        "{} \"{}\" has no translation in {} yet; sync it first",
        FAILURE_MARK.red(),
        key,
        locale
    );
}

pub fn print_mark_summary(marked: usize, missing: usize, locale: &str) {
    if marked > 0 {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Marked {} key(s) as manual in {}", marked, locale).green()
        );
    }
    if missing > 0 {
        println!("{} key(s) could not be marked.", missing);
    }
}

pub fn print_init_created() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::LocaleReport;

    fn strip_ansi(s: &str) -> String {
        // Simple ANSI escape code stripper for testing
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn locale_report(locale: &str) -> LocaleReport {
        LocaleReport {
            locale: locale.to_string(),
            translated: 3,
            skipped_manual: 1,
            failed: 0,
            passthrough: 0,
            error: None,
        }
    }

    #[test]
    fn test_print_no_changes() {
        let mut output = Vec::new();
        print_no_changes_to(12, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(stripped.contains("12 source phrases"));
        assert!(stripped.contains("no changes"));
    }

    #[test]
    fn test_sync_report_per_locale_lines() {
        let report = SyncReport {
            diffed: 5,
            locales: vec![locale_report("fr"), locale_report("de")],
        };

        let mut output = Vec::new();
        print_sync_report_to(&report, false, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("Diffed 5 source phrases"));
        assert!(stripped.contains("fr: 3 translated, 1 manual kept, 0 failed"));
        assert!(stripped.contains("de: 3 translated, 1 manual kept, 0 failed"));
        assert!(!stripped.contains("retried"));
    }

    #[test]
    fn test_sync_report_failures_summarized() {
        let mut failing = locale_report("fr");
        failing.failed = 2;
        let report = SyncReport {
            diffed: 5,
            locales: vec![failing],
        };

        let mut output = Vec::new();
        print_sync_report_to(&report, false, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("2 failed"));
        assert!(stripped.contains("2 key(s) failed"));
        assert!(stripped.contains("retried on the next run"));
    }

    #[test]
    fn test_sync_report_abandoned_locale() {
        let mut abandoned = locale_report("de");
        abandoned.error = Some("failed to read store".to_string());
        let report = SyncReport {
            diffed: 1,
            locales: vec![abandoned],
        };

        let mut output = Vec::new();
        print_sync_report_to(&report, false, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("de: abandoned (failed to read store)"));
    }

    #[test]
    fn test_sync_report_passthrough_only_when_verbose() {
        let mut with_passthrough = locale_report("fr");
        with_passthrough.passthrough = 1;
        let report = SyncReport {
            diffed: 1,
            locales: vec![with_passthrough],
        };

        let mut quiet = Vec::new();
        print_sync_report_to(&report, false, &mut quiet);
        assert!(!String::from_utf8(quiet).unwrap().contains("identical"));

        let mut verbose = Vec::new();
        print_sync_report_to(&report, true, &mut verbose);
        assert!(String::from_utf8(verbose).unwrap().contains("identical"));
    }

    #[test]
    fn test_print_status() {
        let rows = vec![StatusRow {
            locale: "fr".to_string(),
            translated: 10,
            manual: 2,
            failed: 1,
        }];

        let mut output = Vec::new();
        print_status_to(25, &rows, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(stripped.contains("25 source phrases"));
        assert!(stripped.contains("fr: 10 translated (2 manual), 1 pending failure(s)"));
    }
}
