//! Schema checks over the catalog documents.
use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use stitchwork_game::{ResourceSource, SchemaViolation, check_document};

/// Outcome of checking one document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub document: String,
    pub violations: Vec<SchemaViolation>,
}

impl DocumentReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn validate_documents<S>(source: &S, documents: &[String]) -> Vec<DocumentReport>
where
    S: ResourceSource + ?Sized,
{
    documents
        .iter()
        .map(|document| {
            let violations = check_document(source, document);
            log::debug!("{document}: {} violation(s)", violations.len());
            DocumentReport {
                document: document.clone(),
                violations,
            }
        })
        .collect()
}

pub fn write_validation_report(
    out: &mut dyn Write,
    reports: &[DocumentReport],
    verbose: bool,
) -> Result<()> {
    for report in reports {
        if report.passed() {
            writeln!(
                out,
                "✅ {} Validated!",
                format!("{}.jsonc", report.document).green()
            )?;
            continue;
        }
        writeln!(
            out,
            "❌ {} Invalid! ({} problem(s))",
            format!("{}.jsonc", report.document).red(),
            report.violations.len()
        )?;
        let shown = if verbose {
            report.violations.len()
        } else {
            report.violations.len().min(10)
        };
        for violation in &report.violations[..shown] {
            writeln!(out, "   • {violation}")?;
        }
        if shown < report.violations.len() {
            writeln!(
                out,
                "   … {} more (use --verbose to list all)",
                report.violations.len() - shown
            )?;
        }
    }
    Ok(())
}
