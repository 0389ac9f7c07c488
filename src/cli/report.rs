//! Report formatting and printing utilities.
//!
//! Annotations and issues are displayed in cargo-style format, or serialized as a
//! single JSON document. Separate from core logic so todoctl can be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{
    core::{
        FileExtraction,
        data::{Annotation, AnnotationKind, CommentStyleTable, MarkerKeyword},
    },
    issues::{Issue, Report, ReportLocation, Severity},
    utils::{pluralize, truncate_to_width},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Anchor lines wider than this are cut.
const MAX_CONTEXT_WIDTH: usize = 100;

/// Everything one scan reports.
pub struct ScanReport<'a> {
    pub files: &'a [FileExtraction],
    /// Sorted issues.
    pub issues: &'a [Issue],
    pub files_scanned: usize,
    /// Show the anchor code line under each annotation.
    pub show_context: bool,
}

impl ScanReport<'_> {
    fn annotation_count(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.extraction.annotations.len())
            .sum()
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.report_severity() == severity)
            .count()
    }
}

// ============================================================
// Text Output
// ============================================================

/// Print the report as text to stdout.
pub fn print_text(report: &ScanReport) {
    write_text(report, &mut io::stdout().lock());
}

/// Write the report as text to a custom writer.
pub fn write_text<W: Write>(report: &ScanReport, writer: &mut W) {
    let max_line_width = calculate_max_line_width(report);

    for file in report.files {
        for annotation in &file.extraction.annotations {
            print_annotation(&file.path, annotation, report.show_context, writer, max_line_width);
        }
    }

    for issue in report.issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(report, writer);
}

fn kind_label(kind: &AnnotationKind) -> ColoredString {
    let label = kind.label();
    match kind {
        AnnotationKind::Marker(MarkerKeyword::Todo) => label.bold().cyan(),
        AnnotationKind::Marker(MarkerKeyword::Fixme) => label.bold().yellow(),
        AnnotationKind::Marker(MarkerKeyword::Xxx) => label.bold().red(),
        AnnotationKind::BraceBlock | AnnotationKind::CollectionBlock => label.bold().magenta(),
    }
}

fn print_annotation<W: Write>(
    path: &str,
    annotation: &Annotation,
    show_context: bool,
    writer: &mut W,
    max_line_width: usize,
) {
    match annotation.inline_text() {
        Some(text) => {
            let _ = writeln!(writer, "{}: {}", kind_label(&annotation.kind), text);
            let _ = writeln!(
                writer,
                "{:>width$}{} {}:{}",
                "",
                "-->".blue(),
                path,
                annotation.start_line,
                width = max_line_width
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                kind_label(&annotation.kind),
                format!(
                    "({} {})",
                    annotation.body.len(),
                    pluralize(annotation.body.len(), "line", "lines")
                )
                .dimmed()
            );
            let _ = writeln!(
                writer,
                "{:>width$}{} {}:{}-{}",
                "",
                "-->".blue(),
                path,
                annotation.start_line,
                annotation.end_line,
                width = max_line_width
            );
            for body_line in &annotation.body {
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {}",
                    "",
                    "=".blue(),
                    body_line.text,
                    width = max_line_width
                );
            }
        }
    }

    if show_context && let Some(anchor) = &annotation.anchor {
        let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            anchor.line.to_string().blue(),
            "|".blue(),
            truncate_to_width(&anchor.text, MAX_CONTEXT_WIDTH),
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between entries
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Line(loc) => {
            let _ = writeln!(
                writer,
                "{:>width$}{} {}:{}",
                "",
                "-->".blue(),
                loc.file_path,
                loc.line,
                width = max_line_width
            );
            let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                loc.line.to_string().blue(),
                "|".blue(),
                truncate_to_width(&loc.source_line, MAX_CONTEXT_WIDTH),
                width = max_line_width
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(
                writer,
                "{:>width$}{} {}",
                "",
                "-->".blue(),
                path,
                width = max_line_width
            );
        }
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(report: &ScanReport, writer: &mut W) {
    let annotations = report.annotation_count();
    let files_with_annotations = report
        .files
        .iter()
        .filter(|f| !f.extraction.annotations.is_empty())
        .count();
    let scanned = format!(
        "{} {} scanned",
        report.files_scanned,
        pluralize(report.files_scanned, "file", "files")
    );

    if annotations == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No annotations found ({})", scanned).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} Found {} {} in {} {} ({})",
            SUCCESS_MARK.green(),
            annotations,
            pluralize(annotations, "annotation", "annotations"),
            files_with_annotations,
            pluralize(files_with_annotations, "file", "files"),
            scanned
        );
    }

    let total_errors = report.count_severity(Severity::Error);
    let total_warnings = report.count_severity(Severity::Warning);
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            pluralize(total_problems, "problem", "problems"),
            total_errors,
            pluralize(total_errors, "error", "errors").red(),
            total_warnings,
            pluralize(total_warnings, "warning", "warnings").yellow()
        );
    }
}

/// Width of the widest line number in any gutter, for alignment.
fn calculate_max_line_width(report: &ScanReport) -> usize {
    let anchor_lines = report
        .files
        .iter()
        .flat_map(|f| &f.extraction.annotations)
        .filter(|_| report.show_context)
        .filter_map(|a| a.anchor.as_ref().map(|anchor| anchor.line));
    let issue_lines = report.issues.iter().filter_map(Issue::line);

    anchor_lines
        .chain(issue_lines)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
        .max(2)
}

// ============================================================
// JSON Output
// ============================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    issues: Vec<JsonIssue>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    language: &'a str,
    annotations: &'a [Annotation],
}

#[derive(Serialize)]
struct JsonIssue {
    severity: String,
    rule: String,
    file: String,
    line: Option<usize>,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    files_scanned: usize,
    annotations: usize,
    errors: usize,
    warnings: usize,
}

/// Render the report as a pretty-printed JSON document.
///
/// Only files with at least one annotation are listed under `files`.
pub fn render_json(report: &ScanReport) -> Result<String> {
    let document = JsonReport {
        files: report
            .files
            .iter()
            .filter(|f| !f.extraction.annotations.is_empty())
            .map(|f| JsonFile {
                path: &f.path,
                language: &f.language,
                annotations: &f.extraction.annotations,
            })
            .collect(),
        issues: report
            .issues
            .iter()
            .map(|issue| JsonIssue {
                severity: issue.report_severity().to_string(),
                rule: issue.report_rule().to_string(),
                file: issue.file_path().to_string(),
                line: issue.line(),
                message: issue.message(),
            })
            .collect(),
        summary: JsonSummary {
            files_scanned: report.files_scanned,
            annotations: report.annotation_count(),
            errors: report.count_severity(Severity::Error),
            warnings: report.count_severity(Severity::Warning),
        },
    };

    let mut json =
        serde_json::to_string_pretty(&document).context("Failed to serialize report.")?;
    json.push('\n');
    Ok(json)
}

// ============================================================
// Languages
// ============================================================

/// Print the comment style table.
pub fn print_languages(table: &CommentStyleTable) {
    write_languages(table, &mut io::stdout().lock());
}

pub fn write_languages<W: Write>(table: &CommentStyleTable, writer: &mut W) {
    let languages = table.languages();
    let tag_width = languages.iter().map(|(tag, ..)| tag.len()).max().unwrap_or(0);

    for (tag, style, extensions) in languages {
        let mut markers: Vec<String> = style.leaders.clone();
        if let Some(block) = &style.block {
            markers.push(format!("{} {}", block.open, block.close));
        }
        let _ = writeln!(
            writer,
            "{}  {:<16} {}",
            format!("{:<width$}", tag, width = tag_width).bold(),
            markers.join("  "),
            extensions
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(" ")
                .dimmed()
        );
    }
}

// ============================================================
// Tests
// ============================================================
