//! Issue types surfaced to the user alongside extracted annotations.
//!
//! Malformed-block warnings come straight from the extractor; the others are raised by
//! the scan layer. All of them dispatch the [`Report`] trait through the [`Issue`] enum.

use enum_dispatch::enum_dispatch;

use crate::core::data::{SourceFile, Warning, WarningKind};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnterminatedBlock,
    StrayCloser,
    EmptyBlock,
    UnresolvedLanguage,
    ReadError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnterminatedBlock => write!(f, "unterminated-block"),
            Rule::StrayCloser => write!(f, "stray-closer"),
            Rule::EmptyBlock => write!(f, "empty-block"),
            Rule::UnresolvedLanguage => write!(f, "unresolved-language"),
            Rule::ReadError => write!(f, "read-error"),
        }
    }
}

/// A line in a source file, with its text for context display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLocation {
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    pub source_line: String,
}

impl IssueLocation {
    pub fn new(file_path: impl Into<String>, line: usize, source_line: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            source_line: source_line.into(),
        }
    }
}

// ============================================================
// Issue Types - Malformed Blocks
// ============================================================

/// A block reached code or end of file before its closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedBlockIssue {
    /// Opening line of the block.
    pub location: IssueLocation,
}

impl UnterminatedBlockIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnterminatedBlock
    }
}

/// A `}` or `TODOS.END` with no open block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrayCloserIssue {
    pub location: IssueLocation,
}

impl StrayCloserIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::StrayCloser
    }
}

/// A block closed with nothing inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyBlockIssue {
    pub location: IssueLocation,
}

impl EmptyBlockIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::EmptyBlock
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File language has no comment style; fallback leaders were used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedLanguageIssue {
    pub file_path: String,
    pub language: String,
}

impl UnresolvedLanguageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnresolvedLanguage
    }
}

/// File could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ReadErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ReadError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while scanning.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnterminatedBlock(UnterminatedBlockIssue),
    StrayCloser(StrayCloserIssue),
    EmptyBlock(EmptyBlockIssue),
    UnresolvedLanguage(UnresolvedLanguageIssue),
    ReadError(ReadErrorIssue),
}

impl Issue {
    /// Convert an extractor warning, borrowing the offending line from `file`.
    pub fn from_warning(warning: &Warning, file: &SourceFile) -> Self {
        let location = IssueLocation::new(
            warning.file.as_str(),
            warning.line,
            file.line(warning.line).unwrap_or_default(),
        );
        match warning.kind {
            WarningKind::UnterminatedBlock => UnterminatedBlockIssue { location }.into(),
            WarningKind::StrayCloser => StrayCloserIssue { location }.into(),
            WarningKind::EmptyBlock => EmptyBlockIssue { location }.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnterminatedBlock(_) => UnterminatedBlockIssue::severity(),
            Issue::StrayCloser(_) => StrayCloserIssue::severity(),
            Issue::EmptyBlock(_) => EmptyBlockIssue::severity(),
            Issue::UnresolvedLanguage(_) => UnresolvedLanguageIssue::severity(),
            Issue::ReadError(_) => ReadErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::UnterminatedBlock(_) => UnterminatedBlockIssue::rule(),
            Issue::StrayCloser(_) => StrayCloserIssue::rule(),
            Issue::EmptyBlock(_) => EmptyBlockIssue::rule(),
            Issue::UnresolvedLanguage(_) => UnresolvedLanguageIssue::rule(),
            Issue::ReadError(_) => ReadErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A specific line, shown with its source text.
    Line(&'a IssueLocation),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for UnterminatedBlockIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.location)
    }

    fn message(&self) -> String {
        "block is not terminated".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("close the block with `}` or `TODOS.END` before the next code line")
    }

    fn details(&self) -> Option<String> {
        Some("the lines seen so far were still reported".to_string())
    }
}

impl Report for StrayCloserIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.location)
    }

    fn message(&self) -> String {
        "closer without a matching opener".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("only `TODO: {` opens a brace block")
    }
}

impl Report for EmptyBlockIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.location)
    }

    fn message(&self) -> String {
        "block has no content".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UnresolvedLanguageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("no comment style for language `{}`", self.language)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add the language to `languages` in .todoctlrc.json")
    }

    fn details(&self) -> Option<String> {
        Some("scanned with the fallback leaders `//` and `#`".to_string())
    }
}

impl Report for ReadErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Get file path for sorting.
    pub fn file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Line(loc) => &loc.file_path,
            ReportLocation::File { path } => path,
        }
    }

    /// Get line number for sorting. File-level issues sort first.
    pub fn line(&self) -> Option<usize> {
        match self.location() {
            ReportLocation::Line(loc) => Some(loc.line),
            ReportLocation::File { .. } => None,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, rule, message
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.line().cmp(&other.line()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::issues::*;

    fn file() -> SourceFile {
        SourceFile::new("src/app.js", "javascript", "const a = 1;\n// }\n// TODOS.START")
    }

    #[test]
    fn test_from_warning_carries_source_line() {
        let warning = Warning::new(WarningKind::StrayCloser, "src/app.js", 2);
        let issue = Issue::from_warning(&warning, &file());

        assert_eq!(
            issue,
            Issue::StrayCloser(StrayCloserIssue {
                location: IssueLocation::new("src/app.js", 2, "// }"),
            })
        );
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.rule().to_string(), "stray-closer");
    }

    #[test]
    fn test_from_warning_maps_every_kind() {
        let file = file();
        let rules: Vec<Rule> = [
            WarningKind::UnterminatedBlock,
            WarningKind::StrayCloser,
            WarningKind::EmptyBlock,
        ]
        .into_iter()
        .map(|kind| Issue::from_warning(&Warning::new(kind, "src/app.js", 3), &file).rule())
        .collect();

        assert_eq!(
            rules,
            vec![Rule::UnterminatedBlock, Rule::StrayCloser, Rule::EmptyBlock]
        );
    }

    #[test]
    fn test_read_error_is_error() {
        let issue: Issue = ReadErrorIssue {
            file_path: "bin.dat".to_string(),
            error: "stream did not contain valid UTF-8".to_string(),
        }
        .into();

        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.message(), "stream did not contain valid UTF-8");
        assert_eq!(issue.line(), None);
    }

    #[test]
    fn test_unresolved_language_message() {
        let issue: Issue = UnresolvedLanguageIssue {
            file_path: "NOTES".to_string(),
            language: "unknown".to_string(),
        }
        .into();

        assert_eq!(issue.message(), "no comment style for language `unknown`");
        assert!(issue.hint().is_some());
    }

    #[test]
    fn test_issue_ordering() {
        let mut issues: Vec<Issue> = vec![
            StrayCloserIssue {
                location: IssueLocation::new("b.js", 3, "// }"),
            }
            .into(),
            UnterminatedBlockIssue {
                location: IssueLocation::new("a.js", 9, "// TODO: {"),
            }
            .into(),
            UnresolvedLanguageIssue {
                file_path: "b.js".to_string(),
                language: "x".to_string(),
            }
            .into(),
            EmptyBlockIssue {
                location: IssueLocation::new("a.js", 2, "// TODOS.START"),
            }
            .into(),
        ];
        issues.sort();

        let order: Vec<(&str, Option<usize>)> =
            issues.iter().map(|i| (i.file_path(), i.line())).collect();
        assert_eq!(
            order,
            vec![
                ("a.js", Some(2)),
                ("a.js", Some(9)),
                ("b.js", None),
                ("b.js", Some(3)),
            ]
        );
    }
}
