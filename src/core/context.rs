use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    cli::args::ScanArgs,
    config::{Config, load_config},
    core::{
        data::{CommentStyleTable, SourceFile},
        extract::{Extraction, extract_with_table},
        file_scanner::{scan_files, scan_paths},
    },
    issues::{Issue, ReadErrorIssue, UnresolvedLanguageIssue},
};

/// Extraction result for one file, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileExtraction {
    pub path: String,
    pub language: String,
    #[serde(flatten)]
    pub extraction: Extraction,
    /// Warnings and fallbacks of this file, as reportable issues.
    #[serde(skip)]
    pub issues: Vec<Issue>,
}

/// Merged result of one scan, sorted by path.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub files: Vec<FileExtraction>,
    pub read_errors: Vec<ReadErrorIssue>,
}

impl ScanOutcome {
    /// All issues across files, sorted for reporting.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .files
            .iter()
            .flat_map(|f| f.issues.iter().cloned())
            .chain(self.read_errors.iter().cloned().map(Issue::from))
            .collect();
        issues.sort();
        issues
    }

    pub fn annotation_count(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.extraction.annotations.len())
            .sum()
    }
}

/// Scan context orchestrating discovery and extraction.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--source-root`, explicit paths)
/// 2. `.todoctlrc.json` config file
/// 3. Built-in defaults
pub struct ScanContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory the scan is rooted at.
    pub root_dir: PathBuf,

    /// All files to extract, sorted.
    pub files: BTreeSet<String>,

    /// Built-in languages plus the config's `languages` and `extensions`.
    pub table: CommentStyleTable,
}

impl ScanContext {
    /// Create a new `ScanContext` from command line arguments.
    ///
    /// This constructor:
    /// 1. Loads configuration from the source root (or the current directory)
    /// 2. Applies CLI overrides
    /// 3. Builds the comment style table
    /// 4. Discovers the files to scan
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid.
    pub fn new(args: &ScanArgs) -> Result<Self> {
        let config_dir = args
            .common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&config_dir)?;
        if !config_result.from_file {
            debug!("no config file found, using default configuration");
        }
        let mut config = config_result.config;

        if let Some(source_root) = &args.common.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }

        let table = config.comment_style_table();
        let root_dir = PathBuf::from(&config.source_root);

        let scan_result = if args.paths.is_empty() {
            let base = root_dir
                .to_str()
                .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;
            scan_files(base, &config.includes, &config.ignores, &table)
        } else {
            scan_paths(".", &args.paths, &config.ignores, &table)
        };

        if scan_result.skipped_count > 0 {
            warn!(
                count = scan_result.skipped_count,
                "paths skipped due to access errors"
            );
        }
        debug!(files = scan_result.files.len(), "discovered files");

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            table,
        })
    }

    /// Read and extract every file in parallel, then merge by path.
    pub fn run(&self) -> ScanOutcome {
        let results: Vec<Result<FileExtraction, ReadErrorIssue>> = self
            .files
            .par_iter()
            .map(|path| self.extract_file(path))
            .collect();

        let mut outcome = ScanOutcome::default();
        for result in results {
            match result {
                Ok(file) => outcome.files.push(file),
                Err(error) => outcome.read_errors.push(error),
            }
        }

        // Already in path order from the sorted file set; keep it explicit.
        outcome.files.sort_by(|a, b| a.path.cmp(&b.path));
        outcome
    }

    fn extract_file(&self, path: &str) -> Result<FileExtraction, ReadErrorIssue> {
        let text = read_source(Path::new(path)).map_err(|e| {
            warn!(file = path, error = %e, "cannot read file");
            ReadErrorIssue {
                file_path: path.to_string(),
                error: format!("{:#}", e),
            }
        })?;

        let file = SourceFile::detect(path, &text, &self.table);
        let extraction = extract_with_table(&file, &self.table);

        let mut issues: Vec<Issue> = extraction
            .warnings
            .iter()
            .map(|w| Issue::from_warning(w, &file))
            .collect();
        if extraction.style_fallback {
            issues.push(
                UnresolvedLanguageIssue {
                    file_path: path.to_string(),
                    language: file.language().to_string(),
                }
                .into(),
            );
        }

        Ok(FileExtraction {
            path: path.to_string(),
            language: file.language().to_string(),
            extraction,
            issues,
        })
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::cli::args::CommonArgs;
    use crate::issues::Rule;

    fn scan_args(root: &Path, paths: &[&str]) -> ScanArgs {
        ScanArgs {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            common: CommonArgs {
                source_root: Some(root.to_path_buf()),
                verbose: false,
            },
            ..ScanArgs::default()
        }
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("b.py"), "# TODO: b\nx = 1\n").unwrap();
        fs::write(dir.path().join("a.js"), "// FIXME: a\n// }\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "TODO: ignored").unwrap();

        let ctx = ScanContext::new(&scan_args(dir.path(), &[])).unwrap();
        assert_eq!(ctx.files.len(), 2);

        let outcome = ctx.run();
        let paths: Vec<&str> = outcome.files.iter().map(|f| f.path.as_str()).collect();
        assert!(paths[0].ends_with("a.js"));
        assert!(paths[1].ends_with("b.py"));
        assert_eq!(outcome.annotation_count(), 2);

        let issues = outcome.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule(), Rule::StrayCloser);
        assert!(outcome.read_errors.is_empty());
    }

    #[test]
    fn test_explicit_unknown_file_uses_fallback() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let notes = dir.path().join("NOTES");
        fs::write(&notes, "// TODO: a\n# TODO: b\n").unwrap();

        let ctx = ScanContext::new(&scan_args(dir.path(), &[notes.to_str().unwrap()])).unwrap();
        let outcome = ctx.run();

        assert_eq!(outcome.files.len(), 1);
        assert_eq!(outcome.files[0].language, "unknown");
        assert!(outcome.files[0].extraction.style_fallback);
        assert_eq!(outcome.annotation_count(), 2);

        let rules: Vec<Rule> = outcome.issues().iter().map(Issue::rule).collect();
        assert_eq!(rules, vec![Rule::UnresolvedLanguage]);
    }

    #[test]
    fn test_unreadable_file_becomes_read_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("good.rb"), "# TODO: fine\n").unwrap();
        fs::write(dir.path().join("bad.rb"), [0x23, 0x20, 0xff, 0xfe, 0x0a]).unwrap();

        let ctx = ScanContext::new(&scan_args(dir.path(), &[])).unwrap();
        let outcome = ctx.run();

        assert_eq!(outcome.files.len(), 1);
        assert_eq!(outcome.read_errors.len(), 1);
        assert!(outcome.read_errors[0].file_path.ends_with("bad.rb"));
        assert_eq!(outcome.annotation_count(), 1);
    }

    #[test]
    fn test_config_languages_apply() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(
            dir.path().join(".todoctlrc.json"),
            r#"{
                "extensions": { "nut": "squirrel" },
                "languages": { "squirrel": { "leaders": ["//"] } }
            }"#,
        )
        .unwrap();
        fs::write(dir.path().join("game.nut"), "// XXX: hack\nlocal x = 1;\n").unwrap();

        let ctx = ScanContext::new(&scan_args(dir.path(), &[])).unwrap();
        let outcome = ctx.run();

        assert_eq!(outcome.files.len(), 1);
        assert_eq!(outcome.files[0].language, "squirrel");
        assert!(!outcome.files[0].extraction.style_fallback);
        assert_eq!(outcome.annotation_count(), 1);
        assert!(outcome.issues().is_empty());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(
            dir.path().join(".todoctlrc.json"),
            r#"{ "ignores": ["[oops"] }"#,
        )
        .unwrap();

        assert!(ScanContext::new(&scan_args(dir.path(), &[])).is_err());
    }
}
