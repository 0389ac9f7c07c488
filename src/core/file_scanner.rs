use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::data::CommentStyleTable;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered file paths, sorted and deduplicated.
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

/// Compiled ignore list: literal path prefixes plus glob patterns.
struct IgnoreSet {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &str, ignore_patterns: &[String]) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in ignore_patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
                }
            } else {
                // Literal path mode: prefix match against the joined path
                literal_paths.push(Path::new(base_dir).join(p));
            }
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.literal_paths.iter().any(|p| path.starts_with(p)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Discover source files under `base_dir`.
///
/// `includes` narrows the scan to directories (literal or glob) relative to `base_dir`;
/// empty means the whole tree. Only files whose language the table knows are kept.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    table: &CommentStyleTable,
) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, ignore_patterns);

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![Path::new(base_dir).to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                // Glob mode: expand pattern to matching directories
                let full_pattern = Path::new(base_dir).join(inc);
                let pattern_str = full_pattern.to_string_lossy();
                match glob(&pattern_str) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|e| e.is_dir())),
                    Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
                }
            } else {
                let path = Path::new(base_dir).join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn!(path = %path.display(), "include path does not exist");
                }
            }
        }
        paths
    };

    let mut result = ScanResult::default();
    for dir in dirs_to_scan {
        walk_dir(&dir, &ignores, table, &mut result);
    }
    result
}

/// Resolve explicit command-line paths.
///
/// Files are always kept, whatever their extension; directories are walked with the
/// same rules as [`scan_files`]. Paths are taken relative to `base_dir`.
pub fn scan_paths(
    base_dir: &str,
    paths: &[String],
    ignore_patterns: &[String],
    table: &CommentStyleTable,
) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, ignore_patterns);
    let mut result = ScanResult::default();

    for p in paths {
        let path = Path::new(base_dir).join(p);
        if path.is_file() {
            result.files.insert(path.to_string_lossy().into_owned());
        } else if path.is_dir() {
            walk_dir(&path, &ignores, table, &mut result);
        } else {
            warn!(path = %path.display(), "path does not exist");
            result.skipped_count += 1;
        }
    }

    result
}

fn walk_dir(dir: &Path, ignores: &IgnoreSet, table: &CommentStyleTable, result: &mut ScanResult) {
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                warn!(error = %e, "cannot access path");
                continue;
            }
        };
        let path = entry.path();

        if ignores.is_ignored(path) {
            continue;
        }

        if entry.file_type().is_file() && is_scannable_file(path, table) {
            result.files.insert(path.to_string_lossy().into_owned());
        }
    }
    debug!(dir = %dir.display(), files = result.files.len(), "walked directory");
}

fn is_scannable_file(path: &Path, table: &CommentStyleTable) -> bool {
    table.language_for_path(path).is_some()
}
