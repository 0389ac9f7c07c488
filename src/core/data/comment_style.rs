//! Comment styles and the language table.
//!
//! Every language tag maps to the comment leaders recognized at the start of a line,
//! and optionally to a pair of block comment delimiters. File extensions map to
//! language tags. Tags without an entry resolve to the fallback style (`//` and `#`).

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::LazyLock,
};

use serde::{Deserialize, Serialize};

/// Language tag assigned to files whose language cannot be determined.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Leaders used when a language tag has no registered style.
pub const FALLBACK_LEADERS: &[&str] = &["//", "#"];

/// Opening and closing delimiters of a block comment, e.g. `/*` and `*/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDelimiters {
    pub open: String,
    pub close: String,
}

/// How comments are written in one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentStyle {
    /// Line comment leaders in priority order. The first match wins.
    pub leaders: Vec<String>,
    /// Block comment delimiters, if the language has them.
    pub block: Option<BlockDelimiters>,
}

impl CommentStyle {
    /// Style with line leaders only.
    pub fn line(leaders: &[&str]) -> Self {
        Self {
            leaders: leaders.iter().map(|l| l.to_string()).collect(),
            block: None,
        }
    }

    /// Add block comment delimiters to this style.
    pub fn with_block(mut self, open: &str, close: &str) -> Self {
        self.block = Some(BlockDelimiters {
            open: open.to_string(),
            close: close.to_string(),
        });
        self
    }

    /// The conservative style used for unresolved languages.
    pub fn fallback() -> Self {
        Self::line(FALLBACK_LEADERS)
    }

    /// Returns the first leader that prefixes `trimmed` (text with leading whitespace removed).
    pub fn match_leader(&self, trimmed: &str) -> Option<&str> {
        self.leaders
            .iter()
            .find(|leader| !leader.is_empty() && trimmed.starts_with(leader.as_str()))
            .map(String::as_str)
    }

    /// True if this style can recognize no comment at all.
    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty() && self.block.is_none()
    }
}

/// Result of looking up a language tag.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedStyle<'a> {
    pub style: &'a CommentStyle,
    /// True if the tag had no entry and the fallback style was used.
    pub fallback: bool,
}

// (tag, extensions, line leaders, block delimiters)
type LanguageEntry = (
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
    Option<(&'static str, &'static str)>,
);

const C_BLOCK: Option<(&str, &str)> = Some(("/*", "*/"));

const BUILTIN_LANGUAGES: &[LanguageEntry] = &[
    ("c", &["c", "h"], &["//"], C_BLOCK),
    ("cpp", &["cpp", "cc", "cxx", "hpp", "hh", "hxx"], &["///", "//"], C_BLOCK),
    ("csharp", &["cs"], &["///", "//"], C_BLOCK),
    ("css", &["css"], &[], C_BLOCK),
    ("dart", &["dart"], &["///", "//"], C_BLOCK),
    ("dockerfile", &["dockerfile"], &["#"], None),
    ("elixir", &["ex", "exs"], &["#"], None),
    ("erlang", &["erl", "hrl"], &["%%", "%"], None),
    ("go", &["go"], &["//"], C_BLOCK),
    ("haskell", &["hs"], &["--"], Some(("{-", "-}"))),
    ("html", &["html", "htm", "xml", "svg", "vue"], &[], Some(("<!--", "-->"))),
    ("ini", &["ini", "cfg"], &[";", "#"], None),
    ("java", &["java"], &["//"], C_BLOCK),
    ("javascript", &["js", "mjs", "cjs", "jsx"], &["//"], C_BLOCK),
    ("kotlin", &["kt", "kts"], &["//"], C_BLOCK),
    ("lisp", &["el", "lisp", "clj", "cljs", "scm"], &[";;", ";"], None),
    ("lua", &["lua"], &["--"], None),
    ("make", &["mk", "make"], &["#"], None),
    ("perl", &["pl", "pm"], &["#"], None),
    ("php", &["php"], &["//", "#"], C_BLOCK),
    ("powershell", &["ps1", "psm1"], &["#"], Some(("<#", "#>"))),
    ("python", &["py", "pyi", "pyw"], &["#"], None),
    ("r", &["r"], &["#"], None),
    ("ruby", &["rb", "rake", "gemspec"], &["#"], None),
    ("rust", &["rs"], &["//!", "///", "//"], C_BLOCK),
    ("scala", &["scala", "sc"], &["//"], C_BLOCK),
    ("scss", &["scss", "sass", "less"], &["//"], C_BLOCK),
    ("shell", &["sh", "bash", "zsh", "fish"], &["#"], None),
    ("sql", &["sql"], &["--"], C_BLOCK),
    ("swift", &["swift"], &["///", "//"], C_BLOCK),
    ("tex", &["tex", "sty"], &["%"], None),
    ("toml", &["toml"], &["#"], None),
    ("typescript", &["ts", "tsx", "mts", "cts"], &["//"], C_BLOCK),
    ("vim", &["vim"], &["\""], None),
    ("yaml", &["yml", "yaml"], &["#"], None),
    ("zig", &["zig"], &["///", "//"], None),
];

/// Files recognized by their whole name rather than their extension.
const BUILTIN_FILE_NAMES: &[(&str, &str)] = &[
    ("Dockerfile", "dockerfile"),
    ("Makefile", "make"),
    ("GNUmakefile", "make"),
    ("Rakefile", "ruby"),
    ("Gemfile", "ruby"),
];

static BUILTIN_TABLE: LazyLock<CommentStyleTable> = LazyLock::new(CommentStyleTable::new_builtin);

/// Lookup table from language tag to [`CommentStyle`], and from file extension to tag.
#[derive(Debug, Clone)]
pub struct CommentStyleTable {
    styles: HashMap<String, CommentStyle>,
    extensions: HashMap<String, String>,
    file_names: HashMap<String, String>,
    fallback: CommentStyle,
}

impl Default for CommentStyleTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl CommentStyleTable {
    /// The shared built-in table.
    pub fn builtin() -> &'static CommentStyleTable {
        &BUILTIN_TABLE
    }

    fn new_builtin() -> Self {
        let mut table = Self {
            styles: HashMap::new(),
            extensions: HashMap::new(),
            file_names: HashMap::new(),
            fallback: CommentStyle::fallback(),
        };

        for (tag, extensions, leaders, block) in BUILTIN_LANGUAGES {
            let mut style = CommentStyle::line(leaders);
            if let Some((open, close)) = block {
                style = style.with_block(open, close);
            }
            table.insert_language(tag, style);
            for ext in *extensions {
                table.insert_extension(ext, tag);
            }
        }

        for (name, tag) in BUILTIN_FILE_NAMES {
            table
                .file_names
                .insert((*name).to_string(), (*tag).to_string());
        }

        table
    }

    /// Register (or replace) the style for a language tag.
    pub fn insert_language(&mut self, tag: &str, style: CommentStyle) {
        self.styles.insert(tag.to_ascii_lowercase(), style);
    }

    /// Map a file extension (without the dot) to a language tag.
    pub fn insert_extension(&mut self, ext: &str, tag: &str) {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.extensions.insert(ext, tag.to_ascii_lowercase());
    }

    /// Look up the comment style for a language tag.
    ///
    /// Unknown tags resolve to the fallback style with `fallback` set.
    pub fn resolve(&self, tag: &str) -> ResolvedStyle<'_> {
        match self.styles.get(&tag.to_ascii_lowercase()) {
            Some(style) => ResolvedStyle {
                style,
                fallback: false,
            },
            None => ResolvedStyle {
                style: &self.fallback,
                fallback: true,
            },
        }
    }

    /// Derive the language tag for a path from its file name or extension.
    pub fn language_for_path(&self, path: &Path) -> Option<&str> {
        if let Some(tag) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| self.file_names.get(n))
        {
            return Some(tag);
        }

        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.extensions.get(&ext).map(String::as_str)
    }

    /// All registered languages with their extensions, sorted by tag.
    pub fn languages(&self) -> Vec<(&str, &CommentStyle, Vec<&str>)> {
        let mut extensions_by_tag: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (ext, tag) in &self.extensions {
            extensions_by_tag
                .entry(tag.as_str())
                .or_default()
                .push(ext.as_str());
        }

        let mut languages: Vec<_> = self
            .styles
            .iter()
            .map(|(tag, style)| {
                let mut exts = extensions_by_tag.remove(tag.as_str()).unwrap_or_default();
                exts.sort_unstable();
                (tag.as_str(), style, exts)
            })
            .collect();
        languages.sort_by(|a, b| a.0.cmp(b.0));
        languages
    }
}
