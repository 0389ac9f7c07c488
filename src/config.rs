use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::data::{BlockDelimiters, CommentStyle, CommentStyleTable};

pub const CONFIG_FILE_NAME: &str = ".todoctlrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Extra extension → language tag mappings. Overrides the built-in ones.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
    /// Custom comment styles, keyed by language tag.
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

/// Comment style of a user-defined language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    #[serde(default)]
    pub leaders: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockDelimiters>,
}

impl LanguageConfig {
    fn to_style(&self) -> CommentStyle {
        CommentStyle {
            leaders: self.leaders.clone(),
            block: self.block.clone(),
        }
    }
}

fn default_ignores() -> Vec<String> {
    [
        "**/node_modules/**",
        "**/target/**",
        "**/.git/**",
        "**/vendor/**",
    ]
    .map(String::from)
    .to_vec()
}

fn default_source_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            includes: Vec::new(),
            source_root: default_source_root(),
            extensions: BTreeMap::new(),
            languages: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns and for custom languages that could
    /// never recognize a comment.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards (* or ?) are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for (tag, language) in &self.languages {
            if language.leaders.is_empty() && language.block.is_none() {
                bail!("Language \"{}\" in 'languages' defines no leaders or block delimiters", tag);
            }
            if language.leaders.iter().any(|l| l.trim().is_empty()) {
                bail!("Language \"{}\" in 'languages' has an empty leader", tag);
            }
            if let Some(block) = &language.block
                && (block.open.trim().is_empty() || block.close.trim().is_empty())
            {
                bail!("Language \"{}\" in 'languages' has an empty block delimiter", tag);
            }
        }

        for (ext, tag) in &self.extensions {
            if ext.trim_start_matches('.').is_empty() || tag.trim().is_empty() {
                bail!("Invalid mapping in 'extensions': \"{}\" -> \"{}\"", ext, tag);
            }
        }

        Ok(())
    }

    /// The built-in language table with this config's languages and extensions merged in.
    pub fn comment_style_table(&self) -> CommentStyleTable {
        let mut table = CommentStyleTable::default();
        for (tag, language) in &self.languages {
            table.insert_language(tag, language.to_style());
        }
        for (ext, tag) in &self.extensions {
            table.insert_extension(ext, tag);
        }
        table
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
