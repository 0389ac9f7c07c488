use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::report::SUCCESS_MARK;
use super::{CommandKind, CommandResult};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

/// Write the default config into `dir`, refusing to overwrite an existing one.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!(
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
        return Ok(CommandResult::failure(CommandKind::Init));
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(CommandResult::success(CommandKind::Init))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::cli::exit_status::ExitStatus;
    use crate::config::load_config;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempdir().unwrap();

        let result = init_in(dir.path()).unwrap();
        assert_eq!(result.exit_status(), ExitStatus::Success);

        let loaded = load_config(dir.path()).unwrap();
        assert!(loaded.from_file);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();

        let result = init_in(dir.path()).unwrap();
        assert_eq!(result.exit_status(), ExitStatus::Failure);
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "{}"
        );
    }
}
