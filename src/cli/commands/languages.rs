use anyhow::Result;

use super::{CommandKind, CommandResult};
use crate::{cli::report::print_languages, core::data::CommentStyleTable};

/// List the built-in language table.
pub fn languages() -> Result<CommandResult> {
    print_languages(CommentStyleTable::builtin());
    Ok(CommandResult::success(CommandKind::Languages))
}
