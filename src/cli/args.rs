//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Extract annotations from source files
//! - `init`: Initialize a `.todoctlrc.json` configuration file
//! - `languages`: List the built-in comment styles

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::data::{AnnotationKind, MarkerKeyword};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Languages) | None => false,
        }
    }
}

/// Common arguments shared by scanning commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, cargo-style output
    #[default]
    Text,
    /// JSON document with files, issues and summary
    Json,
}

/// Annotation kinds selectable with `--kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum KindFilter {
    Todo,
    Fixme,
    Xxx,
    /// `TODO: {` ... `}` blocks
    Brace,
    /// `TODOS.START` ... `TODOS.END` blocks
    Collection,
}

impl KindFilter {
    pub fn matches(&self, kind: &AnnotationKind) -> bool {
        matches!(
            (self, kind),
            (KindFilter::Todo, AnnotationKind::Marker(MarkerKeyword::Todo))
                | (KindFilter::Fixme, AnnotationKind::Marker(MarkerKeyword::Fixme))
                | (KindFilter::Xxx, AnnotationKind::Marker(MarkerKeyword::Xxx))
                | (KindFilter::Brace, AnnotationKind::BraceBlock)
                | (KindFilter::Collection, AnnotationKind::CollectionBlock)
        )
    }
}

#[derive(Debug, Default, Parser)]
pub struct ScanArgs {
    /// Files or directories to scan (default: the source root)
    pub paths: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only report these annotation kinds (default: all)
    /// Can be specified multiple times: --kind todo --kind fixme
    #[arg(long, value_enum)]
    pub kind: Vec<KindFilter>,

    /// Do not show the code line following each annotation
    #[arg(long)]
    pub no_context: bool,

    /// Exit with status 1 when warnings are found
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub args: ScanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract TODO, FIXME and XXX annotations from source comments
    Scan(ScanCommand),
    /// Initialize a new .todoctlrc.json configuration file
    Init,
    /// List built-in languages and their comment styles
    Languages,
}
