use std::fs;

use anyhow::{Context, Result};
use tracing::debug;

use super::{CommandKind, CommandResult};
use crate::{
    cli::{
        args::{KindFilter, OutputFormat, ScanCommand},
        report::{self, ScanReport},
    },
    core::{ScanContext, ScanOutcome},
    issues::Severity,
};

/// Extract annotations and print them in the requested format.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let ctx = ScanContext::new(&args)?;
    let mut outcome = ctx.run();

    apply_kind_filter(&mut outcome, &args.kind);
    if args.no_context {
        strip_anchors(&mut outcome);
    }

    let issues = outcome.issues();
    let scan_report = ScanReport {
        files: &outcome.files,
        issues: &issues,
        files_scanned: ctx.files.len(),
        show_context: !args.no_context,
    };

    let rendered = match (args.format, &args.output) {
        (OutputFormat::Json, _) => Some(report::render_json(&scan_report)?),
        (OutputFormat::Text, Some(_)) => {
            colored::control::set_override(false);
            let mut buffer = Vec::new();
            report::write_text(&scan_report, &mut buffer);
            colored::control::unset_override();
            Some(String::from_utf8_lossy(&buffer).into_owned())
        }
        (OutputFormat::Text, None) => {
            report::print_text(&scan_report);
            None
        }
    };

    if let Some(rendered) = rendered {
        match &args.output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                debug!(path = %path.display(), "report written");
            }
            None => print!("{}", rendered),
        }
    }

    let count = |severity| issues.iter().filter(|i| i.severity() == severity).count();
    Ok(CommandResult {
        kind: CommandKind::Scan,
        error_count: count(Severity::Error),
        warning_count: count(Severity::Warning),
        deny_warnings: args.deny_warnings,
    })
}

/// Keep only annotations whose kind is selected. An empty filter keeps everything.
fn apply_kind_filter(outcome: &mut ScanOutcome, filter: &[KindFilter]) {
    if filter.is_empty() {
        return;
    }
    for file in &mut outcome.files {
        file.extraction
            .annotations
            .retain(|a| filter.iter().any(|f| f.matches(&a.kind)));
    }
}

fn strip_anchors(outcome: &mut ScanOutcome) {
    for annotation in outcome
        .files
        .iter_mut()
        .flat_map(|f| f.extraction.annotations.iter_mut())
    {
        annotation.anchor = None;
    }
}
