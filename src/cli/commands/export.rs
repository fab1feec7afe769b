use std::path::PathBuf;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::persistence::save_export_to_file;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Write the schedule as an .ics calendar file (`-` prints it)",
        "export [path|-]",
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let artifact = context.planner.try_export(context.clock.as_ref())?;

    let marked_only = !context.planner.acknowledged().is_empty();
    let scope = if marked_only { "marked" } else { "scheduled" };

    if args.first() == Some(&"-") {
        output::raw(artifact.calendar.as_str());
        return Ok(());
    }

    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => context
            .config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&artifact.filename),
    };
    save_export_to_file(&artifact.calendar, &path)?;
    output::success(format!(
        "Exported {} {} to {} ({}).",
        output::sessions(artifact.calendar.event_count()),
        scope,
        path.display(),
        artifact.mime_type
    ));
    Ok(())
}
