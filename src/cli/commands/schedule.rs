use dialoguer::MultiSelect;

use crate::cli::core::{closest, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::schedule::{CalendarDate, FrequencyPattern};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "start",
            "Set the first dosing day",
            "start <YYYY-MM-DD|today>",
            cmd_start,
        ),
        CommandEntry::new(
            "pattern",
            "Choose the dosing pattern",
            "pattern <every_other_day|two_per_week>",
            cmd_pattern,
        ),
        CommandEntry::new("patterns", "List available patterns", "patterns", cmd_patterns),
        CommandEntry::new("list", "Show the current schedule", "list", cmd_list)
            .with_aliases(&["ls", "show"]),
        CommandEntry::new(
            "toggle",
            "Mark or unmark sessions by row number or date",
            "toggle <row|YYYY-MM-DD>...",
            cmd_toggle,
        ),
        CommandEntry::new(
            "mark",
            "Pick taken sessions from a checklist",
            "mark",
            cmd_mark,
        ),
        CommandEntry::new("clear", "Remove every mark", "clear", cmd_clear),
        CommandEntry::new(
            "reconcile",
            "Drop marks that are not in the current schedule",
            "reconcile",
            cmd_reconcile,
        ),
    ]
}

fn cmd_start(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: start <YYYY-MM-DD|today>".into()))?;
    let start = if input.eq_ignore_ascii_case("today") {
        CalendarDate::new(context.clock.today())
    } else {
        CalendarDate::parse(input).map_err(|err| CommandError::InvalidArguments(err.to_string()))?
    };
    context.planner.set_start(start);
    output::success(format!(
        "Start set to {} ({}).",
        start,
        output::sessions(context.planner.schedule().len())
    ));
    Ok(())
}

fn cmd_pattern(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: pattern <every_other_day|two_per_week>".into())
    })?;
    let Some(pattern) = FrequencyPattern::from_id(input) else {
        let mut message = format!("unknown pattern `{}`", input);
        if let Some(best) = closest(input, FrequencyPattern::ALL.iter().map(|p| p.id())) {
            message.push_str(&format!(" (did you mean `{}`?)", best));
        }
        return Err(CommandError::InvalidArguments(message));
    };
    context.planner.set_pattern(pattern);
    output::success(format!(
        "Pattern set to {} ({}).",
        pattern.label(),
        output::sessions(context.planner.schedule().len())
    ));
    Ok(())
}

fn cmd_patterns(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Patterns");
    for pattern in FrequencyPattern::ALL {
        let current = if pattern == context.planner.pattern() {
            " (current)"
        } else {
            ""
        };
        output::info(format!(
            "  {:<16} {} - {}{}",
            pattern.id(),
            pattern.label(),
            output::sessions(pattern.occurrence_count()),
            current
        ));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.planner.rows();
    if rows.is_empty() {
        output::warning("No dates yet. Use `start <YYYY-MM-DD>` to pick a start date.");
        return Ok(());
    }

    output::section(format!(
        "Schedule: {} from {}",
        context.planner.pattern().label(),
        rows[0].key
    ));
    for (idx, row) in rows.iter().enumerate() {
        output::raw(&output::schedule_row(idx + 1, row));
    }

    let marked = rows.iter().filter(|row| row.acknowledged).count();
    let stale = context.planner.acknowledged().len() - marked;
    if stale > 0 {
        output::warning(format!(
            "{} mark(s) refer to dates outside this schedule. Use `reconcile` to drop them.",
            stale
        ));
    }
    Ok(())
}

fn cmd_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: toggle <row|YYYY-MM-DD>...".into(),
        ));
    }

    for arg in args {
        let (key, marked) = match arg.parse::<usize>() {
            Ok(row) => {
                let index = row.checked_sub(1).ok_or_else(|| {
                    CommandError::InvalidArguments("rows are numbered from 1".into())
                })?;
                let marked = context.planner.toggle_index(index).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "row {} is out of range (1-{})",
                        row,
                        context.planner.schedule().len()
                    ))
                })?;
                (context.planner.schedule().dates()[index].key(), marked)
            }
            Err(_) => (arg.trim().to_string(), context.planner.toggle(arg)),
        };
        if marked {
            output::success(format!("Marked {}.", key));
        } else {
            output::info(format!("Unmarked {}.", key));
        }
    }
    Ok(())
}

fn cmd_mark(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode == CliMode::Script {
        return Err(CommandError::InvalidArguments(
            "`mark` needs an interactive terminal; use `toggle` in scripts".into(),
        ));
    }
    let rows = context.planner.rows();
    if rows.is_empty() {
        output::warning("No dates yet.");
        return Ok(());
    }

    let labels: Vec<String> = rows.iter().map(output::checklist_item).collect();
    let defaults: Vec<bool> = rows.iter().map(|row| row.acknowledged).collect();
    let selected = MultiSelect::with_theme(&context.theme)
        .with_prompt("Sessions taken (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let mut changed = 0usize;
    for (idx, row) in rows.iter().enumerate() {
        if selected.contains(&idx) != row.acknowledged {
            context.planner.toggle_index(idx);
            changed += 1;
        }
    }
    output::success(format!("Updated {}.", output::sessions(changed)));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let count = context.planner.acknowledged().len();
    context.planner.clear_acknowledged();
    output::success(format!("Cleared {} mark(s).", count));
    Ok(())
}

fn cmd_reconcile(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dropped = context.planner.reconcile();
    output::success(format!("Dropped {} stale mark(s).", dropped));
    Ok(())
}
