use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show or change saved preferences",
            "config [show | set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show the version", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section(format!("Config ({})", context.config_manager.path().display()));
            let json = serde_json::to_string_pretty(&context.config)?;
            for line in json.lines() {
                output::info(line);
            }
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let value = value.join(" ");
            let mut updated = context.config.clone();
            updated
                .set(key, &value)
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            context.config_manager.save(&updated)?;
            context.planner.apply_config(&updated);
            context.config = updated;
            output::success(format!("Set {} = {}.", key, value));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show | set <key> <value>] (keys: {})",
            Config::KEYS.join(", ")
        ))),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Microdose Planner {}", env!("CARGO_PKG_VERSION")));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
