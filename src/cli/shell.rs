use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::config::Config;
use crate::planner::AcknowledgementPolicy;
use crate::schedule::FrequencyPattern;

const SCRIPT_ENV: &str = "MICRODOSE_PLANNER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        colored::control::set_override(false);
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => {
            let mut input = TerminalInput::new(context.command_names())?;
            output::info("Type `help` to see available commands.");
            drive(&mut context, &mut input)
        }
        CliMode::Script => drive(&mut context, &mut ScriptInput::new(io::stdin().lock())),
    }
}

/// What a line source produced for one prompt.
pub(crate) enum ShellInput {
    Line(String),
    Interrupted,
    Closed,
}

pub(crate) trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<ShellInput, CliError>;
}

struct TerminalInput {
    editor: Editor<PlannerHelper, DefaultHistory>,
}

impl TerminalInput {
    fn new(command_names: Vec<&'static str>) -> Result<Self, CliError> {
        let mut editor = Editor::<PlannerHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(PlannerHelper::new(command_names)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for TerminalInput {
    fn next_line(&mut self, prompt: &str) -> Result<ShellInput, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.trim()).ok();
                }
                Ok(ShellInput::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ShellInput::Interrupted),
            Err(ReadlineError::Eof) => Ok(ShellInput::Closed),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads commands line by line, ignoring the prompt.
pub(crate) struct ScriptInput<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> ScriptInput<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for ScriptInput<R> {
    fn next_line(&mut self, _prompt: &str) -> Result<ShellInput, CliError> {
        match self.lines.next() {
            Some(line) => Ok(ShellInput::Line(line?)),
            None => Ok(ShellInput::Closed),
        }
    }
}

/// Feeds lines to the planner until the source closes or `exit` runs.
pub(crate) fn drive(context: &mut ShellContext, input: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let prompt = context.prompt();
        match input.next_line(&prompt)? {
            ShellInput::Line(line) => match handle_line(context, &line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err)?,
            },
            ShellInput::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            ShellInput::Closed => {
                if context.mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };

    // Blank lines and `#` comments are skipped in scripts.
    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Completes command names, pattern ids, config keys and their values.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct PlannerHelper {
    commands: Vec<String>,
}

impl PlannerHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Byte offset of the word under the cursor and the values that fit there.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let word_start = prefix
            .trim_end_matches(|c: char| !c.is_whitespace())
            .len();
        let needle = prefix[word_start..].to_ascii_lowercase();
        let before: Vec<&str> = prefix[..word_start].split_whitespace().collect();

        let pool = match before.split_first() {
            None => self.commands.clone(),
            Some((command, args)) => self.arguments(&command.to_ascii_lowercase(), args),
        };
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .collect();
        (word_start, matches)
    }

    fn arguments(&self, command: &str, args: &[&str]) -> Vec<String> {
        let pattern_ids = || {
            FrequencyPattern::ALL
                .iter()
                .map(|pattern| pattern.id().to_string())
                .collect()
        };
        match (command, args) {
            ("start", []) => vec!["today".to_string()],
            ("pattern", []) => pattern_ids(),
            ("help", []) => self.commands.clone(),
            ("export", []) => vec!["-".to_string()],
            ("config", []) => vec!["show".to_string(), "set".to_string()],
            ("config", ["set"]) => Config::KEYS.iter().map(|key| key.to_string()).collect(),
            ("config", ["set", "default_pattern"]) => pattern_ids(),
            ("config", ["set", "acknowledgement_policy"]) => AcknowledgementPolicy::ALL
                .iter()
                .map(|policy| policy.id().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Completer for PlannerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}
