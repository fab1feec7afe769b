//! Terminal output for the planner shell.

use std::fmt;

use colored::Colorize;

use crate::planner::ScheduleRow;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn prefix(self) -> &'static str {
        match self {
            Tone::Info => "INFO: [i]",
            Tone::Success => "SUCCESS: [ok]",
            Tone::Warning => "WARNING: [!]",
            Tone::Error => "ERROR: [x]",
        }
    }

    fn render(self, message: impl fmt::Display) -> String {
        let line = format!("{} {}", self.prefix(), message);
        match self {
            Tone::Info => line,
            Tone::Success => line.bright_green().to_string(),
            Tone::Warning => line.bright_yellow().to_string(),
            Tone::Error => line.bright_red().to_string(),
        }
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", Tone::Info.render(message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", Tone::Success.render(message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", Tone::Warning.render(message));
}

pub fn error(message: impl fmt::Display) {
    println!("{}", Tone::Error.render(message));
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", format!("=== {} ===", title.to_string().trim()).bold());
}

/// Writes text verbatim, for payloads such as calendar files.
pub fn raw(text: &str) {
    println!("{}", text);
}

/// A numbered schedule line: `  2. Sat, Jan 4   2025-01-04  taken`.
pub fn schedule_row(number: usize, row: &ScheduleRow) -> String {
    let status = if row.acknowledged {
        "taken".bold().to_string()
    } else {
        "-".dimmed().to_string()
    };
    format!("{:>3}. {:<12} {}  {}", number, row.label, row.key, status)
}

/// Checklist entry for the interactive picker.
pub fn checklist_item(row: &ScheduleRow) -> String {
    format!("{} ({})", row.label, row.key)
}

/// `1 session`, `12 sessions`.
pub fn sessions(count: usize) -> String {
    match count {
        1 => "1 session".to_string(),
        n => format!("{} sessions", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::CalendarDate;

    fn row(acknowledged: bool) -> ScheduleRow {
        let date = CalendarDate::from_ymd(2025, 1, 4).unwrap();
        ScheduleRow {
            date,
            key: date.key(),
            label: date.label(),
            acknowledged,
        }
    }

    #[test]
    fn labels_prefix_messages() {
        colored::control::set_override(false);
        assert_eq!(Tone::Warning.render("careful"), "WARNING: [!] careful");
        assert_eq!(Tone::Info.render(sessions(1)), "INFO: [i] 1 session");
    }

    #[test]
    fn rows_line_up_and_show_marks() {
        colored::control::set_override(false);
        assert_eq!(
            schedule_row(2, &row(true)),
            "  2. Sat, Jan 4   2025-01-04  taken"
        );
        assert_eq!(
            schedule_row(12, &row(false)),
            " 12. Sat, Jan 4   2025-01-04  -"
        );
        assert_eq!(checklist_item(&row(false)), "Sat, Jan 4 (2025-01-04)");
        assert_eq!(sessions(22), "22 sessions");
    }
}
