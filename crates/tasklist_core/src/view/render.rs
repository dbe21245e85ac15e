//! Text rendering of the task list screen.

use crate::controller::reducer::RowChange;

pub const SCREEN_TITLE: &str = "Task List";
pub const NEW_TASK_TITLE: &str = "New Task";
pub const EDIT_TASK_TITLE: &str = "Edit Task";
pub const PROMPT_MESSAGE: &str = "What do you want to do?";

pub const HELP_TEXT: &str = "\
Commands:
  add          new task
  edit N       rename row N
  delete N     remove row N
  list         redraw the list
  help         show this help
  quit         leave
In a prompt, type the text and press Enter to Save, or `:cancel` to Cancel.";

/// Renders the header and one numbered row per title.
pub fn render_rows<S: AsRef<str>>(titles: &[S]) -> String {
    let mut out = format!("{SCREEN_TITLE}\n");
    if titles.is_empty() {
        out.push_str("  (no tasks)\n");
        return out;
    }
    for (index, title) in titles.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", index + 1, title.as_ref()));
    }
    out
}

/// Renders the Save/Cancel prompt header, showing the pre-filled text.
pub fn render_prompt(title: &str, current: Option<&str>) -> String {
    match current {
        Some(text) => format!("{title}: {PROMPT_MESSAGE}\n  current: {text}\n> "),
        None => format!("{title}: {PROMPT_MESSAGE}\n> "),
    }
}

/// One-line status for a completed row change.
pub fn describe_row_change(change: RowChange) -> String {
    match change {
        RowChange::Inserted(index) => format!("+ row {}", index + 1),
        RowChange::Reloaded => "~ list updated".to_string(),
        RowChange::Deleted(index) => format!("- row {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::{describe_row_change, render_prompt, render_rows};
    use crate::controller::reducer::RowChange;

    #[test]
    fn rows_are_numbered_from_one() {
        let screen = render_rows(&["Buy milk", "Call mom"]);
        assert_eq!(screen, "Task List\n  1. Buy milk\n  2. Call mom\n");
    }

    #[test]
    fn empty_list_has_placeholder() {
        let screen = render_rows::<&str>(&[]);
        assert!(screen.contains("(no tasks)"));
    }

    #[test]
    fn edit_prompt_shows_current_title() {
        let prompt = render_prompt("Edit Task", Some("Buy milk"));
        assert!(prompt.contains("current: Buy milk"));
        assert!(!render_prompt("New Task", None).contains("current"));
    }

    #[test]
    fn row_changes_use_display_numbers() {
        assert_eq!(describe_row_change(RowChange::Inserted(0)), "+ row 1");
        assert_eq!(describe_row_change(RowChange::Deleted(2)), "- row 3");
    }
}
