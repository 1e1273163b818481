//! Line-oriented terminal front end.
//!
//! Outside dialogs each line is a [`Command`]. While a dialog is open the
//! next line answers it instead: the edit dialog takes the new name, the
//! delete dialog takes a yes/no.

use crate::shell::messages;
use crate::shell::{Shell, ShellError};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "> ";

/// A line typed outside dialogs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add <name>` or any line that is not another command
    Add(String),
    /// `toggle <n>`
    Toggle(usize),
    /// `edit <n>`
    Edit(usize),
    /// `delete <n>`
    Delete(usize),
    /// `list`
    List,
    /// `help`
    Help,
    /// `quit`
    Quit,
    /// A known command with a bad position argument
    Invalid(String),
}

impl Command {
    /// Parse one input line
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist::repl::Command;
    ///
    /// assert_eq!(Command::parse("toggle 2"), Command::Toggle(2));
    /// assert_eq!(Command::parse("Buy milk"), Command::Add("Buy milk".into()));
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(head, rest)| (head, rest.trim()));

        match head.to_lowercase().as_str() {
            "add" => Self::Add(rest.to_string()),
            "toggle" => Self::position(rest, Self::Toggle),
            "edit" => Self::position(rest, Self::Edit),
            "delete" => Self::position(rest, Self::Delete),
            "list" if rest.is_empty() => Self::List,
            "help" if rest.is_empty() => Self::Help,
            "quit" | "exit" if rest.is_empty() => Self::Quit,
            _ => Self::Add(trimmed.to_string()),
        }
    }

    fn position(argument: &str, make: fn(usize) -> Self) -> Self {
        argument
            .parse()
            .map_or_else(|_| Self::Invalid(argument.to_string()), make)
    }
}

/// Whether a line answers the delete dialog with yes
#[must_use]
pub fn confirms_delete(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "y" | "yes" | "xoa" | "xoá"
    )
}

enum Step {
    Continue(Option<String>),
    Quit,
}

/// Drive `shell` from `input` until `quit` or end of input
///
/// The screen is written to `output` before every prompt.
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `output`. Errors
/// from the shell are reported on `output` and do not end the session.
pub async fn run<R, W>(shell: &mut Shell, input: R, output: &mut W, ansi: bool) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut note: Option<String> = None;

    loop {
        if let Some(note) = note.take() {
            output.write_all(note.as_bytes()).await?;
            output.write_all(b"\n\n").await?;
        }
        output.write_all(shell.render(ansi).await.as_bytes()).await?;
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("End of input");
            break;
        };

        match handle_line(shell, &line).await {
            Step::Continue(next) => note = next,
            Step::Quit => break,
        }
    }

    output.write_all(b"\n").await?;
    output.flush().await
}

async fn handle_line(shell: &mut Shell, line: &str) -> Step {
    let result = if shell.dialog().is_editing() {
        if line.trim() == messages::CANCEL_KEY {
            shell.close_dialog();
            Ok(None)
        } else {
            shell.confirm_edit(line).await.map(|()| None)
        }
    } else if shell.dialog().is_confirming_delete() {
        if confirms_delete(line) {
            shell.confirm_delete().await.map(|()| None)
        } else {
            shell.close_dialog();
            Ok(None)
        }
    } else {
        let command = Command::parse(line);
        tracing::debug!(?command, "Dispatching command");
        match command {
            Command::Quit => return Step::Quit,
            command => dispatch(shell, command).await,
        }
    };

    Step::Continue(result.unwrap_or_else(|error| Some(describe(&error))))
}

async fn dispatch(shell: &mut Shell, command: Command) -> Result<Option<String>, ShellError> {
    match command {
        Command::Add(name) => shell.submit(&name).await.map(|_| None),
        Command::Toggle(position) => shell.toggle(position).await.map(|()| None),
        Command::Edit(position) => shell.open_edit(position).await.map(|()| None),
        Command::Delete(position) => shell.open_delete(position).await.map(|()| None),
        Command::Help => Ok(Some(messages::HELP.to_string())),
        Command::Invalid(argument) => Ok(Some(messages::invalid_position(&argument))),
        Command::List | Command::Quit => Ok(None),
    }
}

fn describe(error: &ShellError) -> String {
    match error {
        ShellError::NoSuchItem(position) => messages::no_such_item(*position),
        ShellError::Store(inner) => {
            tracing::error!(error = %inner, "Store rejected action");
            format!("! {inner}")
        },
        other => {
            tracing::warn!(error = %other, "Shell gesture rejected");
            format!("! {other}")
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("add  Buy milk "), Command::Add("Buy milk".into()));
        assert_eq!(Command::parse("TOGGLE 3"), Command::Toggle(3));
        assert_eq!(Command::parse("edit 1"), Command::Edit(1));
        assert_eq!(Command::parse("delete 12"), Command::Delete(12));
        assert_eq!(Command::parse(" list "), Command::List);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("exit"), Command::Quit);
    }

    #[test]
    fn bare_text_is_an_add() {
        assert_eq!(Command::parse("Walk dog"), Command::Add("Walk dog".into()));
        assert_eq!(Command::parse("list groceries"), Command::Add("list groceries".into()));
        assert_eq!(Command::parse("   "), Command::Add(String::new()));
    }

    #[test]
    fn bad_positions_are_invalid() {
        assert_eq!(Command::parse("toggle"), Command::Invalid(String::new()));
        assert_eq!(Command::parse("edit two"), Command::Invalid("two".into()));
        assert_eq!(Command::parse("delete -1"), Command::Invalid("-1".into()));
    }

    #[test]
    fn delete_answers() {
        for yes in ["y", "Y", "yes", "xoa", "xoá", " y "] {
            assert!(confirms_delete(yes), "{yes:?}");
        }
        for no in ["n", "", "huy", "yess"] {
            assert!(!confirms_delete(no), "{no:?}");
        }
    }
}
