use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;

/// Menu input that is not the number of a listed choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no menu choice '{0}'")]
pub(crate) struct InvalidChoice(pub(crate) String);

/// Entries of the main menu, numbered as they are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Add,
    Remove,
    Find,
    List,
    UpdateStatus,
    Exit,
}

impl MenuChoice {
    pub(crate) const ALL: [MenuChoice; 6] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Find,
        MenuChoice::List,
        MenuChoice::UpdateStatus,
        MenuChoice::Exit,
    ];

    pub(crate) fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map_or(0, |index| index + 1)
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a book",
            MenuChoice::Remove => "Remove a book",
            MenuChoice::Find => "Find a book",
            MenuChoice::List => "Show all books",
            MenuChoice::UpdateStatus => "Update book status",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidChoice(value.trim().to_string());
        let number: usize = value.trim().parse().map_err(|_| invalid())?;
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(invalid)
    }
}

/// Line-oriented prompt reader. `ask` yields `None` once input is exhausted.
pub(crate) struct Prompter<R, W> {
    input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label`, then read one line with its trailing newline removed.
    pub(crate) fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    pub(crate) fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref()).context("failed to write output")
    }
}
