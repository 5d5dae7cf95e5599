use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::db::{Library, RemoveOutcome, StatusUpdate};
use crate::models::{BookStatus, Year};

use super::forms::{MenuChoice, Prompter};
use super::helpers::book_listing;

/// Interactive session state: the library being edited. The menu itself is
/// stateless between iterations, so the library is all we keep.
pub struct App {
    library: Library,
}

impl App {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Drive the menu until the user exits or input runs out. Store write
    /// failures end the loop with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: W) -> Result<()> {
        let mut prompter = Prompter::new(input, output);

        loop {
            print_menu(&mut prompter)?;
            let Some(line) = prompter.ask("Choose an action: ")? else {
                prompter.say("\nGoodbye!")?;
                return Ok(());
            };
            prompter.say("\n============")?;

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(err) => {
                    debug!(error = %err, "rejected menu input");
                    prompter.say("Invalid input, please try again.")?;
                    continue;
                }
            };
            debug!(?choice, "menu choice");

            let keep_going = match choice {
                MenuChoice::Add => self.handle_add(&mut prompter)?,
                MenuChoice::Remove => self.handle_remove(&mut prompter)?,
                MenuChoice::Find => self.handle_find(&mut prompter)?,
                MenuChoice::List => self.handle_list(&mut prompter)?,
                MenuChoice::UpdateStatus => self.handle_update_status(&mut prompter)?,
                MenuChoice::Exit => {
                    prompter.say("Exiting the program. Goodbye!")?;
                    false
                }
            };

            if !keep_going {
                return Ok(());
            }
        }
    }

    fn handle_add<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> Result<bool> {
        let Some(title) = prompter.ask("Enter the book title: ")? else {
            return Ok(false);
        };
        let Some(author) = prompter.ask("Enter the book author: ")? else {
            return Ok(false);
        };
        let Some(year) = prompter.ask("Enter the publication year: ")? else {
            return Ok(false);
        };

        let book = self.library.add(title, author, Year::parse_input(&year))?;
        let message = format!("Book '{}' added successfully.", book.title);
        prompter.say(message)?;
        Ok(true)
    }

    fn handle_remove<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<bool> {
        let Some(id) = prompter.ask("Enter the ID of the book to remove: ")? else {
            return Ok(false);
        };

        match self.library.remove(&id)? {
            RemoveOutcome::Removed(_) => prompter.say(format!("Book with ID {id} removed."))?,
            RemoveOutcome::NotFound => prompter.say(format!("Book with ID {id} not found."))?,
        }
        Ok(true)
    }

    fn handle_find<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<bool> {
        let Some(query) = prompter.ask("Enter a title, author or year to search for: ")? else {
            return Ok(false);
        };

        let found = self.library.find(&query);
        if found.is_empty() {
            prompter.say("No books match your query.")?;
        } else {
            prompter.say(book_listing("Found books:", found))?;
        }
        Ok(true)
    }

    fn handle_list<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> Result<bool> {
        if self.library.is_empty() {
            prompter.say("The library is empty.")?;
        } else {
            prompter.say(book_listing("Books in the library:", self.library.books()))?;
        }
        Ok(true)
    }

    fn handle_update_status<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<bool> {
        let Some(id) = prompter.ask("Enter the ID of the book to update: ")? else {
            return Ok(false);
        };
        let status_prompt = format!("Enter the new status ({}): ", quoted_statuses());
        let Some(status) = prompter.ask(&status_prompt)? else {
            return Ok(false);
        };

        let message = match self.library.update_status(&id, &status)? {
            Ok(StatusUpdate::Updated(book)) => {
                format!("Status of '{}' updated to '{}'.", book.title, book.status)
            }
            Ok(StatusUpdate::NotFound) => "No book with that ID was found.".to_string(),
            Err(rejected) => rejected.to_string(),
        };
        prompter.say(message)?;
        Ok(true)
    }
}

fn print_menu<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    prompter.say("\n=== Menu ===")?;
    for choice in MenuChoice::ALL {
        prompter.say(format!("{}. {}", choice.number(), choice.label()))?;
    }
    Ok(())
}

fn quoted_statuses() -> String {
    BookStatus::ALL
        .iter()
        .map(|status| format!("'{status}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}
