//! Interactive prompts built on `dialoguer`.
//!
//! `TerminalChooser` is the `Chooser` the commands hand to the resolver.
//! Esc or `q` in the selection list counts as "nothing chosen".

use dialoguer::{Confirm, Input, Select};

use crate::errors::{AzqError, Result};
use crate::search::Chooser;

/// Paged selection list on the terminal.
pub struct TerminalChooser {
    page_size: usize,
}

impl TerminalChooser {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}

impl Chooser for TerminalChooser {
    fn choose(&mut self, title: &str, labels: &[String]) -> Result<Option<usize>> {
        Select::new()
            .with_prompt(title)
            .items(labels)
            .default(0)
            .max_length(self.page_size)
            .interact_opt()
            .map_err(|e| AzqError::Prompt(format!("selection prompt: {e}")))
    }
}

/// Ask for a search term until a non-blank one is entered.
pub fn ask_search_term() -> Result<String> {
    let term: String = Input::new()
        .with_prompt("Enter search term")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("search term cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| AzqError::Prompt(format!("search term prompt: {e}")))?;
    Ok(term.trim().to_string())
}

/// Yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AzqError::Prompt(format!("confirm prompt: {e}")))
}
