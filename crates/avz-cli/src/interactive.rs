//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based interactive selection.

use std::path::PathBuf;

use avz_extensions::Prompter;
use dialoguer::{Input, Select};

use crate::error::Result;

/// [`Prompter`] that shows a terminal pick-list. Escape or `q` cancels.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> avz_extensions::Result<Option<usize>> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .max_length(15)
            .interact_opt()
            .map_err(|e| avz_extensions::Error::Prompt(e.to_string()))
    }
}

/// Ask for the directory to search for an installation.
pub fn prompt_avz_dir() -> Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("AvZ installation directory")
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}
