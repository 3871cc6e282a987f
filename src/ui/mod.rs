//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure output formatting functions
//! - This module - The [Prompter] collaborator trait and its console
//!   implementation
//!
//! Every prompt returns [Answer], which carries either the operator's
//! choice or a cancellation signal. Cancellation is a normal outcome, not
//! an error; infrastructure failures (broken stdin, invalid selection)
//! are reported through `Err`.

use std::io::{self, BufRead, Write};

use console::style;

use crate::error::{Result, TaggerError};
use crate::version::Bump;

pub mod formatter;
pub mod mock;

pub use formatter::{
    display_error, display_help, display_info, display_success, display_warning,
};
pub use mock::ScriptedPrompter;

/// Result of a single prompt: a value, or the operator backing out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    Cancelled,
}

/// Formatted preview strings for the three bump candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpPreviews {
    pub patch: String,
    pub minor: String,
    pub major: String,
}

/// Operator-interaction collaborator.
///
/// Implementations must block until the operator responds or cancels.
pub trait Prompter {
    /// Present the three bump candidates with preview strings; the
    /// operator picks one or cancels.
    fn select_bump(&self, current: &str, previews: &BumpPreviews) -> Result<Answer<Bump>>;

    /// Ask a yes/no question with a stated default.
    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<Answer<bool>>;

    /// Collect free-form text, pre-filled with a default the operator can
    /// accept by pressing Enter.
    fn input_text(&self, prompt: &str, default: &str) -> Result<Answer<String>>;
}

/// [Prompter] implementation over stdin/stdout.
///
/// Pressing Enter accepts the stated default; `q` or end-of-input at any
/// prompt cancels.
pub struct ConsolePrompter;

impl ConsolePrompter {
    pub fn new() -> Self {
        ConsolePrompter
    }

    /// Read one trimmed line from stdin. `None` means end-of-input, the
    /// console equivalent of the operator pressing Escape.
    fn read_line(&self) -> Result<Option<String>> {
        let mut input = String::new();
        let bytes = io::stdin().lock().read_line(&mut input)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn select_bump(&self, current: &str, previews: &BumpPreviews) -> Result<Answer<Bump>> {
        println!();
        println!("{} {}", style("Current version:").bold(), style(current).cyan());
        println!();
        println!("  1. patch  {}", previews.patch);
        println!("  2. minor  {}", previews.minor);
        println!("  3. major  {}", previews.major);

        print!("\nSelect version bump (1-3, q to cancel) [default: 1]: ");
        io::stdout().flush()?;

        let selection = match self.read_line()? {
            Some(line) => line,
            None => return Ok(Answer::Cancelled),
        };

        match selection.as_str() {
            "" | "1" => Ok(Answer::Value(Bump::Patch)),
            "2" => Ok(Answer::Value(Bump::Minor)),
            "3" => Ok(Answer::Value(Bump::Major)),
            "q" | "Q" => Ok(Answer::Cancelled),
            other => Err(TaggerError::prompt(format!("invalid selection '{}'", other))),
        }
    }

    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<Answer<bool>> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        print!("\n{} ({}): ", prompt, hint);
        io::stdout().flush()?;

        let response = match self.read_line()? {
            Some(line) => line.to_lowercase(),
            None => return Ok(Answer::Cancelled),
        };

        let confirmed = match response.as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            "n" | "no" => false,
            "q" => return Ok(Answer::Cancelled),
            _ => default_yes,
        };

        Ok(Answer::Value(confirmed))
    }

    fn input_text(&self, prompt: &str, default: &str) -> Result<Answer<String>> {
        print!("\n{} [{}]: ", prompt, default);
        io::stdout().flush()?;

        match self.read_line()? {
            Some(line) if line.is_empty() => Ok(Answer::Value(default.to_string())),
            Some(line) => Ok(Answer::Value(line)),
            None => Ok(Answer::Cancelled),
        }
    }
}
