use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Result, TaggerError};
use crate::ui::{Answer, BumpPreviews, Prompter};
use crate::version::Bump;

/// Scripted [Prompter] for driving the workflow in tests.
///
/// Answers are consumed in the order the workflow asks for them; hitting
/// a prompt with no scripted answer is an error, so a test fails loudly
/// if the workflow asks more questions than expected.
pub struct ScriptedPrompter {
    bumps: Mutex<VecDeque<Answer<Bump>>>,
    confirms: Mutex<VecDeque<Answer<bool>>>,
    inputs: Mutex<VecDeque<Answer<String>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        ScriptedPrompter {
            bumps: Mutex::new(VecDeque::new()),
            confirms: Mutex::new(VecDeque::new()),
            inputs: Mutex::new(VecDeque::new()),
        }
    }

    /// Script the bump selection.
    pub fn pick_bump(self, kind: Bump) -> Self {
        self.bumps.lock().unwrap().push_back(Answer::Value(kind));
        self
    }

    /// Script a cancellation at the bump selection.
    pub fn cancel_bump(self) -> Self {
        self.bumps.lock().unwrap().push_back(Answer::Cancelled);
        self
    }

    /// Script the next yes/no answer.
    pub fn answer(self, confirmed: bool) -> Self {
        self.confirms
            .lock()
            .unwrap()
            .push_back(Answer::Value(confirmed));
        self
    }

    /// Script a cancellation at the next yes/no prompt.
    pub fn cancel_confirm(self) -> Self {
        self.confirms.lock().unwrap().push_back(Answer::Cancelled);
        self
    }

    /// Script the next free-form text answer.
    pub fn type_text(self, text: impl Into<String>) -> Self {
        self.inputs
            .lock()
            .unwrap()
            .push_back(Answer::Value(text.into()));
        self
    }

    /// Script a cancellation at the next text prompt.
    pub fn cancel_text(self) -> Self {
        self.inputs.lock().unwrap().push_back(Answer::Cancelled);
        self
    }
}

impl Default for ScriptedPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ScriptedPrompter {
    fn select_bump(&self, _current: &str, _previews: &BumpPreviews) -> Result<Answer<Bump>> {
        self.bumps
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TaggerError::prompt("unexpected bump-selection prompt"))
    }

    fn confirm(&self, prompt: &str, _default_yes: bool) -> Result<Answer<bool>> {
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TaggerError::prompt(format!("unexpected confirm prompt: {}", prompt)))
    }

    fn input_text(&self, prompt: &str, _default: &str) -> Result<Answer<String>> {
        self.inputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TaggerError::prompt(format!("unexpected text prompt: {}", prompt)))
    }
}
