use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::AppError;
use crate::ports::Prompter;

/// Prompter that replays queued answers in order and records every prompt.
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    pub asked: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_input(self, answer: &str) -> Self {
        self.inputs.borrow_mut().push_back(answer.to_string());
        self
    }

    pub fn then_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.borrow().len()
    }

    pub fn was_asked(&self, fragment: &str) -> bool {
        self.asked.borrow().iter().any(|prompt| prompt.contains(fragment))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        self.asked.borrow_mut().push(prompt.to_string());
        let answer = self
            .inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| AppError::Prompt(format!("No scripted answer for '{}'", prompt)))?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, AppError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| AppError::Prompt(format!("No scripted confirmation for '{}'", prompt)))
    }
}
