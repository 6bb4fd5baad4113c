//! Interactive prompt layer
//!
//! Every user decision flows through the [`Prompter`] trait so the
//! reconciliation engine stays independent of any particular UI. The console
//! implementation blocks on stdin; tests script their answers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Capability for asking a human a question.
pub trait Prompter {
    /// Present a prompt and return the raw answer. `None` always means the
    /// user canceled (closed the prompt or gave an empty answer).
    fn ask(&self, title: &str, prompt: &str) -> Option<String>;
}

/// Prompter backed by stdin/stdout. One question in flight at a time.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask(&self, title: &str, prompt: &str) -> Option<String> {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "\n== {title} ==\n{prompt}");
        let _ = write!(stdout, "> ");
        let _ = stdout.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return None;
        }
        let answer = answer.trim().to_string();
        if answer.is_empty() {
            None
        } else {
            Some(answer)
        }
    }
}

/// Prompter that replays a fixed sequence of answers. Used by tests.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Option<String>>>,
}

impl ScriptedPrompter {
    /// Queue up answers in the order they will be consumed. `None` simulates
    /// a canceled prompt.
    pub fn new(answers: impl IntoIterator<Item = Option<&'static str>>) -> Self {
        Self {
            answers: RefCell::new(
                answers
                    .into_iter()
                    .map(|a| a.map(str::to_string))
                    .collect(),
            ),
        }
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, _title: &str, _prompt: &str) -> Option<String> {
        self.answers.borrow_mut().pop_front().flatten()
    }
}
