//! Interactive question collection.
//!
//! Each migrator declares an ordered list of [`Question`]s. [`Asker`] asks
//! them through a [`Prompter`], shows a summary and starts over until the
//! operator confirms it.

mod terminal;
pub mod ui;

pub use terminal::{AcceptDefaults, TerminalPrompter};

use std::collections::HashMap;

use crate::error::{Error, Result};

const SECRET_MASK: &str = "********";

/// Line-oriented terminal access.
pub trait Prompter: Send {
    /// Reads one answer. An empty string means "use the default".
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if input cannot be read.
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String>;

    /// Reads an answer without echoing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if input cannot be read.
    fn ask_secret(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt, "")
    }

    /// Asks a yes/no question where only an explicit "no" rejects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if input cannot be read.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Shows informational text.
    fn show(&mut self, text: &str) {
        println!("{text}");
    }
}

/// One question asked before a migration starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Key the answer is stored under.
    pub key: &'static str,
    /// Text shown to the operator.
    pub prompt: &'static str,
    /// Answer used when the operator enters nothing.
    pub default: String,
    /// Read without echo and masked in the summary.
    pub secret: bool,
}

impl Question {
    /// Creates a visible question.
    pub fn new(key: &'static str, prompt: &'static str, default: impl Into<String>) -> Self {
        Self {
            key,
            prompt,
            default: default.into(),
            secret: false,
        }
    }

    /// Marks the question as secret.
    #[must_use]
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// Answers collected by an [`Asker`], keyed by question key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: HashMap<String, String>,
}

impl Answers {
    /// Builds answers from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Answer for `key`, if that question was asked.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Answer for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the question was never asked.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::Config(format!("no answer for '{}'", key)))
    }

    /// Whether an answer is a case-insensitive "y".
    #[must_use]
    pub fn is_yes(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("y"))
    }
}

/// Asks an ordered list of questions until the operator confirms.
#[derive(Debug, Clone)]
pub struct Asker {
    questions: Vec<Question>,
}

impl Asker {
    /// Creates an asker for `questions`, asked in order.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Replaces defaults with configured values, matched by question key.
    #[must_use]
    pub fn with_defaults(mut self, overrides: Option<&HashMap<String, String>>) -> Self {
        if let Some(overrides) = overrides {
            for question in &mut self.questions {
                if let Some(value) = overrides.get(question.key) {
                    question.default.clone_from(value);
                }
            }
        }
        self
    }

    /// Questions in the order they are asked.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Asks every question, then the confirmation; repeats on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if the prompter fails.
    pub fn collect(&self, prompter: &mut dyn Prompter) -> Result<Answers> {
        loop {
            let mut values = HashMap::with_capacity(self.questions.len());
            for question in &self.questions {
                let answer = if question.secret {
                    prompter.ask_secret(question.prompt)?
                } else {
                    prompter.ask(question.prompt, &question.default)?
                };
                let answer = if answer.is_empty() {
                    question.default.clone()
                } else {
                    answer
                };
                values.insert(question.key.to_string(), answer);
            }
            let answers = Answers { values };

            prompter.show(&self.summary(&answers));
            if prompter.confirm("Is this information correct?")? {
                return Ok(answers);
            }
        }
    }

    /// Summary of the answers, prompts aligned in one column.
    #[must_use]
    pub fn summary(&self, answers: &Answers) -> String {
        let width = self
            .questions
            .iter()
            .map(|q| q.prompt.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::from("\nSummary:\n");
        for question in &self.questions {
            let value = answers.get(question.key).unwrap_or_default();
            let shown = if question.secret && !value.is_empty() {
                SECRET_MASK
            } else {
                value
            };
            out.push_str(&format!(
                "    {:<width$} : {}\n",
                question.prompt,
                shown,
                width = width
            ));
        }
        out
    }
}
