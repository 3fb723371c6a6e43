//! Outputs handed back to the messaging transport.

use serde::{Deserialize, Serialize};

use crate::event::Command;

/// One labeled choice rendered as an inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub command: Command,
}

impl Choice {
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }
}

/// A prompt to display: text plus an optional ordered choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl Prompt {
    /// A plain text prompt without choices.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// A prompt with inline choices.
    pub fn with_choices(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}

/// The delivered result of a successful finalize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedContract {
    /// Suggested filename for delivery to the user.
    pub filename: String,
    /// Reference into the document store.
    pub file_ref: String,
    /// Derived total including VAT.
    pub total_sum: f64,
    /// Persisted summary row id; `None` when the write failed (the document
    /// is still delivered).
    pub record_id: Option<i64>,
}

/// The service's answer to one session event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Display the next prompt.
    Prompt { prompt: Prompt },
    /// Input was rejected; re-display the current prompt.
    Rejected {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        prompt: Option<Prompt>,
    },
    /// A collaborator call failed; the session is unchanged and finish may be
    /// retried.
    Failed { message: String, prompt: Prompt },
    /// The contract was generated; the session is complete and cleared.
    Completed { contract: CompletedContract },
}
