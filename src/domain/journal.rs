//! Journal answers: four fixed reflection questions per module.

use serde::{Deserialize, Serialize};

/// One of the four fixed journal questions. Serialized as `p1`..`p4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    P1,
    P2,
    P3,
    P4,
}

impl QuestionKey {
    pub const ALL: [QuestionKey; 4] = [
        QuestionKey::P1,
        QuestionKey::P2,
        QuestionKey::P3,
        QuestionKey::P4,
    ];

    pub fn index(self) -> usize {
        match self {
            QuestionKey::P1 => 0,
            QuestionKey::P2 => 1,
            QuestionKey::P3 => 2,
            QuestionKey::P4 => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKey::P1 => "p1",
            QuestionKey::P2 => "p2",
            QuestionKey::P3 => "p3",
            QuestionKey::P4 => "p4",
        }
    }

    /// Prompt shown next to the answer field.
    pub fn prompt(self) -> &'static str {
        match self {
            QuestionKey::P1 => "What stood out to you most in this module?",
            QuestionKey::P2 => "What is one idea you want to put into practice?",
            QuestionKey::P3 => "What questions or doubts came up while reading?",
            QuestionKey::P4 => "How will you revisit this next week?",
        }
    }
}

/// Free-text answers keyed by question. Any text, including empty, is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default)]
    p1: String,
    #[serde(default)]
    p2: String,
    #[serde(default)]
    p3: String,
    #[serde(default)]
    p4: String,
}

impl JournalEntry {
    pub fn get(&self, key: QuestionKey) -> &str {
        match key {
            QuestionKey::P1 => &self.p1,
            QuestionKey::P2 => &self.p2,
            QuestionKey::P3 => &self.p3,
            QuestionKey::P4 => &self.p4,
        }
    }

    pub fn set(&mut self, key: QuestionKey, answer: impl Into<String>) {
        let slot = match key {
            QuestionKey::P1 => &mut self.p1,
            QuestionKey::P2 => &mut self.p2,
            QuestionKey::P3 => &mut self.p3,
            QuestionKey::P4 => &mut self.p4,
        };
        *slot = answer.into();
    }

    pub fn with(mut self, key: QuestionKey, answer: impl Into<String>) -> Self {
        self.set(key, answer);
        self
    }

    pub fn is_empty(&self) -> bool {
        QuestionKey::ALL.iter().all(|k| self.get(*k).is_empty())
    }
}
