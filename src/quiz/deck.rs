use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use super::filters::{Category, Difficulty};

static DECK_DIR: Dir = include_dir!("src/decks");

/// A single multiple-choice question as authored in a deck file.
///
/// `answer` indexes into `options` in authored order; sessions present the
/// options in a shuffled order and map back through a permutation.
#[derive(Deserialize, Clone, Debug)]
pub struct Question {
    pub id: u32,
    pub category: Category,
    pub difficulty: Difficulty,
    pub prompt: String,
    #[serde(default)]
    pub code: Option<String>,
    pub options: Vec<String>,
    pub answer: usize,
    pub explanation: String,
    #[serde(default)]
    pub hint: Option<String>,
}

/// An immutable question corpus, embedded at compile time.
#[derive(Deserialize, Clone, Debug)]
pub struct Deck {
    pub name: String,
    pub size: u32,
    pub questions: Vec<Question>,
}

#[derive(Debug)]
pub enum DeckError {
    NotFound(String),
    NotUtf8(String),
    Parse(serde_json::Error),
    Invalid { id: u32, reason: String },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::NotFound(name) => write!(f, "deck file not found: {name}"),
            DeckError::NotUtf8(name) => write!(f, "deck file is not valid utf-8: {name}"),
            DeckError::Parse(err) => write!(f, "unable to parse deck: {err}"),
            DeckError::Invalid { id, reason } => write!(f, "invalid question {id}: {reason}"),
        }
    }
}

impl Error for DeckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeckError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl Deck {
    /// The interview deck shipped with the binary. The embedded file is
    /// validated by the test suite, so failing to load it is a build defect.
    pub fn builtin() -> Self {
        Self::load("interview.json").expect("embedded deck is valid")
    }

    pub fn load(file_name: &str) -> Result<Deck, DeckError> {
        let file = DECK_DIR
            .get_file(file_name)
            .ok_or_else(|| DeckError::NotFound(file_name.to_string()))?;

        let text = file
            .contents_utf8()
            .ok_or_else(|| DeckError::NotUtf8(file_name.to_string()))?;

        let deck: Deck = from_str(text).map_err(DeckError::Parse)?;
        deck.validate()?;

        Ok(deck)
    }

    /// Checks the per-question invariants: at least two options, a correct
    /// answer that indexes into them, and unique ids across the deck.
    pub fn validate(&self) -> Result<(), DeckError> {
        let mut seen = BTreeSet::new();

        for question in &self.questions {
            if question.options.len() < 2 {
                return Err(DeckError::Invalid {
                    id: question.id,
                    reason: format!("needs at least 2 options, has {}", question.options.len()),
                });
            }
            if question.answer >= question.options.len() {
                return Err(DeckError::Invalid {
                    id: question.id,
                    reason: format!(
                        "answer index {} out of range for {} options",
                        question.answer,
                        question.options.len()
                    ),
                });
            }
            if !seen.insert(question.id) {
                return Err(DeckError::Invalid {
                    id: question.id,
                    reason: "duplicate id".to_string(),
                });
            }
        }

        Ok(())
    }
}
