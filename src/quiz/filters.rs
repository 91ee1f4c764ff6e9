use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::deck::Question;

/// Topic a question belongs to. Deck files and CLI flags both parse into this
/// closed set; free-form category strings never reach the engine.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum Category {
    #[serde(rename = "PHP")]
    #[strum(serialize = "PHP")]
    #[value(name = "php")]
    Php,
    #[serde(rename = "MySQL")]
    #[strum(serialize = "MySQL")]
    #[value(name = "mysql")]
    MySql,
    #[serde(rename = "JavaScript")]
    #[strum(serialize = "JavaScript")]
    #[value(name = "javascript")]
    JavaScript,
    #[serde(rename = "Python")]
    #[strum(serialize = "Python")]
    #[value(name = "python")]
    Python,
    #[serde(rename = "React")]
    #[strum(serialize = "React")]
    #[value(name = "react")]
    React,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Php,
        Category::MySql,
        Category::JavaScript,
        Category::Python,
        Category::React,
    ];
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

/// User-selected question filter. A session can only start once both sets are
/// non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub categories: BTreeSet<Category>,
    pub difficulties: BTreeSet<Difficulty>,
}

impl Filters {
    pub fn new<C, D>(categories: C, difficulties: D) -> Self
    where
        C: IntoIterator<Item = Category>,
        D: IntoIterator<Item = Difficulty>,
    {
        Self {
            categories: categories.into_iter().collect(),
            difficulties: difficulties.into_iter().collect(),
        }
    }

    /// Every category and difficulty selected; backs the menu's
    /// "quiz me on everything" shortcut.
    pub fn all() -> Self {
        Self::new(Category::ALL, Difficulty::ALL)
    }

    pub fn is_valid(&self) -> bool {
        !self.categories.is_empty() && !self.difficulties.is_empty()
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.categories.contains(&question.category)
            && self.difficulties.contains(&question.difficulty)
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        if !self.difficulties.remove(&difficulty) {
            self.difficulties.insert(difficulty);
        }
    }

    /// "PHP+MySQL"-style label, used by the result log and the menu footer.
    pub fn category_label(&self) -> String {
        self.categories
            .iter()
            .map(Category::to_string)
            .collect::<Vec<_>>()
            .join("+")
    }

    pub fn difficulty_label(&self) -> String {
        self.difficulties
            .iter()
            .map(Difficulty::to_string)
            .collect::<Vec<_>>()
            .join("+")
    }
}
