use rand::seq::SliceRandom;
use rand::RngCore;

use super::deck::{Deck, Question};
use super::error::QuizError;
use super::filters::Filters;
use super::grade::{grade, GradeReport};
use super::selector::{BalancedSelector, QuestionSelector, UniformSelector};

pub const DEFAULT_MAX_QUESTIONS: usize = 10;
pub const DEFAULT_HINT_BUDGET: usize = 3;

/// Knobs fixed at session-creation time.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub max_questions: usize,
    pub hint_budget: usize,
    /// Balanced selection draws an even quota per difficulty; uniform is the
    /// plain shuffle-and-truncate legacy behavior.
    pub balanced: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            hint_budget: DEFAULT_HINT_BUDGET,
            balanced: true,
        }
    }
}

/// Discrete state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectingFilters,
    InProgress,
    NoQuestionsAvailable,
    Complete,
}

/// A deck question plus its session-local option order.
///
/// `order[presented] == original`: the permutation maps the position an
/// option is displayed at back to its authored index, so correctness checks
/// always run against the deck's `answer` field.
#[derive(Debug, Clone)]
pub struct SessionQuestion {
    question: Question,
    order: Vec<usize>,
}

impl SessionQuestion {
    pub fn shuffled(question: Question, rng: &mut dyn RngCore) -> Self {
        let mut order: Vec<usize> = (0..question.options.len()).collect();
        order.shuffle(rng);
        Self { question, order }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn option_count(&self) -> usize {
        self.order.len()
    }

    /// Options in presentation order.
    pub fn presented_options(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|&original| self.question.options[original].as_str())
            .collect()
    }

    /// Maps a presented position back to the authored option index.
    pub fn original_index(&self, presented: usize) -> Option<usize> {
        self.order.get(presented).copied()
    }

    /// Where a given authored option ended up on screen.
    pub fn presented_index_of(&self, original: usize) -> Option<usize> {
        self.order.iter().position(|&o| o == original)
    }

    pub fn is_correct(&self, presented: usize) -> bool {
        self.original_index(presented) == Some(self.question.answer)
    }

    /// Presented position of the correct answer; used by the UI to highlight
    /// it after the user has answered.
    pub fn correct_presented_index(&self) -> usize {
        self.presented_index_of(self.question.answer)
            .unwrap_or_default()
    }
}

/// The quiz session state machine.
///
/// All operations are synchronous state transitions with no I/O. Invalid
/// intents (answering twice, hinting at zero budget, advancing without an
/// answer) are no-ops rather than errors; the only failing operation is
/// `start` with empty filters.
#[derive(Debug)]
pub struct Session {
    deck: Deck,
    options: SessionOptions,
    filters: Filters,
    questions: Vec<SessionQuestion>,
    current: usize,
    score: usize,
    answers: Vec<usize>,
    hints_remaining: usize,
    selected: Option<usize>,
    hint_revealed: bool,
    phase: Phase,
}

impl Session {
    pub fn new(deck: Deck, options: SessionOptions) -> Self {
        let hint_budget = options.hint_budget;
        Self {
            deck,
            options,
            filters: Filters::default(),
            questions: Vec::new(),
            current: 0,
            score: 0,
            answers: Vec::new(),
            hints_remaining: hint_budget,
            selected: None,
            hint_revealed: false,
            phase: Phase::SelectingFilters,
        }
    }

    /// Starts a quiz run. Fails with `InvalidFilters` (and no state change)
    /// when either filter set is empty; lands in `NoQuestionsAvailable` when
    /// the filters match nothing in the deck.
    pub fn start(&mut self, filters: Filters, rng: &mut dyn RngCore) -> Result<(), QuizError> {
        if !filters.is_valid() {
            return Err(QuizError::InvalidFilters);
        }

        let selector: Box<dyn QuestionSelector> = if self.options.balanced {
            Box::new(BalancedSelector)
        } else {
            Box::new(UniformSelector)
        };
        let questions =
            selector.build_session(&self.deck, &filters, self.options.max_questions, rng);

        self.filters = filters;
        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.hints_remaining = self.options.hint_budget;
        self.selected = None;
        self.hint_revealed = false;
        self.phase = if self.questions.is_empty() {
            Phase::NoQuestionsAvailable
        } else {
            Phase::InProgress
        };

        Ok(())
    }

    /// Records an answer for the current question, at most once. Repeat
    /// calls and out-of-range presented indices are no-ops.
    pub fn answer(&mut self, presented: usize) {
        if self.phase != Phase::InProgress || self.selected.is_some() {
            return;
        }
        let Some(sq) = self.questions.get(self.current) else {
            return;
        };
        let Some(original) = sq.original_index(presented) else {
            return;
        };

        if original == sq.question().answer {
            self.score += 1;
        }
        self.answers.push(original);
        self.selected = Some(presented);
    }

    /// Spends one hint from the session budget for the current question.
    /// No-op once answered, once already revealed, or at zero budget.
    pub fn use_hint(&mut self) {
        if self.phase != Phase::InProgress
            || self.selected.is_some()
            || self.hint_revealed
            || self.hints_remaining == 0
        {
            return;
        }
        self.hints_remaining -= 1;
        self.hint_revealed = true;
    }

    /// Moves to the next question, or to `Complete` after the last one.
    /// Requires the current question to be answered. The hint budget
    /// persists; per-question transients reset.
    pub fn advance(&mut self) {
        if self.phase != Phase::InProgress || self.selected.is_none() {
            return;
        }
        if self.current + 1 == self.questions.len() {
            self.phase = Phase::Complete;
        } else {
            self.current += 1;
            self.selected = None;
            self.hint_revealed = false;
        }
    }

    /// Discards the run and returns to filter selection with empty filters.
    /// Valid from any phase.
    pub fn reset(&mut self) {
        self.filters = Filters::default();
        self.questions.clear();
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.hints_remaining = self.options.hint_budget;
        self.selected = None;
        self.hint_revealed = false;
        self.phase = Phase::SelectingFilters;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_question(&self) -> Option<&SessionQuestion> {
        if self.phase == Phase::InProgress {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn hints_remaining(&self) -> usize {
        self.hints_remaining
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Presented index the user picked for the current question.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    /// Authored option indices chosen so far, in question order.
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 1-based position and total, for "Question 3 of 10" headers.
    pub fn progress(&self) -> (usize, usize) {
        if self.questions.is_empty() {
            (0, 0)
        } else {
            ((self.current + 1).min(self.questions.len()), self.questions.len())
        }
    }

    /// Graded result, only once the session is complete. Graded against the
    /// number of questions actually presented.
    pub fn final_result(&self) -> Option<GradeReport> {
        if self.phase == Phase::Complete {
            Some(grade(self.score, self.questions.len()))
        } else {
            None
        }
    }
}
