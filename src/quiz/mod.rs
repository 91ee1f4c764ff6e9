pub mod deck;
pub mod error;
pub mod filters;
pub mod grade;
pub mod selector;
pub mod session;

// Re-export the main types for convenience
pub use deck::{Deck, DeckError, Question};
pub use error::QuizError;
pub use filters::{Category, Difficulty, Filters};
pub use grade::{grade, GradeReport};
pub use selector::{BalancedSelector, QuestionSelector, UniformSelector};
pub use session::{Phase, Session, SessionOptions, SessionQuestion};
