use super::deck::{Deck, Question};
use super::filters::Filters;
use super::session::SessionQuestion;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashMap;

/// Trait for different question selection strategies.
///
/// Randomness is always injected so a seeded rng reproduces the exact
/// session, question order and option order included.
pub trait QuestionSelector {
    /// Build a bounded, shuffled session list from the deck.
    /// Returns an empty list when nothing matches the filters.
    fn build_session(
        &self,
        deck: &Deck,
        filters: &Filters,
        max_questions: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<SessionQuestion>;
}

/// Draws an even quota per selected difficulty before the final shuffle, so
/// one difficulty cannot dominate by raw deck count.
///
/// The quota is `ceil(max_questions / difficulty_count)`; after the combined
/// reshuffle the final truncation may still over- or under-represent a
/// difficulty. That mix is intentional and pinned by tests.
pub struct BalancedSelector;

impl QuestionSelector for BalancedSelector {
    fn build_session(
        &self,
        deck: &Deck,
        filters: &Filters,
        max_questions: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<SessionQuestion> {
        if !filters.is_valid() || max_questions == 0 {
            return Vec::new();
        }

        let mut by_difficulty: HashMap<_, Vec<&Question>> = deck
            .questions
            .iter()
            .filter(|q| filters.matches(q))
            .map(|q| (q.difficulty, q))
            .into_group_map();

        let difficulty_count = filters.difficulties.len();
        let quota = (max_questions + difficulty_count - 1) / difficulty_count;

        let mut picked: Vec<&Question> = Vec::new();
        for difficulty in &filters.difficulties {
            if let Some(mut bucket) = by_difficulty.remove(difficulty) {
                bucket.shuffle(rng);
                bucket.truncate(quota);
                picked.append(&mut bucket);
            }
        }

        picked.shuffle(rng);
        picked.truncate(max_questions);

        picked
            .into_iter()
            .map(|q| SessionQuestion::shuffled(q.clone(), rng))
            .collect()
    }
}

/// Plain filter-shuffle-truncate selection with no difficulty balancing
/// (legacy behavior).
pub struct UniformSelector;

impl QuestionSelector for UniformSelector {
    fn build_session(
        &self,
        deck: &Deck,
        filters: &Filters,
        max_questions: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<SessionQuestion> {
        if !filters.is_valid() || max_questions == 0 {
            return Vec::new();
        }

        let mut eligible: Vec<&Question> =
            deck.questions.iter().filter(|q| filters.matches(q)).collect();

        eligible.shuffle(rng);
        eligible.truncate(max_questions);

        eligible
            .into_iter()
            .map(|q| SessionQuestion::shuffled(q.clone(), rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::filters::{Category, Difficulty};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: u32, category: Category, difficulty: Difficulty) -> Question {
        Question {
            id,
            category,
            difficulty,
            prompt: format!("question {id}"),
            code: None,
            options: vec![
                "alpha".to_string(),
                "beta".to_string(),
                "gamma".to_string(),
                "delta".to_string(),
            ],
            answer: 1,
            explanation: String::new(),
            hint: None,
        }
    }

    fn deck(questions: Vec<Question>) -> Deck {
        Deck {
            name: "test".to_string(),
            size: questions.len() as u32,
            questions,
        }
    }

    fn ids(session: &[SessionQuestion]) -> Vec<u32> {
        session.iter().map(|sq| sq.question().id).collect()
    }

    #[test]
    fn selects_every_matching_question_when_under_the_cap() {
        let deck = deck(vec![
            question(1, Category::Php, Difficulty::Easy),
            question(2, Category::Php, Difficulty::Easy),
            question(3, Category::Php, Difficulty::Easy),
            question(4, Category::MySql, Difficulty::Easy),
            question(5, Category::Php, Difficulty::Hard),
        ]);
        let filters = Filters::new([Category::Php], [Difficulty::Easy]);
        let mut rng = StdRng::seed_from_u64(7);

        let session = BalancedSelector.build_session(&deck, &filters, 10, &mut rng);

        let mut got = ids(&session);
        got.sort_unstable();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn empty_filtered_set_yields_empty_session() {
        let deck = deck(vec![question(1, Category::Php, Difficulty::Easy)]);
        let filters = Filters::new([Category::React], [Difficulty::Hard]);
        let mut rng = StdRng::seed_from_u64(7);

        let session = BalancedSelector.build_session(&deck, &filters, 10, &mut rng);
        assert!(session.is_empty());
    }

    #[test]
    fn invalid_filters_yield_empty_session() {
        let deck = deck(vec![question(1, Category::Php, Difficulty::Easy)]);
        let mut rng = StdRng::seed_from_u64(7);

        let session = BalancedSelector.build_session(&deck, &Filters::default(), 10, &mut rng);
        assert!(session.is_empty());
    }

    #[test]
    fn truncates_to_the_question_cap() {
        let questions = (0..30)
            .map(|i| question(i, Category::Php, Difficulty::Easy))
            .collect();
        let deck = deck(questions);
        let filters = Filters::new([Category::Php], [Difficulty::Easy]);
        let mut rng = StdRng::seed_from_u64(7);

        let session = BalancedSelector.build_session(&deck, &filters, 10, &mut rng);
        assert_eq!(session.len(), 10);
    }

    #[test]
    fn splits_the_quota_across_selected_difficulties() {
        // 20 easy and 20 hard available; quota is ceil(10 / 2) = 5 each, so
        // the combined pool is exactly 10 and the split must be 5/5.
        let mut questions = Vec::new();
        for i in 0..20 {
            questions.push(question(i, Category::Php, Difficulty::Easy));
            questions.push(question(100 + i, Category::Php, Difficulty::Hard));
        }
        let deck = deck(questions);
        let filters = Filters::new([Category::Php], [Difficulty::Easy, Difficulty::Hard]);
        let mut rng = StdRng::seed_from_u64(7);

        let session = BalancedSelector.build_session(&deck, &filters, 10, &mut rng);

        assert_eq!(session.len(), 10);
        let easy = session
            .iter()
            .filter(|sq| sq.question().difficulty == Difficulty::Easy)
            .count();
        assert_eq!(easy, 5);
    }

    #[test]
    fn scarce_difficulty_does_not_starve_the_session() {
        // Only one hard question exists; the easy quota still fills its side.
        let mut questions = vec![question(0, Category::Php, Difficulty::Hard)];
        for i in 1..20 {
            questions.push(question(i, Category::Php, Difficulty::Easy));
        }
        let deck = deck(questions);
        let filters = Filters::new([Category::Php], [Difficulty::Easy, Difficulty::Hard]);
        let mut rng = StdRng::seed_from_u64(7);

        let session = BalancedSelector.build_session(&deck, &filters, 10, &mut rng);

        // quota of 5 easy + 1 hard available = 6 total
        assert_eq!(session.len(), 6);
        let hard = session
            .iter()
            .filter(|sq| sq.question().difficulty == Difficulty::Hard)
            .count();
        assert_eq!(hard, 1);
    }

    #[test]
    fn same_seed_reproduces_the_session() {
        let questions = (0..30)
            .map(|i| {
                question(
                    i,
                    Category::Php,
                    if i % 2 == 0 {
                        Difficulty::Easy
                    } else {
                        Difficulty::Medium
                    },
                )
            })
            .collect();
        let deck = deck(questions);
        let filters = Filters::new([Category::Php], [Difficulty::Easy, Difficulty::Medium]);

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = BalancedSelector.build_session(&deck, &filters, 10, &mut rng_a);
        let b = BalancedSelector.build_session(&deck, &filters, 10, &mut rng_b);

        assert_eq!(ids(&a), ids(&b));
        for (qa, qb) in a.iter().zip(b.iter()) {
            assert_eq!(qa.presented_options(), qb.presented_options());
        }
    }

    #[test]
    fn every_session_question_has_a_valid_permutation() {
        let questions = (0..10)
            .map(|i| question(i, Category::Php, Difficulty::Easy))
            .collect();
        let deck = deck(questions);
        let filters = Filters::new([Category::Php], [Difficulty::Easy]);
        let mut rng = StdRng::seed_from_u64(3);

        let session = BalancedSelector.build_session(&deck, &filters, 10, &mut rng);

        for sq in &session {
            let n = sq.question().options.len();
            let mut seen: Vec<usize> = (0..n)
                .map(|presented| sq.original_index(presented).unwrap())
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());

            let correct = sq.question().answer;
            let presented = sq.presented_index_of(correct).unwrap();
            assert_eq!(sq.original_index(presented), Some(correct));
            assert!(sq.is_correct(presented));
        }
    }

    #[test]
    fn uniform_selector_ignores_difficulty_quotas() {
        // 1 easy among 19 hard; uniform selection can take any mix, but it
        // must still respect the cap and the filters.
        let mut questions = vec![question(0, Category::Php, Difficulty::Easy)];
        for i in 1..20 {
            questions.push(question(i, Category::Php, Difficulty::Hard));
        }
        let deck = deck(questions);
        let filters = Filters::new([Category::Php], [Difficulty::Easy, Difficulty::Hard]);
        let mut rng = StdRng::seed_from_u64(11);

        let session = UniformSelector.build_session(&deck, &filters, 10, &mut rng);

        assert_eq!(session.len(), 10);
        for sq in &session {
            assert!(filters.matches(sq.question()));
        }
    }

    #[test]
    fn selectors_are_usable_as_trait_objects() {
        let deck = deck(vec![question(1, Category::Php, Difficulty::Easy)]);
        let filters = Filters::new([Category::Php], [Difficulty::Easy]);

        let selectors: Vec<Box<dyn QuestionSelector>> =
            vec![Box::new(BalancedSelector), Box::new(UniformSelector)];

        for selector in selectors {
            let mut rng = StdRng::seed_from_u64(1);
            let session = selector.build_session(&deck, &filters, 5, &mut rng);
            assert_eq!(session.len(), 1);
        }
    }
}
