// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The session state machine.
//!
//! A session moves through `Setup → Loading → Quiz → Summary`, with `Error`
//! as the exit from `Loading` when generation fails. The quiz itself has
//! two sub-phases: `Study`, where the learner flips through the cards, and
//! `Test`, where they type the target word for each card.
//!
//! Each phase owns exactly the state it needs. Transitions consume the old
//! phase and produce the new one.

use crate::types::flashcard::Flashcard;
use crate::types::settings::Settings;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Phase {
    /// The setup form is shown.
    #[default]
    Setup,
    /// Waiting for the generator. `ticket` identifies the outstanding
    /// request.
    Loading { ticket: u64, settings: Settings },
    Quiz(Quiz),
    Summary(Summary),
    /// Generation failed. The message is shown to the learner.
    Error { message: String },
}

impl Phase {
    pub fn flip(&mut self) {
        if let Phase::Quiz(Quiz::Study(study)) = self {
            study.flip();
        }
    }

    pub fn prev(&mut self) {
        if let Phase::Quiz(Quiz::Study(study)) = self {
            study.prev();
        }
    }

    /// Go to the next study card. At the last card, start the test.
    pub fn next(self) -> Phase {
        match self {
            Phase::Quiz(Quiz::Study(mut study)) => {
                if study.next() {
                    Phase::Quiz(Quiz::Study(study))
                } else {
                    Phase::Quiz(Quiz::Test(study.start_test()))
                }
            }
            other => other,
        }
    }

    pub fn start_test(self) -> Phase {
        match self {
            Phase::Quiz(Quiz::Study(study)) => Phase::Quiz(Quiz::Test(study.start_test())),
            other => other,
        }
    }

    pub fn set_answer(&mut self, answer: &str) -> bool {
        match self {
            Phase::Quiz(Quiz::Test(test)) => test.set_answer(answer),
            _ => false,
        }
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        match self {
            Phase::Quiz(Quiz::Test(test)) => test.insert_char(c),
            _ => false,
        }
    }

    pub fn check_answer(&mut self) -> Option<Feedback> {
        match self {
            Phase::Quiz(Quiz::Test(test)) => test.check_answer(),
            _ => None,
        }
    }

    /// Continue past the feedback. After the last card, the session ends.
    pub fn advance(self) -> Phase {
        match self {
            Phase::Quiz(Quiz::Test(mut test)) => match test.advance() {
                Some(summary) => Phase::Summary(summary),
                None => Phase::Quiz(Quiz::Test(test)),
            },
            other => other,
        }
    }

    pub fn is_quiz(&self) -> bool {
        matches!(self, Phase::Quiz(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Quiz {
    Study(Study),
    Test(Test),
}

/// Sequential review of the cards, without scoring.
#[derive(Clone, Debug, PartialEq)]
pub struct Study {
    cards: Vec<Flashcard>,
    index: usize,
    /// Whether the current card shows its back.
    flipped: bool,
}

impl Study {
    /// Start studying. The card list must not be empty; `App` only enters
    /// study with generated or cached cards it has checked.
    pub(crate) fn new(cards: Vec<Flashcard>) -> Self {
        debug_assert!(!cards.is_empty());
        Self {
            cards,
            index: 0,
            flipped: false,
        }
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.cards.len()
    }

    pub fn progress(&self) -> f64 {
        progress(self.index, self.cards.len())
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move to the next card. Returns false, and does nothing, at the last
    /// card.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.flipped = false;
        true
    }

    pub fn prev(&mut self) {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
        }
    }

    pub fn start_test(self) -> Test {
        Test::new(self.cards)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    /// The answer was wrong. The view reveals the target word.
    Incorrect,
}

/// The recall quiz: the learner is shown the translation and types the
/// target word.
#[derive(Clone, Debug, PartialEq)]
pub struct Test {
    cards: Vec<Flashcard>,
    index: usize,
    answer: String,
    /// Set once the current answer has been checked. While set, the answer
    /// is locked.
    feedback: Option<Feedback>,
    /// Whether each checked card was answered correctly, in card order.
    results: Vec<bool>,
}

impl Test {
    fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            answer: String::new(),
            feedback: None,
            results: Vec::new(),
        }
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn is_locked(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn progress(&self) -> f64 {
        progress(self.index, self.cards.len())
    }

    /// The number of correct answers so far.
    pub fn score(&self) -> usize {
        self.results.iter().filter(|correct| **correct).count()
    }

    pub fn set_answer(&mut self, answer: &str) -> bool {
        if self.is_locked() {
            return false;
        }
        self.answer = answer.to_string();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        if self.is_locked() {
            return false;
        }
        self.answer.push(c);
        true
    }

    /// Check the typed answer against the current card. Blank answers are
    /// ignored, as is checking twice.
    pub fn check_answer(&mut self) -> Option<Feedback> {
        if self.is_locked() || self.answer.trim().is_empty() {
            return None;
        }
        let correct = self.current().accepts(&self.answer);
        self.results.push(correct);
        let feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.feedback = Some(feedback);
        Some(feedback)
    }

    /// Clear the feedback and move on. Returns the summary when this was the
    /// last card. Does nothing until the current answer has been checked.
    pub fn advance(&mut self) -> Option<Summary> {
        if !self.is_locked() {
            return None;
        }
        self.feedback = None;
        self.answer.clear();
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            None
        } else {
            Some(Summary {
                score: self.score(),
                total: self.cards.len(),
            })
        }
    }
}

/// The result of a completed test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
}

fn progress(index: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        index as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Flashcard> {
        vec![
            Flashcard::new("kissa", "cat", "KIS-sah", "Kissa nukkuu.", "The cat is sleeping."),
            Flashcard::new("koira", "dog", "KOI-rah", "Koira haukkuu.", "The dog barks."),
            Flashcard::new("lintu", "bird", "LIN-too", "Lintu laulaa.", "The bird sings."),
        ]
    }

    fn test_phase(phase: &Phase) -> &Test {
        match phase {
            Phase::Quiz(Quiz::Test(test)) => test,
            other => panic!("expected test phase, got {other:?}"),
        }
    }

    fn study_phase(phase: &Phase) -> &Study {
        match phase {
            Phase::Quiz(Quiz::Study(study)) => study,
            other => panic!("expected study phase, got {other:?}"),
        }
    }

    fn answer_all(mut phase: Phase, answers: &[&str]) -> Phase {
        for answer in answers {
            assert!(phase.set_answer(answer));
            assert!(phase.check_answer().is_some());
            phase = phase.advance();
        }
        phase
    }

    #[test]
    fn test_study_navigation() {
        let mut study = Study::new(cards());
        assert_eq!(study.index(), 0);
        assert!(study.is_first());
        study.prev();
        assert_eq!(study.index(), 0);
        study.flip();
        assert!(study.is_flipped());
        assert!(study.next());
        assert_eq!(study.index(), 1);
        assert!(!study.is_flipped());
        study.flip();
        study.prev();
        assert_eq!(study.index(), 0);
        assert!(!study.is_flipped());
        assert!(study.next());
        assert!(study.next());
        assert!(study.is_last());
        assert!(!study.next());
        assert_eq!(study.index(), 2);
    }

    #[test]
    fn test_flip_toggles() {
        let mut study = Study::new(cards());
        study.flip();
        study.flip();
        assert!(!study.is_flipped());
    }

    #[test]
    fn test_progress() {
        let mut study = Study::new(cards());
        assert_eq!(study.progress(), 0.0);
        study.next();
        assert!((study.progress() - 1.0 / 3.0).abs() < 1e-9);
        let phase = Phase::Quiz(Quiz::Study(study)).start_test();
        assert_eq!(test_phase(&phase).progress(), 0.0);
    }

    #[test]
    fn test_next_at_last_card_starts_test() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards())));
        phase = phase.next();
        phase = phase.next();
        assert_eq!(study_phase(&phase).index(), 2);
        phase = phase.next();
        let test = test_phase(&phase);
        assert_eq!(test.index(), 0);
        assert_eq!(test.score(), 0);
        assert_eq!(test.answer(), "");
        assert_eq!(test.feedback(), None);
    }

    #[test]
    fn test_check_blank_answer_is_noop() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        assert_eq!(phase.check_answer(), None);
        phase.set_answer("   ");
        assert_eq!(phase.check_answer(), None);
        assert!(!test_phase(&phase).is_locked());
    }

    #[test]
    fn test_correct_answer() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        phase.set_answer("KISSA  ");
        assert_eq!(phase.check_answer(), Some(Feedback::Correct));
        assert_eq!(test_phase(&phase).score(), 1);
    }

    #[test]
    fn test_incorrect_answer() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        phase.set_answer("koira");
        assert_eq!(phase.check_answer(), Some(Feedback::Incorrect));
        let test = test_phase(&phase);
        assert_eq!(test.score(), 0);
        assert_eq!(test.current().target_word(), "kissa");
    }

    #[test]
    fn test_answer_locked_after_feedback() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        phase.set_answer("kissa");
        phase.check_answer();
        assert!(!phase.set_answer("koira"));
        assert!(!phase.insert_char('ä'));
        assert_eq!(phase.check_answer(), None);
        let test = test_phase(&phase);
        assert_eq!(test.answer(), "kissa");
        assert_eq!(test.score(), 1);
    }

    #[test]
    fn test_insert_char() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        phase.set_answer("p");
        assert!(phase.insert_char('ö'));
        assert_eq!(test_phase(&phase).answer(), "pö");
    }

    #[test]
    fn test_advance_requires_feedback() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        phase.set_answer("kissa");
        phase = phase.advance();
        let test = test_phase(&phase);
        assert_eq!(test.index(), 0);
        assert_eq!(test.answer(), "kissa");
    }

    #[test]
    fn test_advance_clears_input() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        phase.set_answer("kissa");
        phase.check_answer();
        phase = phase.advance();
        let test = test_phase(&phase);
        assert_eq!(test.index(), 1);
        assert_eq!(test.answer(), "");
        assert_eq!(test.feedback(), None);
    }

    #[test]
    fn test_all_correct() {
        let phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        let phase = answer_all(phase, &["kissa", " Koira", "LINTU "]);
        assert_eq!(phase, Phase::Summary(Summary { score: 3, total: 3 }));
    }

    #[test]
    fn test_all_wrong() {
        let phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        let phase = answer_all(phase, &["a", "b", "c"]);
        assert_eq!(phase, Phase::Summary(Summary { score: 0, total: 3 }));
    }

    #[test]
    fn test_last_card_counted_once() {
        let phase = Phase::Quiz(Quiz::Study(Study::new(cards()))).start_test();
        let phase = answer_all(phase, &["x", "y", "lintu"]);
        assert_eq!(phase, Phase::Summary(Summary { score: 1, total: 3 }));
    }

    #[test]
    fn test_single_card() {
        let mut phase = Phase::Quiz(Quiz::Study(Study::new(cards()[..1].to_vec())));
        phase = phase.next();
        let phase = answer_all(phase, &["kissa"]);
        assert_eq!(phase, Phase::Summary(Summary { score: 1, total: 1 }));
    }

    #[test]
    fn test_events_outside_quiz_are_ignored() {
        let mut phase = Phase::Setup;
        phase.flip();
        phase.prev();
        assert!(!phase.set_answer("kissa"));
        assert_eq!(phase.check_answer(), None);
        let phase = phase.next().advance().start_test();
        assert_eq!(phase, Phase::Setup);
    }
}
