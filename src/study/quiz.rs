use crate::models::QuizItem;
use crate::timer::Scheduled;
use std::time::{Duration, Instant};

/// Time an answered question stays revealed before the next one appears.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(5000);

/// How an option is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AnswerKey {
    options: usize,
    correct: usize,
}

/// Question progression with a timed reveal.
///
/// After the last question is answered the machine stays revealed; there is
/// no separate completion state.
#[derive(Debug, Clone)]
pub struct QuizMachine {
    keys: Vec<AnswerKey>,
    current: usize,
    selected: Option<usize>,
    revealed: bool,
    advance: Scheduled<()>,
}

impl QuizMachine {
    pub fn new(items: &[QuizItem]) -> Self {
        Self {
            keys: items
                .iter()
                .map(|item| AnswerKey {
                    options: item.options.len(),
                    correct: item.correct_index,
                })
                .collect(),
            current: 0,
            selected: None,
            revealed: false,
            advance: Scheduled::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.keys.len()
    }

    /// Answers the current question. Ignored once the question is revealed or
    /// when `option` does not exist. Returns whether the answer was taken.
    pub fn select_answer(&mut self, option: usize, now: Instant) -> bool {
        let Some(key) = self.keys.get(self.current) else {
            return false;
        };
        if self.revealed || option >= key.options {
            return false;
        }

        self.selected = Some(option);
        self.revealed = true;
        if !self.is_last() {
            self.advance.schedule(now + AUTO_ADVANCE_DELAY, ());
        }
        true
    }

    /// Applies a due auto-advance. Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.advance.take_due(now).is_none() {
            return false;
        }
        if self.is_last() {
            return false;
        }
        self.current += 1;
        self.selected = None;
        self.revealed = false;
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.advance.deadline()
    }

    pub fn cancel_pending(&mut self) {
        self.advance.cancel();
    }

    pub fn mark(&self, option: usize) -> OptionMark {
        let Some(key) = self.keys.get(self.current) else {
            return OptionMark::Neutral;
        };
        if !self.revealed {
            return OptionMark::Neutral;
        }
        if option == key.correct {
            OptionMark::Correct
        } else if self.selected == Some(option) {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }

    /// Whether the revealed answer was right; `None` before reveal.
    pub fn answered_correctly(&self) -> Option<bool> {
        let key = self.keys.get(self.current)?;
        if !self.revealed {
            return None;
        }
        Some(self.selected == Some(key.correct))
    }
}
