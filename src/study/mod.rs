//! Interactive study materials: tabbed summary, quiz and flashcards over one
//! immutable result. The live results page and the saved-history detail page
//! both drive a [`StudyView`].

pub mod deck;
pub mod export;
pub mod narration;
pub mod quiz;

pub use deck::{DeckMachine, SETTLE_DELAY};
pub use export::{export_document, write_export, ExportDocument, ExportQuestion};
pub use narration::{pick_voice, CommandSpeech, NarrationState, Narrator, SpeechEngine, Voice};
pub use quiz::{OptionMark, QuizMachine, AUTO_ADVANCE_DELAY};

use crate::models::ProcessingResult;
use crate::timer::earliest;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyTab {
    Summary,
    Quiz,
    Flashcards,
}

impl StudyTab {
    pub const ALL: [StudyTab; 3] = [StudyTab::Summary, StudyTab::Quiz, StudyTab::Flashcards];

    pub fn label(&self) -> &'static str {
        match self {
            StudyTab::Summary => "Summary",
            StudyTab::Quiz => "Quiz",
            StudyTab::Flashcards => "Flashcards",
        }
    }
}

/// Whether the quiz tab runs question by question or lists every answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    Interactive,
    Review,
}

pub struct StudyView {
    result: Arc<ProcessingResult>,
    active: StudyTab,
    mode: QuizMode,
    pub quiz: QuizMachine,
    pub deck: DeckMachine,
    narrator: Narrator,
}

impl StudyView {
    pub fn new(result: Arc<ProcessingResult>, engine: Box<dyn SpeechEngine>) -> Self {
        Self::with_mode(result, engine, QuizMode::Interactive)
    }

    pub fn with_mode(
        result: Arc<ProcessingResult>,
        engine: Box<dyn SpeechEngine>,
        mode: QuizMode,
    ) -> Self {
        Self {
            quiz: QuizMachine::new(&result.quiz),
            deck: DeckMachine::new(result.flashcards.len()),
            narrator: Narrator::new(engine),
            active: StudyTab::Summary,
            mode,
            result,
        }
    }

    pub fn result(&self) -> &Arc<ProcessingResult> {
        &self.result
    }

    pub fn active(&self) -> StudyTab {
        self.active
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn is_available(&self, tab: StudyTab) -> bool {
        match tab {
            StudyTab::Summary => true,
            StudyTab::Quiz => !self.result.quiz.is_empty(),
            StudyTab::Flashcards => !self.result.flashcards.is_empty(),
        }
    }

    /// Switches tabs; a tab with nothing behind it cannot be selected.
    pub fn select_tab(&mut self, tab: StudyTab) -> bool {
        if !self.is_available(tab) {
            return false;
        }
        self.active = tab;
        true
    }

    /// Moves to the next (or previous) available tab, wrapping around.
    pub fn cycle_tab(&mut self, forward: bool) {
        let tabs = StudyTab::ALL;
        let start = tabs.iter().position(|t| *t == self.active).unwrap_or(0);
        for step in 1..tabs.len() {
            let i = if forward {
                (start + step) % tabs.len()
            } else {
                (start + tabs.len() - step) % tabs.len()
            };
            if self.select_tab(tabs[i]) {
                return;
            }
        }
    }

    pub fn select_answer(&mut self, option: usize, now: Instant) -> bool {
        self.mode == QuizMode::Interactive
            && self.active == StudyTab::Quiz
            && self.quiz.select_answer(option, now)
    }

    pub fn toggle_narration(&mut self) -> std::io::Result<NarrationState> {
        let summary = self.result.summary.clone();
        self.narrator.toggle(&summary)
    }

    /// Polls the speech backend so a finished utterance flips back to idle.
    pub fn narration(&mut self) -> NarrationState {
        self.narrator.poll()
    }

    pub fn narration_state(&self) -> NarrationState {
        self.narrator.state()
    }

    pub fn export(&self) -> ExportDocument {
        export_document(&self.result)
    }

    /// Fires whatever delayed steps have come due. Returns whether anything
    /// visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let quiz = self.quiz.tick(now);
        let deck = self.deck.tick(now);
        quiz || deck
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.quiz.next_deadline(), self.deck.next_deadline()])
    }

    /// Drops every pending step and stops narration.
    pub fn teardown(&mut self) {
        self.quiz.cancel_pending();
        self.deck.cancel_pending();
        self.narrator.stop();
    }
}
