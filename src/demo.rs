//! Scripted demo: the sample text types itself out, and on request it goes
//! through the same processing path as real input before opening results.

use crate::models::{Level, ProcessingResponse, ProcessingResult};
use crate::navigation::Route;
use crate::timer::{earliest, Scheduled};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEMO_TEXT: &str = "Machine Learning and Artificial Intelligence

Machine learning is a subset of artificial intelligence (AI) that provides systems the ability to automatically learn and improve from experience without being explicitly programmed. Machine learning focuses on the development of computer programs that can access data and use it to learn for themselves.

The process of learning begins with observations or data, such as examples, direct experience, or instruction, in order to look for patterns in data and make better decisions in the future based on the examples that we provide. The primary aim is to allow the computers to learn automatically without human intervention or assistance and adjust actions accordingly.

Deep Learning is a subset of machine learning that uses multi-layered artificial neural networks to deliver state-of-the-art accuracy in tasks such as object detection, speech recognition, language translation, and more.

Neural networks are computing systems inspired by the biological neural networks that constitute animal brains. Such systems learn to perform tasks by considering examples, generally without being programmed with any task-specific rules.";

pub const DEMO_LEVEL: Level = Level::HighSchool;
pub const TYPING_INTERVAL: Duration = Duration::from_millis(30);
/// Pause on the "Demo Complete!" acknowledgement before opening results.
pub const RESULTS_SETTLE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoPhase {
    Idle,
    Processing,
    Complete,
}

pub struct DemoOrchestrator {
    started: Instant,
    total_chars: usize,
    revealed: usize,
    typing: Scheduled<()>,
    phase: DemoPhase,
    open_results: Scheduled<Arc<ProcessingResult>>,
}

impl DemoOrchestrator {
    pub fn new(now: Instant) -> Self {
        let mut typing = Scheduled::new();
        typing.schedule(now + TYPING_INTERVAL, ());
        Self {
            started: now,
            total_chars: DEMO_TEXT.chars().count(),
            revealed: 0,
            typing,
            phase: DemoPhase::Idle,
            open_results: Scheduled::new(),
        }
    }

    pub fn phase(&self) -> DemoPhase {
        self.phase
    }

    pub fn typing_done(&self) -> bool {
        self.revealed >= self.total_chars
    }

    /// The part of the demo text revealed so far.
    pub fn typed(&self) -> &'static str {
        let end = DEMO_TEXT
            .char_indices()
            .nth(self.revealed)
            .map(|(i, _)| i)
            .unwrap_or(DEMO_TEXT.len());
        &DEMO_TEXT[..end]
    }

    /// Starts processing unless a run is already in flight. Returns the text
    /// and level to submit.
    pub fn trigger(&mut self) -> Option<(&'static str, Level)> {
        if self.phase == DemoPhase::Processing {
            return None;
        }
        self.phase = DemoPhase::Processing;
        self.open_results.cancel();
        Some((DEMO_TEXT, DEMO_LEVEL))
    }

    /// Records the processing outcome. A successful response schedules the
    /// move to results after [`RESULTS_SETTLE_DELAY`].
    pub fn complete(&mut self, outcome: Option<&ProcessingResponse>, now: Instant) {
        match outcome {
            Some(ProcessingResponse {
                success: true,
                data: Some(data),
                ..
            }) => {
                self.phase = DemoPhase::Complete;
                self.open_results
                    .schedule(now + RESULTS_SETTLE_DELAY, Arc::new(data.clone()));
            }
            _ => self.phase = DemoPhase::Idle,
        }
    }

    /// Advances the typing animation and returns a route once results are due.
    pub fn tick(&mut self, now: Instant) -> Option<Route> {
        if self.typing.take_due(now).is_some() {
            let elapsed = now.saturating_duration_since(self.started);
            let due = (elapsed.as_millis() / TYPING_INTERVAL.as_millis()) as usize;
            self.revealed = due.min(self.total_chars);
            if !self.typing_done() {
                let next = self.started + TYPING_INTERVAL * (self.revealed as u32 + 1);
                self.typing.schedule(next, ());
            }
        }
        self.open_results
            .take_due(now)
            .map(|result| Route::Results(Some(result)))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.typing.deadline(), self.open_results.deadline()])
    }

    /// Stops the animation and any pending move to results.
    pub fn cancel(&mut self) {
        self.typing.cancel();
        self.open_results.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_result;

    #[test]
    fn test_typing_reveals_one_char_per_interval() {
        let start = Instant::now();
        let mut demo = DemoOrchestrator::new(start);
        assert_eq!(demo.typed(), "");

        demo.tick(start + TYPING_INTERVAL);
        assert_eq!(demo.typed(), "M");

        demo.tick(start + TYPING_INTERVAL * 7);
        assert_eq!(demo.typed(), "Machine");
        assert_eq!(demo.next_deadline(), Some(start + TYPING_INTERVAL * 8));
    }

    #[test]
    fn test_typing_finishes_and_stops_scheduling() {
        let start = Instant::now();
        let mut demo = DemoOrchestrator::new(start);
        demo.tick(start + Duration::from_secs(3600));
        assert!(demo.typing_done());
        assert_eq!(demo.typed(), DEMO_TEXT);
        assert_eq!(demo.next_deadline(), None);
    }

    #[test]
    fn test_cancel_stops_typing() {
        let start = Instant::now();
        let mut demo = DemoOrchestrator::new(start);
        demo.tick(start + TYPING_INTERVAL * 3);
        demo.cancel();
        demo.tick(start + TYPING_INTERVAL * 50);
        assert_eq!(demo.typed(), "Mac");
        assert_eq!(demo.next_deadline(), None);
    }

    #[test]
    fn test_trigger_is_single_flight() {
        let mut demo = DemoOrchestrator::new(Instant::now());
        assert_eq!(demo.trigger(), Some((DEMO_TEXT, Level::HighSchool)));
        assert_eq!(demo.phase(), DemoPhase::Processing);
        assert_eq!(demo.trigger(), None);
    }

    #[test]
    fn test_success_navigates_after_settle() {
        let start = Instant::now();
        let mut demo = DemoOrchestrator::new(start);
        demo.cancel();
        demo.trigger();

        let response = ProcessingResponse {
            success: true,
            data: Some(sample_result()),
            error: None,
        };
        demo.complete(Some(&response), start);
        assert_eq!(demo.phase(), DemoPhase::Complete);

        assert_eq!(demo.tick(start + RESULTS_SETTLE_DELAY - Duration::from_millis(1)), None);
        match demo.tick(start + RESULTS_SETTLE_DELAY) {
            Some(Route::Results(Some(result))) => assert_eq!(*result, sample_result()),
            other => panic!("expected results route, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_or_unsuccessful_response_returns_to_idle() {
        let start = Instant::now();
        let mut demo = DemoOrchestrator::new(start);
        demo.cancel();

        demo.trigger();
        demo.complete(None, start);
        assert_eq!(demo.phase(), DemoPhase::Idle);

        demo.trigger();
        let response = ProcessingResponse {
            success: false,
            data: None,
            error: Some("busy".into()),
        };
        demo.complete(Some(&response), start);
        assert_eq!(demo.phase(), DemoPhase::Idle);
        assert_eq!(demo.next_deadline(), None);
    }
}
