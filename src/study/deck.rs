use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Pause between flipping a card face-down and moving to the next one.
pub const SETTLE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
}

/// Flashcard paging with a flip flag. Paging always unflips first and moves
/// after [`SETTLE_DELAY`]. Every request moves one card; rapid presses queue
/// up and apply in order as each comes due.
#[derive(Debug, Clone)]
pub struct DeckMachine {
    len: usize,
    current: usize,
    flipped: bool,
    pending: VecDeque<(Instant, Step)>,
}

impl DeckMachine {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            flipped: false,
            pending: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        if self.len > 0 {
            self.flipped = !self.flipped;
        }
    }

    pub fn next(&mut self, now: Instant) {
        self.page(Step::Next, now);
    }

    pub fn previous(&mut self, now: Instant) {
        self.page(Step::Previous, now);
    }

    fn page(&mut self, step: Step, now: Instant) {
        if self.len == 0 {
            return;
        }
        self.flipped = false;
        self.pending.push_back((now + SETTLE_DELAY, step));
    }

    /// Applies every page move that has come due. Returns whether any moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut moved = false;
        while let Some(&(at, step)) = self.pending.front() {
            if at > now {
                break;
            }
            self.pending.pop_front();
            self.current = match step {
                Step::Next => (self.current + 1) % self.len,
                Step::Previous => (self.current + self.len - 1) % self.len,
            };
            moved = true;
        }
        moved
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.front().map(|(at, _)| *at)
    }

    pub fn cancel_pending(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_wraps_to_last() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(4);
        deck.previous(now);
        assert_eq!(deck.current(), 0);

        assert!(deck.tick(now + SETTLE_DELAY));
        assert_eq!(deck.current(), 3);
    }

    #[test]
    fn test_next_wraps_to_first() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(4);
        deck.previous(now);
        deck.tick(now + SETTLE_DELAY);

        deck.next(now + SETTLE_DELAY);
        deck.tick(now + SETTLE_DELAY * 2);
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn test_paging_unflips_immediately() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(3);
        deck.flip();
        assert!(deck.flipped());

        deck.next(now);
        assert!(!deck.flipped());
        assert_eq!(deck.current(), 0);
        assert!(!deck.tick(now + SETTLE_DELAY - Duration::from_millis(1)));
        assert!(deck.tick(now + SETTLE_DELAY));
        assert_eq!(deck.current(), 1);
    }

    #[test]
    fn test_flip_does_not_move() {
        let mut deck = DeckMachine::new(3);
        deck.flip();
        deck.flip();
        assert!(!deck.flipped());
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn test_single_card_deck_still_settles() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(1);
        deck.flip();
        deck.next(now);
        assert!(!deck.flipped());
        assert!(deck.next_deadline().is_some());
        assert!(deck.tick(now + SETTLE_DELAY));
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn test_rapid_presses_each_move_one_card() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(4);
        deck.next(now);
        deck.next(now + Duration::from_millis(50));

        assert!(deck.tick(now + SETTLE_DELAY));
        assert_eq!(deck.current(), 1);
        assert_eq!(
            deck.next_deadline(),
            Some(now + Duration::from_millis(50) + SETTLE_DELAY)
        );
        assert!(deck.tick(now + Duration::from_secs(1)));
        assert_eq!(deck.current(), 2);
        assert!(!deck.tick(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_late_tick_applies_all_due_moves() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(4);
        deck.next(now);
        deck.next(now + Duration::from_millis(10));
        deck.previous(now + Duration::from_millis(20));
        deck.previous(now + Duration::from_millis(30));
        deck.previous(now + Duration::from_millis(40));

        assert!(deck.tick(now + Duration::from_secs(1)));
        assert_eq!(deck.current(), 3);
        assert_eq!(deck.next_deadline(), None);
    }

    #[test]
    fn test_cancel_drops_every_pending_move() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(4);
        deck.next(now);
        deck.next(now + Duration::from_millis(50));
        deck.cancel_pending();

        assert_eq!(deck.next_deadline(), None);
        assert!(!deck.tick(now + Duration::from_secs(1)));
        assert_eq!(deck.current(), 0);
    }

    #[test]
    fn test_empty_deck_ignores_everything() {
        let now = Instant::now();
        let mut deck = DeckMachine::new(0);
        deck.flip();
        deck.next(now);
        assert!(!deck.flipped());
        assert_eq!(deck.next_deadline(), None);
        assert!(!deck.tick(now + SETTLE_DELAY));
    }
}
