//! Cancelable delayed steps for view state machines.
//!
//! A view owns its `Scheduled` slots; the event loop passes the current time to
//! the view's `tick`, which takes whatever has come due. Dropping the view
//! drops the slot, so a step can never fire against a view that is gone.

use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<A> {
    pending: Option<(Instant, A)>,
}

impl<A> Default for Scheduled<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> Scheduled<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending step.
    pub fn schedule(&mut self, at: Instant, action: A) {
        self.pending = Some((at, action));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some((at, _)) if *at <= now => self.pending.take().map(|(_, action)| action),
            _ => None,
        }
    }
}

/// Earliest of several optional deadlines.
pub fn earliest<I>(deadlines: I) -> Option<Instant>
where
    I: IntoIterator<Item = Option<Instant>>,
{
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fires_only_when_due() {
        let start = Instant::now();
        let mut slot = Scheduled::new();
        slot.schedule(start + Duration::from_millis(100), "go");

        assert_eq!(slot.take_due(start + Duration::from_millis(99)), None);
        assert_eq!(slot.take_due(start + Duration::from_millis(100)), Some("go"));
        assert!(!slot.is_pending());
        assert_eq!(slot.take_due(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_schedule_supersedes_and_cancel_clears() {
        let start = Instant::now();
        let mut slot = Scheduled::new();
        slot.schedule(start + Duration::from_millis(10), 1);
        slot.schedule(start + Duration::from_millis(50), 2);
        assert_eq!(slot.deadline(), Some(start + Duration::from_millis(50)));

        slot.cancel();
        assert_eq!(slot.take_due(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_earliest() {
        let start = Instant::now();
        let later = start + Duration::from_secs(1);
        assert_eq!(earliest([None, Some(later), Some(start)]), Some(start));
        assert_eq!(earliest([None, None]), None);
    }
}
