//! Annotations module - bookkeeping for outstanding AI requests.
//!
//! Every AI request is issued a token for the entity it will annotate. When a
//! response arrives it is only applied if its token is still the latest one
//! issued for that entity; results of superseded requests are discarded.

use std::collections::HashMap;

use log::debug;

/// The entity an AI result will be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationTarget {
    /// Analysis of the journal entry with this id
    JournalEntry(String),
    Resume,
    PersonalityAnalysis,
    CareerSummary,
}

/// Identifies one issued request. Tokens grow monotonically per tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy)]
struct Slot {
    latest: RequestToken,
    pending: bool,
}

#[derive(Debug, Default)]
pub struct InFlightRequests {
    next: u64,
    slots: HashMap<AnnotationTarget, Slot>,
}

impl InFlightRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token that supersedes any earlier one for `target`.
    pub fn issue(&mut self, target: AnnotationTarget) -> RequestToken {
        self.next += 1;
        let token = RequestToken(self.next);
        debug!("Issued request {:?} for {:?}", token, target);
        self.slots.insert(
            target,
            Slot {
                latest: token,
                pending: true,
            },
        );
        token
    }

    pub fn is_latest(&self, target: &AnnotationTarget, token: RequestToken) -> bool {
        self.slots
            .get(target)
            .is_some_and(|slot| slot.latest == token)
    }

    /// Whether the latest request for `target` has not completed yet.
    pub fn is_pending(&self, target: &AnnotationTarget) -> bool {
        self.slots.get(target).is_some_and(|slot| slot.pending)
    }

    /// Marks a request finished. Returns true only when its result should be
    /// applied, i.e. `token` is still the latest for `target`.
    pub fn complete(&mut self, target: &AnnotationTarget, token: RequestToken) -> bool {
        match self.slots.get_mut(target) {
            Some(slot) if slot.latest == token && slot.pending => {
                slot.pending = false;
                true
            }
            _ => {
                debug!("Discarding stale result {:?} for {:?}", token, target);
                false
            }
        }
    }

    /// Forgets every outstanding request; later completions are discarded.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> AnnotationTarget {
        AnnotationTarget::JournalEntry(id.to_string())
    }

    #[test]
    fn test_single_request_completes() {
        let mut requests = InFlightRequests::new();
        let token = requests.issue(entry("a"));
        assert!(requests.is_pending(&entry("a")));
        assert!(requests.complete(&entry("a"), token));
        assert!(!requests.is_pending(&entry("a")));
    }

    #[test]
    fn test_superseded_request_is_discarded() {
        let mut requests = InFlightRequests::new();
        let first = requests.issue(entry("a"));
        let second = requests.issue(entry("a"));

        assert!(!requests.is_latest(&entry("a"), first));
        assert!(requests.complete(&entry("a"), second));
        assert!(!requests.complete(&entry("a"), first));
    }

    #[test]
    fn test_stale_completion_after_newer_does_not_clear_pending() {
        let mut requests = InFlightRequests::new();
        let first = requests.issue(AnnotationTarget::Resume);
        let _second = requests.issue(AnnotationTarget::Resume);

        assert!(!requests.complete(&AnnotationTarget::Resume, first));
        assert!(requests.is_pending(&AnnotationTarget::Resume));
    }

    #[test]
    fn test_targets_are_independent() {
        let mut requests = InFlightRequests::new();
        let a = requests.issue(entry("a"));
        let resume = requests.issue(AnnotationTarget::Resume);

        assert!(requests.complete(&AnnotationTarget::Resume, resume));
        assert!(requests.complete(&entry("a"), a));
    }

    #[test]
    fn test_completing_twice_is_rejected() {
        let mut requests = InFlightRequests::new();
        let token = requests.issue(AnnotationTarget::CareerSummary);
        assert!(requests.complete(&AnnotationTarget::CareerSummary, token));
        assert!(!requests.complete(&AnnotationTarget::CareerSummary, token));
    }

    #[test]
    fn test_clear_discards_outstanding() {
        let mut requests = InFlightRequests::new();
        let token = requests.issue(entry("a"));
        requests.clear();
        assert!(!requests.complete(&entry("a"), token));
    }
}
