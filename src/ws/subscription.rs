//! Action-type filter held by each WebSocket connection.
//!
//! A fresh connection receives nothing. Clients opt in per action type or
//! with `"*"`, and every signal pulled off the bus is checked here before
//! it is written to the socket.

use std::collections::HashSet;

use crate::domain::ActionType;

/// Which action signals one client has asked to receive.
#[derive(Debug, Default)]
pub struct ActionFilter {
    wanted: HashSet<ActionType>,
    // Set by `"*"`. Explicit entries survive while it is on, so clearing it
    // falls back to them.
    wildcard: bool,
}

impl ActionFilter {
    /// Creates a filter that admits no signals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opts in to `actions`, and to every action type when `wildcard`.
    pub fn allow(&mut self, actions: &[ActionType], wildcard: bool) {
        self.wildcard |= wildcard;
        self.wanted.extend(actions);
    }

    /// Opts out of `actions`. With `wildcard`, also turns off the
    /// catch-all opt-in.
    pub fn deny(&mut self, actions: &[ActionType], wildcard: bool) {
        if wildcard {
            self.wildcard = false;
        }
        self.wanted.retain(|action| !actions.contains(action));
    }

    /// Whether a signal for `action` goes out to this client.
    #[must_use]
    pub fn admits(&self, action: ActionType) -> bool {
        self.wildcard || self.wanted.contains(&action)
    }

    /// Number of action types opted in by name.
    #[must_use]
    pub fn named_count(&self) -> usize {
        self.wanted.len()
    }

    /// Whether the `"*"` opt-in is on.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_filter_admits_nothing() {
        let filter = ActionFilter::new();
        assert!(ActionType::ALL.iter().all(|a| !filter.admits(*a)));
    }

    #[test]
    fn named_opt_in_is_exact() {
        let mut filter = ActionFilter::new();
        filter.allow(&[ActionType::Click], false);
        assert!(filter.admits(ActionType::Click));
        assert!(!filter.admits(ActionType::View));
        assert_eq!(filter.named_count(), 1);
    }

    #[test]
    fn clearing_wildcard_falls_back_to_named_types() {
        let mut filter = ActionFilter::new();
        filter.allow(&[ActionType::Complete], true);
        assert!(ActionType::ALL.iter().all(|a| filter.admits(*a)));

        filter.deny(&[], true);
        assert!(!filter.is_wildcard());
        assert!(!filter.admits(ActionType::Play));
        assert!(filter.admits(ActionType::Complete));
    }

    #[test]
    fn deny_drops_named_types() {
        let mut filter = ActionFilter::new();
        filter.allow(&[ActionType::View, ActionType::Complete], false);
        filter.deny(&[ActionType::View], false);
        assert!(!filter.admits(ActionType::View));
        assert!(filter.admits(ActionType::Complete));
    }
}
