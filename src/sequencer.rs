//! Request sequencing for autocomplete searches
//!
//! Every search is tagged with a monotonically increasing token. Responses
//! can arrive out of order; only the newest one seen so far may reach the UI.

use std::fmt;

/// Tag identifying one issued autocomplete search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request tokens and filters stale responses
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    /// Last token handed out
    last_issued: u64,
    /// Highest token whose response has been applied
    highest_applied: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the token for a new search
    pub fn issue(&mut self) -> RequestToken {
        self.last_issued += 1;
        RequestToken(self.last_issued)
    }

    /// Decide whether a response may be applied
    ///
    /// Untagged responses always pass. A tagged response older than the
    /// newest applied one is stale and rejected; otherwise it becomes the
    /// newest applied response.
    pub fn accept(&mut self, token: Option<RequestToken>) -> bool {
        let Some(RequestToken(token)) = token else {
            return true;
        };
        if token < self.highest_applied {
            return false;
        }
        self.highest_applied = token;
        true
    }

    pub fn last_issued(&self) -> Option<RequestToken> {
        (self.last_issued > 0).then_some(RequestToken(self.last_issued))
    }

    pub fn highest_applied(&self) -> Option<RequestToken> {
        (self.highest_applied > 0).then_some(RequestToken(self.highest_applied))
    }
}

#[cfg(test)]
#[path = "sequencer_tests.rs"]
mod sequencer_tests;
