//! In-memory session log.
//!
//! Append-only for the lifetime of the window; a reset signal clears it.
//! Deliberately not persisted anywhere.

use shared::types::SimplificationResult;

#[derive(Debug, Default)]
pub struct Session {
    entries: Vec<SimplificationResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: SimplificationResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[SimplificationResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
