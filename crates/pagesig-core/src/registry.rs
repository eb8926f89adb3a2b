//! First-seen-wins registry of fingerprints for one run.
//!
//! `try_claim` is the only way in: the check and the insert happen under one
//! lock acquisition, so of any number of concurrent callers with the same
//! fingerprint exactly one sees `true`. Entries are never evicted.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::fingerprint::Fingerprint;

#[derive(Debug, Default)]
pub struct DedupRegistry {
    seen: Mutex<HashSet<Fingerprint>>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fingerprint`; returns true only for the first caller.
    pub fn try_claim(&self, fingerprint: &Fingerprint) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.contains(fingerprint) {
            return false;
        }
        seen.insert(fingerprint.clone())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
