//! Storage behind the knowledge base: the attempt log and the proof table.

use std::{collections::HashMap, hash::Hash};

use either::Either;
use smallvec::SmallVec;

use crate::knowledge::attempt::{AttemptId, DerivationAttempt};

/// Every derivation attempt ever submitted, indexed by the theorem it derives.
///
/// Attempts live in a single arena addressed by [`AttemptId`] and are never
/// removed. The per-theorem index preserves insertion order.
#[derive(Debug, Clone)]
pub struct AttemptLog<T, D> {
    attempts: Vec<DerivationAttempt<T, D>>,
    by_theorem: HashMap<T, SmallVec<AttemptId, 2>>,
}

impl<T, D> Default for AttemptLog<T, D> {
    fn default() -> Self {
        Self {
            attempts: Vec::new(),
            by_theorem: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone, D> AttemptLog<T, D> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attempts: Vec::with_capacity(capacity),
            by_theorem: HashMap::with_capacity(capacity),
        }
    }

    /// Identifier the next pushed attempt will receive.
    pub(crate) fn next_id(&self) -> AttemptId {
        AttemptId(self.attempts.len())
    }

    /// Appends an attempt created with [`AttemptLog::next_id`].
    pub(crate) fn push(&mut self, attempt: DerivationAttempt<T, D>) -> AttemptId {
        let id = attempt.id();
        assert_eq!(
            id,
            self.next_id(),
            "Derivation attempts must be pushed in submission order"
        );

        self.by_theorem
            .entry(attempt.theorem().clone())
            .or_default()
            .push(id);
        self.attempts.push(attempt);
        id
    }

    pub fn get(&self, id: AttemptId) -> Option<&DerivationAttempt<T, D>> {
        self.attempts.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: AttemptId) -> Option<&mut DerivationAttempt<T, D>> {
        self.attempts.get_mut(id.0)
    }

    /// Attempts of `theorem` in insertion order. Empty if none was ever submitted.
    pub fn attempts_of<'a>(
        &'a self,
        theorem: &T,
    ) -> impl Iterator<Item = &'a DerivationAttempt<T, D>> + use<'a, T, D> {
        if let Some(ids) = self.by_theorem.get(theorem) {
            Either::Left(ids.iter().map(|id| &self.attempts[id.0]))
        } else {
            Either::Right(std::iter::empty())
        }
    }

    /// Every attempt, in global submission order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DerivationAttempt<T, D>> {
        self.attempts.iter()
    }

    /// Theorems with at least one attempt.
    pub fn theorems(&self) -> impl Iterator<Item = &T> {
        self.by_theorem.keys()
    }

    pub fn theorem_count(&self) -> usize {
        self.by_theorem.len()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub(crate) fn into_attempts(self) -> Vec<DerivationAttempt<T, D>> {
        self.attempts
    }
}

/// Proof of each proven theorem, stored as the id of the committed attempt.
#[derive(Debug, Clone)]
pub struct ProofTable<T> {
    proofs: HashMap<T, AttemptId>,
}

impl<T> Default for ProofTable<T> {
    fn default() -> Self {
        Self {
            proofs: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash> ProofTable<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            proofs: HashMap::with_capacity(capacity),
        }
    }

    /// Designates `attempt` as the proof of `theorem`.
    ///
    /// # Panics
    /// If `theorem` already has a proof. Proofs are permanent.
    pub(crate) fn commit(&mut self, theorem: T, attempt: AttemptId) {
        if let Some(previous) = self.proofs.get(&theorem) {
            panic!(
                "Theorem already proven by attempt {}, refusing to commit attempt {}",
                previous, attempt
            );
        }
        self.proofs.insert(theorem, attempt);
    }

    pub fn get(&self, theorem: &T) -> Option<AttemptId> {
        self.proofs.get(theorem).copied()
    }

    pub fn contains(&self, theorem: &T) -> bool {
        self.proofs.contains_key(theorem)
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }
}
