//! Assumption-based theorem knowledge base.
//!
//! A [`KnowledgeBase`] stores relationships between theorems and proves them
//! incrementally. Each call to [`KnowledgeBase::add_derivation`] records that a
//! theorem follows from a set of assumptions (plus opaque metadata describing
//! the justification). A theorem is proven as soon as one of its derivations
//! has all of its assumptions proven, which means at least one derivation
//! without assumptions is needed to get anything proven at all.
//!
//! ## Propagation
//! Proving a theorem may complete any number of derivations waiting on it,
//! which in turn may complete others. The cascade is processed with an
//! explicit worklist before `add_derivation` returns, so proof chains of any
//! depth are handled without growing the call stack.
//!
//! ## Example
//! ```
//! use kbcore::knowledge::KnowledgeBase;
//!
//! let mut kb = KnowledgeBase::new();
//! kb.add_derivation("T1", "ruleA", []).unwrap();
//! kb.add_derivation("T2", "ruleB", ["T1", "T3"]).unwrap();
//! assert!(!kb.is_proven(&"T2"));
//!
//! let newly_proven = kb.add_derivation("T3", "ruleC", []).unwrap();
//! assert_eq!(newly_proven, vec!["T3", "T2"]);
//! assert_eq!(kb.get_proof(&"T2").unwrap().proven_assumptions().len(), 2);
//! ```

use std::{
    collections::{HashMap, VecDeque},
    fmt::{self, Debug},
    hash::Hash,
};

use log::{debug, trace};

use crate::utils::{
    conf::KnowledgeBaseCreateInfo,
    error::{KbError, KbResult},
    required::RequiredValue,
};

pub mod attempt;
pub mod library;
pub mod observer;
pub mod shared;

pub use attempt::{AttemptId, DerivationAttempt};
pub use library::{AttemptLog, ProofTable};
pub use observer::ProofObserver;
pub use shared::SharedKnowledgeBase;

/// Counters describing the content of a [`KnowledgeBase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnowledgeBaseStats {
    /// Theorems with at least one derivation attempt.
    pub theorems: usize,
    pub attempts: usize,
    pub proven: usize,
    /// Attempts that still have at least one pending assumption.
    pub pending_attempts: usize,
}

impl fmt::Display for KnowledgeBaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} theorems ({} proven), {} derivation attempts ({} pending)",
            self.theorems, self.proven, self.attempts, self.pending_attempts
        )
    }
}

/// Stores derivations of theorems and propagates proofs between them.
///
/// `T` is the theorem identity and only needs total, stable equality and
/// hashing. `D` is opaque metadata returned verbatim with each derivation.
pub struct KnowledgeBase<T, D> {
    log: AttemptLog<T, D>,
    proofs: ProofTable<T>,
    /// Pending assumption -> attempts waiting on it, in submission order.
    /// Entries are dropped once the assumption is proven.
    waiting: HashMap<T, Vec<AttemptId>>,
    observers: Vec<ProofObserver<T>>,
    create_info: KnowledgeBaseCreateInfo,
}

impl<T, D> Default for KnowledgeBase<T, D> {
    fn default() -> Self {
        Self {
            log: AttemptLog::default(),
            proofs: ProofTable::default(),
            waiting: HashMap::new(),
            observers: Vec::new(),
            create_info: KnowledgeBaseCreateInfo::default(),
        }
    }
}

impl<T, D> Debug for KnowledgeBase<T, D>
where
    T: Debug,
    D: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("log", &self.log)
            .field("proofs", &self.proofs)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<T, D> KnowledgeBase<T, D>
where
    T: Eq + Hash + Clone + RequiredValue,
    D: RequiredValue,
{
    /// Creates an empty knowledge base with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty knowledge base configured by `create_info`.
    pub fn with_create_info(create_info: KnowledgeBaseCreateInfo) -> Self {
        Self {
            log: AttemptLog::with_capacity(create_info.initial_capacity),
            proofs: ProofTable::with_capacity(create_info.initial_capacity),
            waiting: HashMap::new(),
            observers: Vec::new(),
            create_info,
        }
    }

    pub fn create_info(&self) -> &KnowledgeBaseCreateInfo {
        &self.create_info
    }

    /// Registers a callback fired once for every theorem the first time it
    /// gets proven. Observers fire in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + Send + 'static) {
        self.observers.push(ProofObserver::new(callback));
    }

    /// Adds a derivation of `theorem` from `assumptions`, justified by `data`.
    ///
    /// Duplicate assumptions collapse. If every assumption is already proven and
    /// `theorem` has no proof yet, this derivation becomes its proof and the
    /// consequences are propagated through every stored derivation.
    ///
    /// Returns the theorems proven by this call, in the order they were
    /// committed. Observers have been notified of each of them by the time this
    /// returns.
    ///
    /// # Errors
    /// [`KbError::InvalidArgument`] if the theorem, the metadata or one of the
    /// assumptions is a missing value. Nothing is recorded in that case.
    pub fn add_derivation(
        &mut self,
        theorem: T,
        data: D,
        assumptions: impl IntoIterator<Item = T>,
    ) -> KbResult<Vec<T>> {
        let assumptions: Vec<T> = assumptions.into_iter().collect();
        if self.create_info.reject_missing_values {
            Self::validate(&theorem, &data, &assumptions)?;
        }

        let id = self.log.next_id();
        let mut attempt = DerivationAttempt::new(id, theorem, data);
        for assumption in assumptions {
            let proven = self.proofs.contains(&assumption);
            attempt.assume(assumption, proven);
        }

        // Attempts of proven theorems are never revisited by the cascade.
        let already_proven = self.proofs.contains(attempt.theorem());
        if !already_proven {
            for assumption in attempt.pending_assumptions() {
                self.waiting.entry(assumption.clone()).or_default().push(id);
            }
        }

        let complete = attempt.is_complete();
        debug!(
            "Recorded derivation attempt {} ({} proven, {} pending assumptions)",
            id,
            attempt.proven_assumptions().len(),
            attempt.pending_assumptions().len()
        );
        self.log.push(attempt);

        let mut newly_proven = Vec::new();
        if complete && !already_proven {
            self.propagate_from(id, &mut newly_proven);
        }
        Ok(newly_proven)
    }

    fn validate(theorem: &T, data: &D, assumptions: &[T]) -> KbResult<()> {
        if theorem.is_missing() {
            return Err(KbError::InvalidArgument {
                role: "theorem".to_string(),
                reason: "the derived theorem is a missing value".to_string(),
            });
        }

        if data.is_missing() {
            return Err(KbError::InvalidArgument {
                role: "metadata".to_string(),
                reason: "the derivation carries no metadata".to_string(),
            });
        }

        if let Some(position) = assumptions.iter().position(RequiredValue::is_missing) {
            return Err(KbError::InvalidArgument {
                role: format!("assumption #{}", position),
                reason: "the derivation lists a missing value as an assumption".to_string(),
            });
        }

        Ok(())
    }

    /// Commits the complete attempt `root` and runs the cascade.
    ///
    /// Every newly proven theorem is pushed on a FIFO worklist; processing a
    /// theorem discharges it from every waiting attempt of a still-unproven
    /// theorem and commits the attempts that become complete. Attempts of
    /// theorems that already have a proof are left untouched. Waiting lists
    /// are kept in submission order, so when several attempts of a theorem
    /// complete in the same pass the earliest submitted one wins.
    fn propagate_from(&mut self, root: AttemptId, newly_proven: &mut Vec<T>) {
        let mut worklist = VecDeque::new();
        worklist.push_back(self.commit(root, newly_proven));

        while let Some(proven) = worklist.pop_front() {
            let Some(waiters) = self.waiting.remove(&proven) else {
                continue;
            };

            for id in waiters {
                let Some(attempt) = self.log.get_mut(id) else {
                    unreachable!("Waiting list references unknown attempt {}", id);
                };

                if self.proofs.contains(attempt.theorem()) {
                    continue;
                }

                let discharged = attempt.discharge(&proven);
                debug_assert!(
                    discharged,
                    "Attempt {} was waiting on an assumption it does not list as pending",
                    id
                );
                if self.create_info.trace_cascade {
                    trace!("Discharged an assumption of attempt {}", id);
                }

                if attempt.is_complete() {
                    worklist.push_back(self.commit(id, newly_proven));
                }
            }
        }
    }

    /// Designates attempt `id` as the proof of its theorem and notifies observers.
    fn commit(&mut self, id: AttemptId, newly_proven: &mut Vec<T>) -> T {
        let Some(attempt) = self.log.get(id) else {
            unreachable!("Committing unknown attempt {}", id);
        };
        assert!(
            attempt.is_complete(),
            "Refusing to commit attempt {} with {} pending assumptions",
            id,
            attempt.pending_assumptions().len()
        );

        let theorem = attempt.theorem().clone();
        self.proofs.commit(theorem.clone(), id);
        debug!("Attempt {} committed as a proof", id);

        for observer in self.observers.iter_mut() {
            observer.notify(&theorem);
        }
        newly_proven.push(theorem.clone());
        theorem
    }

    /// Returns `true` if `theorem` has a proof. Unknown theorems are not proven.
    pub fn is_proven(&self, theorem: &T) -> bool {
        self.proofs.contains(theorem)
    }

    /// Returns the derivation that proved `theorem`.
    ///
    /// # Errors
    /// [`KbError::NotProven`] if the theorem hasn't been proven yet.
    pub fn get_proof(&self, theorem: &T) -> KbResult<&DerivationAttempt<T, D>> {
        self.proofs
            .get(theorem)
            .and_then(|id| self.log.get(id))
            .ok_or(KbError::NotProven)
    }

    /// Returns every derivation attempt of `theorem` in insertion order,
    /// including the ones that never became a proof.
    pub fn get_derivation_attempts<'a>(
        &'a self,
        theorem: &T,
    ) -> impl Iterator<Item = &'a DerivationAttempt<T, D>> + use<'a, T, D> {
        self.log.attempts_of(theorem)
    }

    /// Every derivation attempt in the order it was submitted.
    pub fn attempts_in_submission_order(
        &self,
    ) -> impl ExactSizeIterator<Item = &DerivationAttempt<T, D>> {
        self.log.iter()
    }

    /// Theorems with at least one attempt but no proof.
    pub fn unproven_theorems(&self) -> impl Iterator<Item = &T> {
        self.log
            .theorems()
            .filter(|theorem| !self.proofs.contains(theorem))
    }

    pub fn stats(&self) -> KnowledgeBaseStats {
        KnowledgeBaseStats {
            theorems: self.log.theorem_count(),
            attempts: self.log.len(),
            proven: self.proofs.len(),
            pending_attempts: self.log.iter().filter(|a| !a.is_complete()).count(),
        }
    }

    /// Replays every derivation of `other` into this knowledge base, in the
    /// order they were originally submitted, with their full assumption sets.
    ///
    /// This is how independently built knowledge bases are combined. Returns
    /// the theorems newly proven here. Observers of `other` are dropped.
    ///
    /// # Errors
    /// Propagates [`KbError::InvalidArgument`] if this knowledge base rejects a
    /// value `other` accepted; derivations replayed before the failure stay.
    pub fn absorb(&mut self, other: KnowledgeBase<T, D>) -> KbResult<Vec<T>> {
        let mut newly_proven = Vec::new();
        for attempt in other.log.into_attempts() {
            let (theorem, data, assumptions) = attempt.into_parts();
            newly_proven.extend(self.add_derivation(theorem, data, assumptions)?);
        }
        Ok(newly_proven)
    }
}
