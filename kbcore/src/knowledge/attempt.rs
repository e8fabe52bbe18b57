use std::{collections::HashSet, fmt, hash::Hash};

/// Submission index of a [`DerivationAttempt`].
///
/// Identifiers are handed out in submission order and are unique within one
/// knowledge base, so comparing two ids tells which attempt came first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(pub(crate) usize);

impl AttemptId {
    /// Position of the attempt in the global submission order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A recorded proposal that `theorem` follows from a set of assumptions.
///
/// The assumptions are split in two disjoint sets: the ones already proven and
/// the ones still pending. Assumptions only ever move from the pending set to
/// the proven set. An attempt whose pending set is empty and that was chosen
/// as the canonical derivation of its theorem is that theorem's proof.
#[derive(Debug, Clone)]
pub struct DerivationAttempt<T, D> {
    id: AttemptId,
    theorem: T,
    data: D,
    proven: HashSet<T>,
    pending: HashSet<T>,
}

impl<T: Eq + Hash, D> DerivationAttempt<T, D> {
    pub(crate) fn new(id: AttemptId, theorem: T, data: D) -> Self {
        Self {
            id,
            theorem,
            data,
            proven: HashSet::new(),
            pending: HashSet::new(),
        }
    }

    /// Records an assumption. Already-known assumptions are ignored, so
    /// duplicates in the caller's list collapse.
    pub(crate) fn assume(&mut self, assumption: T, already_proven: bool) {
        if self.proven.contains(&assumption) || self.pending.contains(&assumption) {
            return;
        }

        if already_proven {
            self.proven.insert(assumption);
        } else {
            self.pending.insert(assumption);
        }
    }

    /// Moves `assumption` from the pending set to the proven set.
    ///
    /// Returns `false` if the assumption was not pending.
    pub(crate) fn discharge(&mut self, assumption: &T) -> bool {
        match self.pending.take(assumption) {
            Some(assumption) => {
                self.proven.insert(assumption);
                true
            }
            None => false,
        }
    }

    pub(crate) fn into_parts(self) -> (T, D, impl Iterator<Item = T>) {
        (
            self.theorem,
            self.data,
            self.proven.into_iter().chain(self.pending),
        )
    }
}

impl<T, D> DerivationAttempt<T, D> {
    pub fn id(&self) -> AttemptId {
        self.id
    }

    /// The theorem this attempt derives.
    pub fn theorem(&self) -> &T {
        &self.theorem
    }

    /// The opaque metadata submitted with the derivation.
    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn proven_assumptions(&self) -> &HashSet<T> {
        &self.proven
    }

    pub fn pending_assumptions(&self) -> &HashSet<T> {
        &self.pending
    }

    /// Iterates every assumption of the attempt, proven ones first.
    pub fn assumptions(&self) -> impl Iterator<Item = &T> {
        self.proven.iter().chain(self.pending.iter())
    }

    /// Returns `true` once no assumption is left to be proven.
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}
