use std::hash::Hash;

use parking_lot::Mutex;

use crate::{
    knowledge::{DerivationAttempt, KnowledgeBase, KnowledgeBaseStats},
    utils::{error::KbResult, required::RequiredValue},
};

/// A [`KnowledgeBase`] shared between several producers.
///
/// Every call takes the lock for its whole duration, cascade included, so two
/// mutations never interleave. Observers run while the lock is held and must
/// not call back into the same instance.
pub struct SharedKnowledgeBase<T, D> {
    inner: Mutex<KnowledgeBase<T, D>>,
}

impl<T, D> SharedKnowledgeBase<T, D>
where
    T: Eq + Hash + Clone + RequiredValue,
    D: RequiredValue,
{
    pub fn new(knowledge_base: KnowledgeBase<T, D>) -> Self {
        Self {
            inner: Mutex::new(knowledge_base),
        }
    }

    /// See [`KnowledgeBase::add_derivation`].
    pub fn add_derivation(
        &self,
        theorem: T,
        data: D,
        assumptions: impl IntoIterator<Item = T>,
    ) -> KbResult<Vec<T>> {
        self.inner.lock().add_derivation(theorem, data, assumptions)
    }

    pub fn is_proven(&self, theorem: &T) -> bool {
        self.inner.lock().is_proven(theorem)
    }

    /// Returns a copy of the proof of `theorem`.
    pub fn get_proof(&self, theorem: &T) -> KbResult<DerivationAttempt<T, D>>
    where
        D: Clone,
    {
        self.inner.lock().get_proof(theorem).cloned()
    }

    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) {
        self.inner.lock().subscribe(callback);
    }

    /// Merges a separately built knowledge base. See [`KnowledgeBase::absorb`].
    pub fn absorb(&self, other: KnowledgeBase<T, D>) -> KbResult<Vec<T>> {
        self.inner.lock().absorb(other)
    }

    pub fn stats(&self) -> KnowledgeBaseStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with shared access to the underlying knowledge base.
    pub fn with<R>(&self, f: impl FnOnce(&KnowledgeBase<T, D>) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn into_inner(self) -> KnowledgeBase<T, D> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn concurrent_producers_reach_the_same_fixpoint() {
        let shared: Arc<SharedKnowledgeBase<u32, u32>> =
            Arc::new(SharedKnowledgeBase::new(KnowledgeBase::new()));

        // Chain 1 <- 2 <- ... <- 200, submitted from four threads in interleaved order.
        let handles: Vec<_> = (0..4u32)
            .map(|worker| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for theorem in (2..=200u32).filter(|t| t % 4 == worker) {
                        shared.add_derivation(theorem, worker, [theorem - 1]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!shared.is_proven(&200));
        let newly = shared.add_derivation(1, 99, []).unwrap();
        assert_eq!(newly.len(), 200);
        assert!(shared.with(|kb| (1..=200).all(|t| kb.is_proven(&t))));
        assert_eq!(shared.get_proof(&200).unwrap().data(), &0);
    }
}
