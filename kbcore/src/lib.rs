//! Knowledge base for theorems discovered by an external derivation pipeline.
//!
//! Derivers submit candidate implications ("theorem follows from these
//! assumptions, for this reason") through [`knowledge::KnowledgeBase`], which
//! decides incrementally which theorems are provable, keeps every attempt for
//! later explanation, and notifies observers the moment a theorem gets proven.
//! The [`explain`] module turns stored proofs into proof graphs.
//!
//! The knowledge base trusts every derivation handed to it: it neither checks
//! derivations nor searches for new ones, and proofs are never retracted.

pub mod explain;
pub mod knowledge;
pub mod utils;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::explain::ProofGraph;
    pub use crate::knowledge::{
        AttemptId, DerivationAttempt, KnowledgeBase, KnowledgeBaseStats, SharedKnowledgeBase,
    };
    pub use crate::utils::{
        conf::KnowledgeBaseCreateInfo,
        error::{KbError, KbResult},
        required::RequiredValue,
    };
}
