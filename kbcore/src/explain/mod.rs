//! Read-side helpers turning stored proofs into explanations.

pub mod proof_graph;

pub use proof_graph::ProofGraph;
