use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Write},
    hash::Hash,
};

use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
};

use crate::{
    knowledge::{DerivationAttempt, KnowledgeBase},
    utils::{error::KbResult, required::RequiredValue},
};

/// The full proof of a theorem: its proof record, the proofs of all of its
/// assumptions, and so on down to derivations without assumptions.
///
/// Nodes are proof records; an edge `a -> b` means the proof of `b` uses `a`
/// as an assumption. A sub-proof shared by several steps appears once.
pub struct ProofGraph<'kb, T, D> {
    graph: DiGraph<&'kb DerivationAttempt<T, D>, ()>,
    index: HashMap<&'kb T, NodeIndex>,
    root: NodeIndex,
}

impl<'kb, T, D> ProofGraph<'kb, T, D>
where
    T: Eq + Hash + Clone + RequiredValue,
    D: RequiredValue,
{
    /// Collects the proof of `theorem` from `kb`.
    ///
    /// # Errors
    /// [`KbError::NotProven`](crate::utils::error::KbError::NotProven) if
    /// `theorem` has no proof.
    pub fn build(kb: &'kb KnowledgeBase<T, D>, theorem: &T) -> KbResult<Self> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        let root_proof = kb.get_proof(theorem)?;
        let root = graph.add_node(root_proof);
        index.insert(root_proof.theorem(), root);

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let proof: &'kb DerivationAttempt<T, D> = graph[node];
            for assumption in proof.proven_assumptions() {
                let child = match index.get(assumption) {
                    Some(&child) => child,
                    None => {
                        let sub_proof = kb.get_proof(assumption)?;
                        let child = graph.add_node(sub_proof);
                        index.insert(sub_proof.theorem(), child);
                        stack.push(child);
                        child
                    }
                };
                graph.add_edge(child, node, ());
            }
        }

        Ok(Self { graph, index, root })
    }

    /// Proof record of the theorem the graph was built for.
    pub fn root(&self) -> &'kb DerivationAttempt<T, D> {
        self.graph[self.root]
    }

    /// Number of distinct theorems involved in the proof.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, theorem: &T) -> bool {
        self.index.contains_key(theorem)
    }

    /// Proof records of the direct assumptions of `theorem`'s proof.
    pub fn assumptions_of<'a>(
        &'a self,
        theorem: &T,
    ) -> impl Iterator<Item = &'kb DerivationAttempt<T, D>> + use<'a, 'kb, T, D> {
        self.index.get(theorem).into_iter().flat_map(|&node| {
            self.graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|child| self.graph[child])
        })
    }

    /// Proof records ordered so that every assumption comes before the steps
    /// using it. The root is always last.
    pub fn steps(&self) -> Vec<&'kb DerivationAttempt<T, D>> {
        let order = toposort(&self.graph, None)
            .expect("proofs are committed after their assumptions and cannot form a cycle");
        order.into_iter().map(|node| self.graph[node]).collect()
    }

    /// Writes the proof as numbered steps, one per line, e.g.
    /// `3. T2 [ruleB] <= 1, 2`.
    pub fn render(&self) -> String
    where
        T: Display,
        D: Display,
    {
        let steps = self.steps();
        let numbering: HashMap<&T, usize> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.theorem(), i + 1))
            .collect();

        let mut out = String::new();
        for (i, step) in steps.iter().enumerate() {
            let mut uses: Vec<usize> = step
                .proven_assumptions()
                .iter()
                .map(|assumption| numbering[assumption])
                .collect();
            uses.sort_unstable();

            // Writing into a String cannot fail.
            let _ = write!(out, "{}. {} [{}]", i + 1, step.theorem(), step.data());
            if !uses.is_empty() {
                let uses: Vec<String> = uses.iter().map(usize::to_string).collect();
                let _ = write!(out, " <= {}", uses.join(", "));
            }
            out.push('\n');
        }
        out
    }
}

impl<T: Debug, D: Debug> Debug for ProofGraph<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofGraph")
            .field("root", self.graph[self.root].theorem())
            .field("steps", &self.graph.node_count())
            .finish()
    }
}
