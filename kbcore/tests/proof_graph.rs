use kbcore::prelude::*;

fn geometry_base() -> KnowledgeBase<&'static str, &'static str> {
    let mut kb = KnowledgeBase::new();
    kb.add_derivation("collinear(A,B,C)", "given", []).unwrap();
    kb.add_derivation("midpoint(M,A,B)", "given", []).unwrap();
    kb.add_derivation(
        "parallel(MN,BC)",
        "midline",
        ["midpoint(M,A,B)", "midpoint(N,A,C)"],
    )
    .unwrap();
    kb.add_derivation("midpoint(N,A,C)", "given", []).unwrap();
    kb.add_derivation(
        "equal_angles(AMN,ABC)",
        "corresponding_angles",
        ["parallel(MN,BC)", "collinear(A,B,C)"],
    )
    .unwrap();
    kb.add_derivation(
        "similar(AMN,ABC)",
        "aa_similarity",
        ["equal_angles(AMN,ABC)", "parallel(MN,BC)"],
    )
    .unwrap();
    kb.add_derivation("unrelated", "nothing", ["never"]).unwrap();
    kb
}

#[test]
fn proof_graph_collects_shared_sub_proofs_once() {
    let kb = geometry_base();
    let graph = ProofGraph::build(&kb, &"similar(AMN,ABC)").unwrap();

    assert_eq!(graph.root().theorem(), &"similar(AMN,ABC)");
    assert_eq!(graph.len(), 6);
    assert!(graph.contains(&"midpoint(N,A,C)"));
    assert!(!graph.contains(&"unrelated"));

    let mut direct: Vec<&str> = graph
        .assumptions_of(&"similar(AMN,ABC)")
        .map(|proof| *proof.theorem())
        .collect();
    direct.sort();
    assert_eq!(direct, vec!["equal_angles(AMN,ABC)", "parallel(MN,BC)"]);
    assert_eq!(graph.assumptions_of(&"midpoint(M,A,B)").count(), 0);
    assert_eq!(graph.assumptions_of(&"not in graph").count(), 0);
}

#[test]
fn proof_steps_put_assumptions_first() {
    let kb = geometry_base();
    let graph = ProofGraph::build(&kb, &"similar(AMN,ABC)").unwrap();
    let steps = graph.steps();

    assert_eq!(steps.len(), 6);
    assert_eq!(*steps.last().unwrap().theorem(), "similar(AMN,ABC)");
    for (i, step) in steps.iter().enumerate() {
        for assumption in step.proven_assumptions() {
            let position = steps
                .iter()
                .position(|s| s.theorem() == assumption)
                .unwrap();
            assert!(position < i, "{assumption} must precede {}", step.theorem());
        }
    }
}

#[test]
fn rendered_proof_numbers_every_step() {
    let kb = geometry_base();
    let graph = ProofGraph::build(&kb, &"parallel(MN,BC)").unwrap();
    let rendered = graph.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "3. parallel(MN,BC) [midline] <= 1, 2");
    assert!(lines[..2].iter().all(|line| line.ends_with("[given]")));
}

#[test]
fn proof_graph_of_unproven_theorem_fails() {
    let kb = geometry_base();
    let err = ProofGraph::build(&kb, &"unrelated").unwrap_err();
    assert!(err.is_not_proven());
}
