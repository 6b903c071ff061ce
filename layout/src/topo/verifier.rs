//! Checks the invariants of a finished layout. A violation is a bug in one of
//! the passes, so the checks assert.

use crate::adt::dag::{NodeRef, DAG};
use crate::topo::layout::Layout;
use std::collections::HashSet;

pub fn do_it(dag: &DAG, layout: &Layout) {
    verify_unique_slots(layout);
    verify_allocated_slots(layout);
    verify_original_edges(dag, layout);
    verify_single_layer_hops(layout);
}

/// No two nodes may share a (layer, pos) pair.
fn verify_unique_slots(layout: &Layout) {
    let mut taken = HashSet::new();
    for node in layout.iter() {
        let p = layout.placement(node);
        assert!(taken.insert(p), "Two nodes share the slot {:?}", p);
    }
}

/// Every position was handed out by the counters of its layer.
fn verify_allocated_slots(layout: &Layout) {
    for node in layout.iter() {
        let p = layout.placement(node);
        assert!(
            p.pos < layout.slots.occupancy(p.layer),
            "The slot {:?} was never allocated",
            p
        );
    }
}

/// Sources sit above their targets, and the rewritten edges still lead to the
/// original targets, in the original order.
fn verify_original_edges(dag: &DAG, layout: &Layout) {
    assert_eq!(dag.len(), layout.num_real());
    for node in dag.iter() {
        let src = NodeRef::Real(node);
        let succ = layout.successors(src);
        assert_eq!(succ.len(), dag.successors(node).len());
        for (orig, curr) in dag.successors(node).iter().zip(succ.iter()) {
            assert!(
                layout.layer(src) > layout.layer(NodeRef::Real(*orig)),
                "Edge {} -> {} points upwards",
                node.get_index(),
                orig.get_index()
            );
            assert_eq!(layout.resolve(*curr), *orig, "Edge lost its target");
        }
    }
}

/// Every edge of the rewritten graph spans exactly one layer.
fn verify_single_layer_hops(layout: &Layout) {
    for (from, to) in layout.edges() {
        assert_eq!(
            layout.layer(from),
            layout.layer(to) + 1,
            "The edge {:?} -> {:?} skips layers",
            from,
            to
        );
    }
}
