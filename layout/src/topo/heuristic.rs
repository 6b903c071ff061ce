//! This module implements the second phase of the Coffman-Graham layering.
//! Nodes are placed from the sinks upwards: a node becomes eligible once all
//! of its successors are placed. The eligible node with the smallest label is
//! placed in the current layer, unless one of its successors already sits
//! there, in which case a new layer is opened. A layer is closed once it
//! holds `width` nodes.

use crate::adt::dag::{NodeHandle, DAG};
use crate::adt::slots::LayerSlots;
use crate::error::{LayoutError, Result};
use crate::topo::layout::Placement;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub struct CoffmanGraham<'a> {
    dag: &'a DAG,
    labels: &'a [usize],
    width: usize,
}

impl<'a> CoffmanGraham<'a> {
    /// Create a new layering pass for \p dag. The \p labels are the ones
    /// computed by the labeling phase, indexed by node.
    pub fn new(dag: &'a DAG, labels: &'a [usize], width: usize) -> Result<Self> {
        if width == 0 {
            return Err(LayoutError::InvalidWidth(width));
        }
        assert_eq!(labels.len(), dag.len(), "Missing labels");
        Ok(Self { dag, labels, width })
    }

    fn push_ready(
        &self,
        ready: &mut BinaryHeap<Reverse<(usize, NodeHandle)>>,
        node: NodeHandle,
    ) {
        ready.push(Reverse((self.labels[node.get_index()], node)));
    }

    /// Place all of the nodes in layers, and allocate their positions from
    /// \p slots. \returns the placement of each node, indexed by node.
    pub fn assign(&self, slots: &mut LayerSlots) -> Result<Vec<Placement>> {
        let n = self.dag.len();
        let mut placed: Vec<Option<Placement>> = vec![None; n];
        // The number of successors of each node that were placed.
        let mut num_succ_placed = vec![0; n];

        // A min-queue of (label, node) pairs.
        let mut ready = BinaryHeap::new();
        for node in self.dag.iter() {
            if self.dag.is_sink(node) {
                self.push_ready(&mut ready, node);
            }
        }

        let mut layer = 0;
        let mut cnt = 0;

        for done in 0..n {
            let Reverse((_, node)) = match ready.pop() {
                Some(item) => item,
                None => {
                    return Err(LayoutError::MalformedInput {
                        phase: "layer assignment",
                        done,
                        total: n,
                    });
                }
            };

            // A node can't share a layer with one of its successors.
            let blocked = self.dag.successors(node).iter().any(|succ| {
                matches!(placed[succ.get_index()], Some(p) if p.layer == layer)
            });
            if blocked {
                #[cfg(feature = "log")]
                log::debug!("Node {} opens layer {}.", node.get_index(), layer + 1);
                layer += 1;
                cnt = 0;
            }

            let pos = slots.allocate(layer);
            placed[node.get_index()] = Some(Placement::new(layer, pos));
            cnt += 1;

            for pred in self.dag.predecessors(node) {
                let idx = pred.get_index();
                num_succ_placed[idx] += 1;
                if num_succ_placed[idx] == self.dag.successors(*pred).len() {
                    self.push_ready(&mut ready, *pred);
                }
            }

            if cnt == self.width {
                #[cfg(feature = "log")]
                log::debug!(
                    "Layer {} is full ({} slots).",
                    layer,
                    slots.occupancy(layer)
                );
                layer += 1;
                cnt = 0;
            }
        }

        let placement: Vec<Placement> = placed.into_iter().flatten().collect();
        assert_eq!(placement.len(), n, "Some nodes were not placed");

        #[cfg(feature = "log")]
        log::info!(
            "Placed {} nodes in {} layers (width {}).",
            n,
            slots.num_layers(),
            self.width
        );

        Ok(placement)
    }
}

#[cfg(test)]
fn place(edges: &[(usize, usize)], n: usize, width: usize) -> Vec<Placement> {
    use crate::topo::labeling::coffman_graham_labels;
    let dag = DAG::from_edges(n, edges).unwrap();
    let labels = coffman_graham_labels(&dag).unwrap();
    let mut slots = LayerSlots::new();
    CoffmanGraham::new(&dag, &labels, width)
        .unwrap()
        .assign(&mut slots)
        .unwrap()
}

#[test]
fn test_chain() {
    let p = place(&[(0, 1), (1, 2)], 3, 5);
    assert_eq!(p[0], Placement::new(2, 0));
    assert_eq!(p[1], Placement::new(1, 0));
    assert_eq!(p[2], Placement::new(0, 0));
}

#[test]
fn test_smallest_label_first() {
    // The labels are [1, 3, 2, 4]. Both sinks are ready at the start and
    // node 1 has the smaller label, so it takes the bottom layer.
    let p = place(&[(0, 1), (2, 3)], 4, 1);
    assert_eq!(p[1], Placement::new(0, 0));
    assert_eq!(p[0], Placement::new(1, 0));
    assert_eq!(p[3], Placement::new(2, 0));
    assert_eq!(p[2], Placement::new(3, 0));
}

#[test]
fn test_width_cap() {
    // Five independent nodes, two per layer.
    let p = place(&[], 5, 2);
    for layer in 0..3 {
        let cnt = p.iter().filter(|x| x.layer == layer).count();
        assert!(cnt <= 2);
    }
    assert_eq!(p.iter().map(|x| x.layer).max(), Some(2));
}

#[test]
fn test_zero_width() {
    let dag = DAG::from_edges(1, &[]).unwrap();
    let labels = vec![1];
    let res = CoffmanGraham::new(&dag, &labels, 0);
    assert!(matches!(res, Err(LayoutError::InvalidWidth(0))));
}

#[test]
fn test_cycle_is_reported() {
    // Node 0 is a sink, but nodes 1 and 2 wait for each other.
    let dag = DAG::from_edges(3, &[(1, 0), (1, 2), (2, 1)]).unwrap();
    let labels = vec![1, 2, 3];
    let mut slots = LayerSlots::new();
    let res = CoffmanGraham::new(&dag, &labels, 2)
        .unwrap()
        .assign(&mut slots);
    assert!(matches!(
        res,
        Err(LayoutError::MalformedInput { done: 1, .. })
    ));
}
