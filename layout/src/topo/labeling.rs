//! This module implements the first phase of the Coffman-Graham layering: the
//! labeling of the nodes. Every node gets a unique label in 1..=n, in a
//! topological order. Among the nodes that are ready (all predecessors are
//! labeled) we pick the node whose predecessor labels, read from the largest
//! to the smallest, are lexicographically smallest. The labels are used as the
//! priority key of the second phase.

use crate::adt::dag::{NodeHandle, DAG};
use crate::error::{LayoutError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Compare two lists of predecessor labels, element by element, starting
/// from the largest label. The lists are kept in the order in which the labels
/// were handed out, which is ascending, so we walk them from the back. The
/// list that has the smaller label at the first difference is ordered first.
/// If one list is a prefix of the other then the shorter list is ordered
/// first.
pub fn compare_descending(a: &[usize], b: &[usize]) -> Ordering {
    let mut ai = a.iter().rev();
    let mut bi = b.iter().rev();
    loop {
        match (ai.next(), bi.next()) {
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(y);
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// The priority key of a ready node.
#[derive(Debug, PartialEq, Eq)]
struct ReadyKey {
    /// The labels of the predecessors, in ascending order.
    pred_labels: Vec<usize>,
    node: NodeHandle,
}

impl Ord for ReadyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_descending(&self.pred_labels, &other.pred_labels)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for ReadyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Assign the Coffman-Graham labels to the nodes of \p dag.
/// \returns a vector that maps each node index to its label (1-based).
pub fn coffman_graham_labels(dag: &DAG) -> Result<Vec<usize>> {
    let n = dag.len();
    let mut labels = vec![0; n];
    // The labels of the predecessors that were labeled so far.
    let mut pred_labels: Vec<Vec<usize>> = vec![Vec::new(); n];

    // A min-queue of the ready nodes.
    let mut ready = BinaryHeap::new();
    for node in dag.iter() {
        if dag.is_source(node) {
            ready.push(Reverse(ReadyKey {
                pred_labels: Vec::new(),
                node,
            }));
        }
    }

    for label in 1..=n {
        let Reverse(key) = match ready.pop() {
            Some(key) => key,
            None => {
                return Err(LayoutError::MalformedInput {
                    phase: "labeling phase",
                    done: label - 1,
                    total: n,
                });
            }
        };
        let node = key.node;
        labels[node.get_index()] = label;

        for succ in dag.successors(node) {
            let idx = succ.get_index();
            pred_labels[idx].push(label);
            if pred_labels[idx].len() == dag.predecessors(*succ).len() {
                let list = std::mem::take(&mut pred_labels[idx]);
                ready.push(Reverse(ReadyKey {
                    pred_labels: list,
                    node: *succ,
                }));
            }
        }
    }

    #[cfg(feature = "log")]
    log::info!("Labeled {} nodes.", n);

    Ok(labels)
}

#[test]
fn test_compare_descending() {
    // Compare the largest labels first.
    assert_eq!(compare_descending(&[1, 5], &[4]), Ordering::Greater);
    assert_eq!(compare_descending(&[4], &[1, 5]), Ordering::Less);
    assert_eq!(compare_descending(&[2, 5], &[3, 5]), Ordering::Less);
    // A prefix is ordered first.
    assert_eq!(compare_descending(&[5], &[3, 5]), Ordering::Less);
    assert_eq!(compare_descending(&[], &[1]), Ordering::Less);
    assert_eq!(compare_descending(&[2, 3], &[2, 3]), Ordering::Equal);
}

#[test]
fn test_labels_are_a_topological_permutation() {
    let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (0, 4)];
    let dag = DAG::from_edges(5, &edges).unwrap();
    let labels = coffman_graham_labels(&dag).unwrap();

    let mut sorted = labels.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5]);

    for (from, to) in dag.edges() {
        assert!(labels[from.get_index()] < labels[to.get_index()]);
    }
}

#[test]
fn test_label_order() {
    // After 0 and 1 are labeled, node 2 sees [2] and node 4 sees [2, 1]. The
    // shorter list wins. Then node 3 sees [3, 1] and loses to node 4.
    let edges = [(0, 1), (1, 2), (0, 3), (2, 3), (0, 4), (1, 4)];
    let dag = DAG::from_edges(5, &edges).unwrap();
    let labels = coffman_graham_labels(&dag).unwrap();
    assert_eq!(labels, vec![1, 2, 3, 5, 4]);
}

#[test]
fn test_cycle_is_reported() {
    let dag = DAG::from_edges(3, &[(0, 1), (1, 2), (2, 1)]).unwrap();
    let res = coffman_graham_labels(&dag);
    assert!(matches!(
        res,
        Err(LayoutError::MalformedInput { done: 1, total: 3, .. })
    ));
}
