//! This module contains the implementation of LayeredGraph, the object that
//! runs one layout computation, and of Layout, the geometry that it produces.
//! LayeredGraph owns the input DAG and selects one of the two layering
//! strategies. Both strategies allocate positions from the same per-layer
//! counters, which then move into the Layout so that the dummy insertion pass
//! keeps allocating from them.

use crate::adt::dag::*;
use crate::adt::slots::LayerSlots;
use crate::error::{LayoutError, Result};
use crate::topo::dummies::DummyInserter;
use crate::topo::heuristic::CoffmanGraham;
use crate::topo::labeling::coffman_graham_labels;
use crate::topo::optimal::DummyMinimizer;
use crate::topo::verifier;
use std::fmt::Write;

/// The layer (vertical rank) and position (horizontal slot) of a node.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Placement {
    pub layer: usize,
    pub pos: usize,
}

impl Placement {
    pub fn new(layer: usize, pos: usize) -> Self {
        Placement { layer, pos }
    }
}

/// Selects the algorithm that assigns nodes to layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// The Coffman-Graham heuristic, with at most `width` nodes per layer.
    CoffmanGraham { width: usize },
    /// The linear program that minimizes the number of dummy nodes.
    MinDummies,
}

#[derive(Copy, Clone, Debug)]
pub struct LayoutOptions {
    pub strategy: Strategy,
    /// Check the invariants of the result before returning it.
    pub verify: bool,
}

impl LayoutOptions {
    pub fn coffman_graham(width: usize) -> Self {
        Self {
            strategy: Strategy::CoffmanGraham { width },
            verify: true,
        }
    }

    pub fn min_dummies() -> Self {
        Self {
            strategy: Strategy::MinDummies,
            verify: true,
        }
    }

    /// Reject configurations that can't produce a layout.
    pub fn check(&self) -> Result<()> {
        if let Strategy::CoffmanGraham { width } = self.strategy {
            if width == 0 {
                return Err(LayoutError::InvalidWidth(width));
            }
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::min_dummies()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DummyNode {
    pub(crate) placement: Placement,
    pub(crate) successor: NodeRef,
}

/// The result of a layout computation. Holds the placement of every real and
/// dummy node and the edges after the long edges were split.
#[derive(Debug, Clone)]
pub struct Layout {
    // The placement of the real nodes, indexed by node.
    pub(crate) placements: Vec<Placement>,
    // The successors of the real nodes. The order matches the DAG, but long
    // edges point to the top dummy of their chain.
    pub(crate) successors: Vec<Vec<NodeRef>>,
    // The dummy nodes, in creation order.
    pub(crate) dummies: Vec<DummyNode>,
    // The position counters of each layer.
    pub(crate) slots: LayerSlots,
}

impl Layout {
    fn new(dag: &DAG, placements: Vec<Placement>, slots: LayerSlots) -> Self {
        assert_eq!(placements.len(), dag.len(), "Missing placements");
        let successors: Vec<Vec<NodeRef>> = dag
            .iter()
            .map(|node| {
                dag.successors(node)
                    .iter()
                    .map(|x| NodeRef::Real(*x))
                    .collect::<Vec<_>>()
            })
            .collect();
        Layout {
            placements,
            successors,
            dummies: Vec::new(),
            slots,
        }
    }

    pub fn num_real(&self) -> usize {
        self.placements.len()
    }

    pub fn num_dummies(&self) -> usize {
        self.dummies.len()
    }

    pub fn len(&self) -> usize {
        self.num_real() + self.num_dummies()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn placement(&self, node: NodeRef) -> Placement {
        match node {
            NodeRef::Real(h) => self.placements[h.get_index()],
            NodeRef::Dummy(h) => self.dummies[h.get_index()].placement,
        }
    }

    pub fn layer(&self, node: NodeRef) -> usize {
        self.placement(node).layer
    }

    pub fn successors(&self, node: NodeRef) -> &[NodeRef] {
        match node {
            NodeRef::Real(h) => &self.successors[h.get_index()],
            NodeRef::Dummy(h) => {
                std::slice::from_ref(&self.dummies[h.get_index()].successor)
            }
        }
    }

    /// Iterate over all of the nodes: the real nodes in index order and then
    /// the dummy nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef> + '_ {
        let real = (0..self.num_real()).map(|i| NodeRef::Real(NodeHandle::new(i)));
        let dummy =
            (0..self.num_dummies()).map(|i| NodeRef::Dummy(DummyHandle::new(i)));
        real.chain(dummy)
    }

    /// \returns the list of edges of the rewritten graph.
    pub fn edges(&self) -> Vec<(NodeRef, NodeRef)> {
        let mut edges = Vec::new();
        for node in self.iter() {
            for succ in self.successors(node) {
                edges.push((node, *succ));
            }
        }
        edges
    }

    /// Follow a chain of dummy nodes to the real node at its end.
    pub fn resolve(&self, node: NodeRef) -> NodeHandle {
        let mut curr = node;
        loop {
            match curr {
                NodeRef::Real(h) => return h,
                NodeRef::Dummy(h) => curr = self.dummies[h.get_index()].successor,
            }
        }
    }

    /// \returns the number of layers that are used by the layout.
    pub fn num_layers(&self) -> usize {
        self.iter().map(|n| self.layer(n) + 1).max().unwrap_or(0)
    }

    /// \returns the sum of the layer spans of the original edges.
    pub fn total_span(&self) -> usize {
        let mut sum = 0;
        for (i, succ) in self.successors.iter().enumerate() {
            let src = self.placements[i].layer;
            for s in succ {
                let dest = self.placements[self.resolve(*s).get_index()].layer;
                sum += src - dest;
            }
        }
        sum
    }

    /// Print the geometry as a table, one node per line.
    pub fn dump(&self) -> String {
        let mut res = String::new();
        for node in self.iter() {
            let p = self.placement(node);
            let (kind, idx) = match node {
                NodeRef::Real(h) => ("node", h.get_index()),
                NodeRef::Dummy(h) => ("dummy", h.get_index()),
            };
            let _ = write!(res, "{} {} layer={} pos={} ->", kind, idx, p.layer, p.pos);
            for succ in self.successors(node) {
                let _ = match succ {
                    NodeRef::Real(h) => write!(res, " node {}", h.get_index()),
                    NodeRef::Dummy(h) => write!(res, " dummy {}", h.get_index()),
                };
            }
            res.push('\n');
        }
        res
    }
}

/// The input of a layout computation.
#[derive(Debug)]
pub struct LayeredGraph {
    pub dag: DAG,
}

impl LayeredGraph {
    /// Create a graph with \p num_nodes nodes and the (source, target) edges
    /// \p edges. The graph must be acyclic.
    pub fn new(num_nodes: usize, edges: &[(usize, usize)]) -> Result<Self> {
        Ok(Self::from_dag(DAG::from_edges(num_nodes, edges)?))
    }

    pub fn from_dag(dag: DAG) -> Self {
        LayeredGraph { dag }
    }

    /// Assign layers and positions to all of the nodes, and split the long
    /// edges with dummy nodes.
    pub fn do_it(&self, options: &LayoutOptions) -> Result<Layout> {
        options.check()?;

        #[cfg(feature = "log")]
        log::info!(
            "Laying out a graph with {} nodes and {} edges using {:?}.",
            self.dag.len(),
            self.dag.num_edges(),
            options.strategy
        );

        let mut slots = LayerSlots::new();
        let placements = match options.strategy {
            Strategy::CoffmanGraham { width } => {
                let labels = coffman_graham_labels(&self.dag)?;
                CoffmanGraham::new(&self.dag, &labels, width)?.assign(&mut slots)?
            }
            Strategy::MinDummies => {
                let res = DummyMinimizer::new(&self.dag).optimize()?;
                res.layers
                    .iter()
                    .map(|layer| Placement::new(*layer, slots.allocate(*layer)))
                    .collect()
            }
        };

        let mut layout = Layout::new(&self.dag, placements, slots);
        DummyInserter::new(&mut layout).run();

        if options.verify {
            verifier::do_it(&self.dag, &layout);
        }
        Ok(layout)
    }
}

#[test]
fn test_two_node_chain() {
    let g = LayeredGraph::new(2, &[(0, 1)]).unwrap();
    let layout = g.do_it(&LayoutOptions::coffman_graham(1)).unwrap();
    assert_eq!(layout.layer(NodeHandle::new(0).into()), 1);
    assert_eq!(layout.layer(NodeHandle::new(1).into()), 0);
    assert_eq!(layout.num_dummies(), 0);
}

#[test]
fn test_skip_edge_gets_a_dummy() {
    let g = LayeredGraph::new(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
    let layout = g.do_it(&LayoutOptions::coffman_graham(2)).unwrap();
    let a = NodeRef::from(NodeHandle::new(0));
    assert_eq!(layout.layer(a), 2);
    assert_eq!(layout.layer(NodeHandle::new(1).into()), 1);
    assert_eq!(layout.layer(NodeHandle::new(2).into()), 0);
    assert_eq!(layout.num_dummies(), 1);

    let dummy = NodeRef::Dummy(DummyHandle::new(0));
    assert_eq!(layout.layer(dummy), 1);
    assert_eq!(layout.successors(a)[1], dummy);
    assert_eq!(layout.resolve(dummy), NodeHandle::new(2));
    assert_eq!(layout.slots.occupancy(1), 2);
    assert_eq!(layout.slots.occupancy(0), 1);
    assert_eq!(layout.total_span(), 4);
    assert_eq!(layout.edges().len(), 4);
}

#[test]
fn test_zero_width_is_rejected() {
    let g = LayeredGraph::new(2, &[(0, 1)]).unwrap();
    let res = g.do_it(&LayoutOptions::coffman_graham(0));
    assert!(matches!(res, Err(LayoutError::InvalidWidth(0))));
}

#[test]
fn test_dump() {
    let g = LayeredGraph::new(2, &[(0, 1)]).unwrap();
    let layout = g.do_it(&LayoutOptions::coffman_graham(1)).unwrap();
    let text = layout.dump();
    assert_eq!(text, "node 0 layer=1 pos=0 -> node 1\nnode 1 layer=0 pos=0 ->\n");
}
