//! This module implements the DAG data structure that the layering passes
//! operate on. The real nodes of the graph live in a fixed arena that is
//! indexed by `NodeHandle`. Every node keeps the list of its predecessors and
//! successors, in the order in which the edges were added. The DAG itself is
//! immutable once it is built; the layering passes keep their own state.
//!
//! Dummy nodes are not part of the DAG. They are owned by the layout that
//! creates them and are referred to with a `DummyHandle`. The tagged
//! `NodeRef` is used wherever an edge may point to either kind of node.

use crate::error::{LayoutError, Result};

/// The DAG data structure.
#[derive(Debug, Clone)]
pub struct DAG {
    /// A list of nodes in the dag.
    nodes: Vec<Node>,

    /// The number of edges in the dag.
    num_edges: usize,
}

/// Used by users to keep track of nodes that are saved in the DAG.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Debug)]
pub struct NodeHandle {
    idx: usize,
}

impl NodeHandle {
    pub fn new(x: usize) -> Self {
        NodeHandle { idx: x }
    }
    pub fn get_index(&self) -> usize {
        self.idx
    }
}

impl From<usize> for NodeHandle {
    fn from(idx: usize) -> Self {
        NodeHandle { idx }
    }
}

/// A handle to a synthetic node that was created by the dummy insertion pass.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Debug)]
pub struct DummyHandle {
    idx: usize,
}

impl DummyHandle {
    pub fn new(x: usize) -> Self {
        DummyHandle { idx: x }
    }
    pub fn get_index(&self) -> usize {
        self.idx
    }
}

/// Refers to either a real node of the DAG or to a dummy node. Relinking an
/// edge is just an overwrite of one of these.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NodeRef {
    Real(NodeHandle),
    Dummy(DummyHandle),
}

impl NodeRef {
    pub fn is_dummy(&self) -> bool {
        matches!(self, NodeRef::Dummy(_))
    }
}

impl From<NodeHandle> for NodeRef {
    fn from(h: NodeHandle) -> Self {
        NodeRef::Real(h)
    }
}

impl From<DummyHandle> for NodeRef {
    fn from(h: DummyHandle) -> Self {
        NodeRef::Dummy(h)
    }
}

#[derive(Debug, Clone)]
struct Node {
    // Points to other edges.
    successors: Vec<NodeHandle>,
    predecessors: Vec<NodeHandle>,
}

impl Node {
    pub fn new() -> Self {
        Node {
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }
}

/// Node iterator for iterating over nodes in the graph.
#[derive(Debug)]
pub struct NodeIterator {
    curr: usize,
    last: usize,
}

impl Iterator for NodeIterator {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr == self.last {
            return None;
        }

        let item = Some(NodeHandle::from(self.curr));
        self.curr += 1;
        item
    }
}

impl DAG {
    pub fn new() -> Self {
        DAG {
            nodes: Vec::new(),
            num_edges: 0,
        }
    }

    /// Build a dag with \p num_nodes nodes and the edge list \p edges. Each
    /// edge is a (source, target) pair of node indices.
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut dag = DAG::new();
        dag.new_nodes(num_nodes);
        for &(from, to) in edges {
            if from >= num_nodes || to >= num_nodes {
                return Err(LayoutError::InvalidNode {
                    from,
                    to,
                    num_nodes,
                });
            }
            dag.add_edge(NodeHandle::from(from), NodeHandle::from(to));
        }
        dag.verify();
        Ok(dag)
    }

    pub fn iter(&self) -> NodeIterator {
        NodeIterator {
            curr: 0,
            last: self.nodes.len(),
        }
    }

    pub fn add_edge(&mut self, from: NodeHandle, to: NodeHandle) {
        assert!(from.idx < self.nodes.len(), "Invalid handle");
        assert!(to.idx < self.nodes.len(), "Invalid handle");
        self.nodes[from.idx].successors.push(to);
        self.nodes[to.idx].predecessors.push(from);
        self.num_edges += 1;
    }

    /// Create a new node.
    pub fn new_node(&mut self) -> NodeHandle {
        self.nodes.push(Node::new());
        NodeHandle::new(self.nodes.len() - 1)
    }

    /// Create \p n new nodes.
    pub fn new_nodes(&mut self, n: usize) {
        self.nodes.reserve(n);
        for _ in 0..n {
            self.nodes.push(Node::new());
        }
    }

    pub fn successors(&self, from: NodeHandle) -> &Vec<NodeHandle> {
        &self.nodes[from.idx].successors
    }

    pub fn predecessors(&self, from: NodeHandle) -> &Vec<NodeHandle> {
        &self.nodes[from.idx].predecessors
    }

    /// \returns True if the node has no incoming edges.
    pub fn is_source(&self, node: NodeHandle) -> bool {
        self.nodes[node.idx].predecessors.is_empty()
    }

    /// \returns True if the node has no outgoing edges.
    pub fn is_sink(&self, node: NodeHandle) -> bool {
        self.nodes[node.idx].successors.is_empty()
    }

    /// Iterate over all of the (source, target) edges of the dag, grouped by
    /// source, in the order in which they were added.
    pub fn edges(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(i, node)| {
            node.successors
                .iter()
                .map(move |to| (NodeHandle::from(i), *to))
        })
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn verify(&self) {
        // Check that the node indices are valid.
        for node in &self.nodes {
            for edge in &node.successors {
                assert!(edge.idx < self.nodes.len());
            }
            for edge in &node.predecessors {
                assert!(edge.idx < self.nodes.len());
            }
        }

        // The pred-succ lists must always mirror each other.
        let mut preds = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            preds += node.predecessors.len();
            for src in &node.predecessors {
                let succ = &self.nodes[src.idx].successors;
                assert!(succ.contains(&NodeHandle::from(i)));
            }
        }
        assert_eq!(preds, self.num_edges);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for DAG {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_simple_construction() {
    let mut g = DAG::new();
    let h0 = g.new_node();
    g.verify();

    let h1 = g.new_node();
    let h2 = g.new_node();
    let h3 = g.new_node();
    let h4 = g.new_node();

    assert_ne!(h0, h1);
    assert_ne!(h1, h2);

    g.add_edge(h0, h1);
    g.add_edge(h1, h2);
    g.add_edge(h0, h2);
    g.add_edge(h2, h3);
    g.add_edge(h3, h4);

    g.verify();

    assert_eq!(g.len(), 5);
    assert_eq!(g.num_edges(), 5);
    assert!(g.is_source(h0));
    assert!(g.is_sink(h4));
    assert_eq!(g.successors(h0), &vec![h1, h2]);
    assert_eq!(g.predecessors(h2), &vec![h1, h0]);
}

#[test]
fn test_from_edges() {
    let g = DAG::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
    let edges: Vec<(usize, usize)> = g
        .edges()
        .map(|(a, b)| (a.get_index(), b.get_index()))
        .collect();
    assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);

    let bad = DAG::from_edges(2, &[(0, 2)]);
    assert!(matches!(bad, Err(LayoutError::InvalidNode { to: 2, .. })));
}
