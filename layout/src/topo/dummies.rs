//! This module splits edges that span more than one layer into chains of
//! single-layer hops. Every intervening layer gets one dummy node, which
//! takes the next free position of that layer. The dummies are created from
//! the bottom of the edge upwards, and the source is relinked to the top one.

use crate::adt::dag::{DummyHandle, NodeRef};
#[cfg(test)]
use crate::adt::dag::NodeHandle;
use crate::topo::layout::{DummyNode, Layout, Placement};

pub struct DummyInserter<'a> {
    layout: &'a mut Layout,
}

impl<'a> DummyInserter<'a> {
    pub fn new(layout: &'a mut Layout) -> Self {
        Self { layout }
    }

    fn new_dummy(&mut self, layer: usize, successor: NodeRef) -> NodeRef {
        let pos = self.layout.slots.allocate(layer);
        let handle = DummyHandle::new(self.layout.dummies.len());
        self.layout.dummies.push(DummyNode {
            placement: Placement::new(layer, pos),
            successor,
        });
        NodeRef::Dummy(handle)
    }

    /// Split all of the long edges.
    /// \returns the number of dummy nodes that were created.
    pub fn run(&mut self) -> usize {
        let before = self.layout.dummies.len();

        for node in 0..self.layout.placements.len() {
            let src_layer = self.layout.placements[node].layer;

            for i in 0..self.layout.successors[node].len() {
                let target = self.layout.successors[node][i];
                let target_layer = self.layout.layer(target);
                assert!(target_layer < src_layer, "Invalid edge");

                let mut next = target;
                for layer in target_layer + 1..src_layer {
                    next = self.new_dummy(layer, next);
                }
                self.layout.successors[node][i] = next;
            }
        }

        let created = self.layout.dummies.len() - before;
        #[cfg(feature = "log")]
        log::info!("Inserted {} dummy nodes.", created);
        created
    }
}

#[cfg(test)]
fn layered(n: usize, edges: &[(usize, usize)], width: usize) -> Layout {
    use crate::topo::layout::{LayeredGraph, LayoutOptions};
    let g = LayeredGraph::new(n, edges).unwrap();
    g.do_it(&LayoutOptions::coffman_graham(width)).unwrap()
}

#[test]
fn test_chain_of_dummies() {
    // A long chain plus an edge that skips all of it.
    let mut layout = layered(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)], 1);
    assert_eq!(layout.layer(NodeRef::Real(NodeHandle::new(0))), 4);
    assert_eq!(layout.num_dummies(), 3);

    // The chain goes down one layer at a time.
    let mut curr = layout.successors(NodeRef::Real(NodeHandle::new(0)))[1];
    let mut layer = 3;
    while let NodeRef::Dummy(_) = curr {
        assert_eq!(layout.layer(curr), layer);
        assert_eq!(layout.successors(curr).len(), 1);
        curr = layout.successors(curr)[0];
        layer -= 1;
    }
    assert_eq!(curr, NodeRef::Real(NodeHandle::new(4)));

    // Running the pass again does nothing.
    assert_eq!(DummyInserter::new(&mut layout).run(), 0);
    assert_eq!(layout.num_dummies(), 3);
}

#[test]
fn test_dummies_take_free_slots() {
    let layout = layered(3, &[(0, 1), (1, 2), (0, 2)], 1);
    let dummy = NodeRef::Dummy(DummyHandle::new(0));
    let real = NodeRef::Real(NodeHandle::new(1));
    assert_eq!(layout.layer(dummy), layout.layer(real));
    assert_ne!(layout.placement(dummy).pos, layout.placement(real).pos);
}
