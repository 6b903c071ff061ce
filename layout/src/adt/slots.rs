//! This module implements the per-layer occupancy counters. Each layer keeps
//! the index of its next free horizontal slot. Slots are handed out in
//! placement order and are never reused, so two nodes that were placed
//! through the same counters never share a (layer, pos) pair.

#[derive(Debug, Clone, Default)]
pub struct LayerSlots {
    next: Vec<usize>,
}

impl LayerSlots {
    pub fn new() -> Self {
        LayerSlots { next: Vec::new() }
    }

    /// Allocate the next free position in the layer \p layer. Layers that
    /// were never seen before are created on demand.
    pub fn allocate(&mut self, layer: usize) -> usize {
        if self.next.len() <= layer {
            self.next.resize(layer + 1, 0);
        }
        let pos = self.next[layer];
        self.next[layer] += 1;
        pos
    }

    /// \returns the number of slots that were handed out in \p layer.
    pub fn occupancy(&self, layer: usize) -> usize {
        self.next.get(layer).copied().unwrap_or(0)
    }

    /// \returns the number of layers that were touched.
    pub fn num_layers(&self) -> usize {
        self.next.len()
    }
}

#[test]
fn test_allocate() {
    let mut slots = LayerSlots::new();
    assert_eq!(slots.allocate(2), 0);
    assert_eq!(slots.allocate(2), 1);
    assert_eq!(slots.allocate(0), 0);
    assert_eq!(slots.occupancy(1), 0);
    assert_eq!(slots.occupancy(2), 2);
    assert_eq!(slots.num_layers(), 3);
}
