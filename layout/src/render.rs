//! Turns a layout into draw calls. Every node is drawn at its slot: the
//! position gives the x coordinate and the layer gives the y coordinate, with
//! the highest layer at the top. Edges are straight segments, and only the
//! segments that end in a real node carry an arrow head. Dummy nodes are not
//! drawn.

use crate::adt::dag::NodeRef;
use crate::core::format::RenderBackend;
use crate::core::geometry::Point;
use crate::core::style::StyleAttr;
use crate::topo::layout::Layout;

/// The distance between two slots, and between two layers.
pub const SCALE: Point = Point { x: 10., y: 20. };

/// The offset of the drawing from the edges of the canvas.
pub const PADDING: f64 = 5.;

/// The radius of the node circles.
pub const NODE_RADIUS: f64 = 2.;

/// \returns the canvas coordinate of \p node.
pub fn node_location(layout: &Layout, node: NodeRef) -> Point {
    let top = layout.num_layers().saturating_sub(1);
    let p = layout.placement(node);
    let slot = Point::new(p.pos as f64, (top - p.layer) as f64);
    slot.mul(SCALE).add(Point::splat(PADDING))
}

pub fn render_layout(layout: &Layout, rb: &mut dyn RenderBackend) {
    let edge_look = StyleAttr::edge();
    for (from, to) in layout.edges() {
        let start = node_location(layout, from);
        let stop = node_location(layout, to);
        rb.draw_line(start, stop, !to.is_dummy(), &edge_look);
    }

    let node_look = StyleAttr::node();
    for node in layout.iter().filter(|n| !n.is_dummy()) {
        rb.draw_circle(node_location(layout, node), NODE_RADIUS, &node_look);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topo::layout::{LayeredGraph, LayoutOptions};

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(Point, Point, bool)>,
        circles: Vec<Point>,
    }

    impl RenderBackend for Recorder {
        fn draw_line(&mut self, start: Point, stop: Point, arrow: bool, _: &StyleAttr) {
            self.lines.push((start, stop, arrow));
        }
        fn draw_circle(&mut self, xy: Point, _: f64, _: &StyleAttr) {
            self.circles.push(xy);
        }
    }

    #[test]
    fn test_render_skip_edge() {
        let g = LayeredGraph::new(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        let layout = g.do_it(&LayoutOptions::coffman_graham(2)).unwrap();
        let mut rec = Recorder::default();
        render_layout(&layout, &mut rec);

        // Four segments, one of them enters the dummy without an arrow.
        assert_eq!(rec.lines.len(), 4);
        assert_eq!(rec.lines.iter().filter(|l| !l.2).count(), 1);
        // The dummy is not drawn.
        assert_eq!(rec.circles.len(), 3);
        // The source is at the top.
        assert_eq!(rec.circles[0], Point::new(5., 5.));
        assert_eq!(rec.circles[2], Point::new(5., 45.));
    }
}
