/*!
This crate computes layered drawings of directed acyclic graphs. Every node is
assigned a layer (a vertical rank) and a position within its layer, such that
each edge points from a higher layer to a lower one. Edges that span more than
one layer are split into chains of invisible dummy nodes, so that the drawing
can be made of straight segments that connect adjacent layers.

Two layering strategies are provided:

* The Coffman-Graham heuristic, which limits the number of nodes per layer.
* A linear program that minimizes the total number of dummy nodes.

The crate also comes with a GraphML reader and an SVG writer, and the
project comes with a command line utility that renders .graphml files to .svg.

# Example: lay out a small graph

```rust
    use layered::adt::dag::{NodeHandle, NodeRef};
    use layered::topo::layout::{LayeredGraph, LayoutOptions};

    // A -> B -> C, and a skip edge A -> C.
    let graph = LayeredGraph::new(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
    let layout = graph.do_it(&LayoutOptions::coffman_graham(2)).unwrap();

    let a = NodeRef::Real(NodeHandle::new(0));
    assert_eq!(layout.layer(a), 2);
    // The skip edge goes through one dummy node.
    assert_eq!(layout.num_dummies(), 1);
```

# Example: render a GraphML file

```rust
fn render_graphml() {
    use layered::backends::svg::SVGWriter;
    use layered::core::utils::save_to_file;
    use layered::graphml;
    use layered::render::render_layout;
    use layered::topo::layout::LayoutOptions;
    use std::fs;

    let contents = fs::read_to_string("graph.graphml").unwrap();
    let graph = graphml::parse(&contents).unwrap();
    let layout = graph
        .to_layered_graph()
        .and_then(|g| g.do_it(&LayoutOptions::min_dummies()))
        .unwrap();

    let mut svg = SVGWriter::new();
    render_layout(&layout, &mut svg);
    let _ = save_to_file("/tmp/graph.svg", &svg.finalize());
}
```

*/

pub mod adt;
pub mod backends;
pub mod core;
pub mod error;
pub mod graphml;
pub mod render;
pub mod topo;

pub use error::{LayoutError, Result};
