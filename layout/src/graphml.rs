//! A reader for directed graphs in the GraphML format. Only the structure of
//! the graph is read: the nodes, in document order, and the edges between
//! them. Attribute data is ignored.
//!
//! ```rust
//! use layered::graphml;
//!
//! let text = r#"<graphml>
//!   <graph edgedefault="directed">
//!     <node id="a"/> <node id="b"/>
//!     <edge source="a" target="b"/>
//!   </graph>
//! </graphml>"#;
//! let g = graphml::parse(text).unwrap();
//! assert_eq!(g.num_nodes, 2);
//! assert_eq!(g.edges, vec![(0, 1)]);
//! ```

use crate::error::{LayoutError, Result};
use crate::topo::layout::LayeredGraph;
use std::collections::HashMap;

/// A graph as a node count and a list of (source, target) edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub num_nodes: usize,
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Build the layout input for this graph.
    pub fn to_layered_graph(&self) -> Result<LayeredGraph> {
        LayeredGraph::new(self.num_nodes, &self.edges)
    }
}

fn error(msg: impl Into<String>) -> LayoutError {
    LayoutError::GraphMl(msg.into())
}

fn required_attr<'a>(node: &roxmltree::Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        error(format!(
            "<{}> is missing the '{}' attribute",
            node.tag_name().name(),
            name
        ))
    })
}

/// Parse the GraphML document \p text.
pub fn parse(text: &str) -> Result<Graph> {
    let doc = roxmltree::Document::parse(text).map_err(|err| error(err.to_string()))?;

    let root = doc.root_element();
    if root.tag_name().name() != "graphml" {
        return Err(error("expected a <graphml> root element"));
    }

    let graph = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "graph")
        .ok_or_else(|| error("missing <graph> element"))?;

    if graph.attribute("edgedefault") != Some("directed") {
        return Err(error("only graphs with edgedefault=\"directed\" are supported"));
    }

    let mut result = Graph::default();
    let mut name_to_id: HashMap<&str, usize> = HashMap::new();

    let lookup = |map: &HashMap<&str, usize>, name: &str| -> Result<usize> {
        map.get(name)
            .copied()
            .ok_or_else(|| error(format!("the edge refers to the unknown node '{}'", name)))
    };

    for record in graph.children().filter(|n| n.is_element()) {
        match record.tag_name().name() {
            "node" => {
                let id = required_attr(&record, "id")?;
                if name_to_id.insert(id, result.num_nodes).is_some() {
                    return Err(error(format!("the node '{}' is defined twice", id)));
                }
                result.num_nodes += 1;
            }
            "edge" => {
                let source = lookup(&name_to_id, required_attr(&record, "source")?)?;
                let target = lookup(&name_to_id, required_attr(&record, "target")?)?;
                result.edges.push((source, target));
            }
            "data" => {}
            other => {
                return Err(error(format!("unexpected element <{}>", other)));
            }
        }
    }

    #[cfg(feature = "log")]
    log::info!(
        "Read a graph with {} nodes and {} edges.",
        result.num_nodes,
        result.edges.len()
    );

    Ok(result)
}

#[test]
fn test_parse_with_namespace() {
    let text = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="color" attr.type="string"/>
  <graph id="G" edgedefault="directed">
    <data key="d0">ignored</data>
    <node id="n0"><data key="d0">red</data></node>
    <node id="n1"/>
    <node id="n2"/>
    <edge source="n0" target="n2"/>
    <edge source="n1" target="n2"/>
  </graph>
</graphml>"#;
    let g = parse(text).unwrap();
    assert_eq!(g.num_nodes, 3);
    assert_eq!(g.edges, vec![(0, 2), (1, 2)]);
}

#[test]
fn test_parse_errors() {
    let undirected = r#"<graphml><graph edgedefault="undirected"/></graphml>"#;
    assert!(matches!(parse(undirected), Err(LayoutError::GraphMl(_))));

    let unknown = r#"<graphml><graph edgedefault="directed">
        <node id="a"/><edge source="a" target="b"/></graph></graphml>"#;
    assert!(matches!(parse(unknown), Err(LayoutError::GraphMl(_))));

    let bad_tag = r#"<graphml><graph edgedefault="directed">
        <hyperedge/></graph></graphml>"#;
    assert!(matches!(parse(bad_tag), Err(LayoutError::GraphMl(_))));

    assert!(matches!(parse("<graphml"), Err(LayoutError::GraphMl(_))));
    assert!(matches!(parse("<graph/>"), Err(LayoutError::GraphMl(_))));
}
