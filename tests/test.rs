#[cfg(test)]
mod tests {

    use layered::adt::dag::{NodeHandle, NodeRef, DAG};
    use layered::backends::svg::SVGWriter;
    use layered::graphml;
    use layered::render::render_layout;
    use layered::topo::dummies::DummyInserter;
    use layered::topo::labeling::coffman_graham_labels;
    use layered::topo::layout::{Layout, LayeredGraph, LayoutOptions};
    use layered::topo::optimal::DummyMinimizer;
    use layered::LayoutError;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashSet};

    fn real(i: usize) -> NodeRef {
        NodeRef::Real(NodeHandle::new(i))
    }

    fn layout(n: usize, edges: &[(usize, usize)], opt: LayoutOptions) -> Layout {
        let g = LayeredGraph::new(n, edges).unwrap();
        g.do_it(&opt).unwrap()
    }

    /// Check the properties that every layout must have, without relying on
    /// the verifier of the library.
    fn check_layout(n: usize, edges: &[(usize, usize)], layout: &Layout) {
        assert_eq!(layout.num_real(), n);
        for &(a, b) in edges {
            assert!(layout.layer(real(a)) > layout.layer(real(b)));
        }
        for (from, to) in layout.edges() {
            assert_eq!(layout.layer(from), layout.layer(to) + 1);
        }
        let mut slots = HashSet::new();
        for node in layout.iter() {
            let p = layout.placement(node);
            assert!(slots.insert((p.layer, p.pos)));
        }
        assert_eq!(layout.len(), n + layout.num_dummies());
    }

    /// The smallest total edge span over all layerings, by brute force.
    fn min_total_span(n: usize, edges: &[(usize, usize)]) -> usize {
        let mut best = usize::MAX;
        let mut layers = vec![0; n];
        loop {
            let feasible = edges.iter().all(|&(a, b)| layers[a] > layers[b]);
            if feasible {
                let span = edges.iter().map(|&(a, b)| layers[a] - layers[b]).sum();
                best = best.min(span);
            }

            // Move to the next assignment in 0..n for every node.
            let mut i = 0;
            while i < n {
                layers[i] += 1;
                if layers[i] < n {
                    break;
                }
                layers[i] = 0;
                i += 1;
            }
            if i == n {
                return best;
            }
        }
    }

    #[test]
    fn two_node_chain() {
        let l = layout(2, &[(0, 1)], LayoutOptions::coffman_graham(1));
        assert_eq!(l.layer(real(0)), 1);
        assert_eq!(l.layer(real(1)), 0);
        assert_eq!(l.num_dummies(), 0);
    }

    #[test]
    fn chain_with_skip_edge() {
        let edges = [(0, 1), (1, 2), (0, 2)];
        let l = layout(3, &edges, LayoutOptions::coffman_graham(2));
        assert_eq!(l.layer(real(0)), 2);
        assert_eq!(l.layer(real(1)), 1);
        assert_eq!(l.layer(real(2)), 0);
        assert_eq!(l.num_dummies(), 1);
        let dummy = l.iter().find(|n| n.is_dummy()).unwrap();
        assert_eq!(l.layer(dummy), 1);
        check_layout(3, &edges, &l);
    }

    #[test]
    fn diamond_is_optimal() {
        let edges = [(0, 1), (0, 2), (1, 3), (2, 3)];
        let l = layout(4, &edges, LayoutOptions::min_dummies());
        assert_eq!(l.layer(real(0)), 2);
        assert_eq!(l.layer(real(1)), 1);
        assert_eq!(l.layer(real(2)), 1);
        assert_eq!(l.layer(real(3)), 0);
        assert_eq!(l.num_dummies(), 0);
        assert_eq!(l.total_span(), 4);

        let dag = DAG::from_edges(4, &edges).unwrap();
        let res = DummyMinimizer::new(&dag).optimize().unwrap();
        assert!((res.objective - 4.).abs() < 0.01);
    }

    #[test]
    fn disconnected_chains() {
        let edges = [(0, 1), (2, 3)];
        let l = layout(4, &edges, LayoutOptions::coffman_graham(1));
        assert_eq!(l.num_layers(), 4);
        // The ready node with the smallest label is placed first.
        assert_eq!(l.layer(real(1)), 0);
        assert_eq!(l.layer(real(0)), 1);
        assert_eq!(l.layer(real(3)), 2);
        assert_eq!(l.layer(real(2)), 3);
        check_layout(4, &edges, &l);
    }

    #[test]
    fn dummy_insertion_is_idempotent() {
        let edges = [(0, 1), (1, 2), (2, 3), (0, 3), (1, 3)];
        for opt in [LayoutOptions::coffman_graham(2), LayoutOptions::min_dummies()] {
            let mut l = layout(4, &edges, opt);
            let before = l.num_dummies();
            assert_eq!(DummyInserter::new(&mut l).run(), 0);
            assert_eq!(l.num_dummies(), before);
            check_layout(4, &edges, &l);
        }
    }

    #[test]
    fn empty_graph() {
        for opt in [LayoutOptions::coffman_graham(3), LayoutOptions::min_dummies()] {
            let l = layout(0, &[], opt);
            assert!(l.is_empty());
            assert_eq!(l.num_layers(), 0);
        }
    }

    #[test]
    fn cyclic_input_is_rejected() {
        let g = LayeredGraph::new(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let res = g.do_it(&LayoutOptions::coffman_graham(2));
        assert!(matches!(res, Err(LayoutError::MalformedInput { .. })));
        let res = g.do_it(&LayoutOptions::min_dummies());
        assert!(matches!(res, Err(LayoutError::Solver(_))));
    }

    #[test]
    fn invalid_width_is_rejected() {
        let g = LayeredGraph::new(2, &[(0, 1)]).unwrap();
        let res = g.do_it(&LayoutOptions::coffman_graham(0));
        assert!(matches!(res, Err(LayoutError::InvalidWidth(0))));
    }

    #[test]
    fn graphml_to_svg() {
        let text = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <graph id="G" edgedefault="directed">
    <node id="a"/>
    <node id="b"/>
    <node id="c"/>
    <edge source="a" target="b"/>
    <edge source="b" target="c"/>
    <edge source="a" target="c"/>
  </graph>
</graphml>"#;
        let graph = graphml::parse(text).unwrap();
        let l = graph
            .to_layered_graph()
            .and_then(|g| g.do_it(&LayoutOptions::min_dummies()))
            .unwrap();
        assert_eq!(l.num_dummies(), 1);

        let mut svg = SVGWriter::new();
        render_layout(&l, &mut svg);
        let content = svg.finalize();
        assert_eq!(content.matches("<line").count(), 4);
        assert_eq!(content.matches("<circle").count(), 3);
        assert_eq!(content.matches("marker-end").count(), 3);
    }

    /// Generates a random DAG: random pairs of nodes are oriented along a
    /// random permutation of the nodes.
    fn arb_dag(max_nodes: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1..=max_nodes)
            .prop_flat_map(|n| {
                let perm = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
                let pairs = prop::collection::vec((0..n, 0..n), 0..=2 * n);
                (Just(n), perm, pairs)
            })
            .prop_map(|(n, perm, pairs)| {
                let unique: BTreeSet<(usize, usize)> = pairs
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (perm[a.min(b)], perm[a.max(b)]))
                    .collect();
                let edges: Vec<(usize, usize)> = unique.into_iter().collect();
                (n, edges)
            })
    }

    proptest! {
        #[test]
        fn labels_are_topological((n, edges) in arb_dag(12)) {
            let dag = DAG::from_edges(n, &edges).unwrap();
            let labels = coffman_graham_labels(&dag).unwrap();
            let mut sorted = labels.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (1..=n).collect::<Vec<_>>());
            for &(a, b) in &edges {
                prop_assert!(labels[a] < labels[b]);
            }
        }

        #[test]
        fn coffman_graham_layouts_are_valid(
            (n, edges) in arb_dag(12),
            width in 1usize..4,
        ) {
            let l = layout(n, &edges, LayoutOptions::coffman_graham(width));
            check_layout(n, &edges, &l);
            for layer in 0..l.num_layers() {
                let reals = (0..n).filter(|i| l.layer(real(*i)) == layer).count();
                prop_assert!(reals <= width);
            }
            prop_assert_eq!(l.edges().len(), l.total_span());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn min_dummies_is_minimal((n, edges) in arb_dag(5)) {
            let l = layout(n, &edges, LayoutOptions::min_dummies());
            check_layout(n, &edges, &l);
            let best = min_total_span(n, &edges);
            prop_assert_eq!(l.total_span(), best);
            prop_assert_eq!(l.num_dummies(), best - edges.len());
        }
    }
}
