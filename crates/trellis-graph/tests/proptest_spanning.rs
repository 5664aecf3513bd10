//! Property tests: the Prim forest against petgraph's reference algorithms.

use petgraph::algo::{connected_components, min_spanning_tree};
use petgraph::data::Element;
use petgraph::graph::{NodeIndex, UnGraph};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use trellis_graph::random::connected_graph;
use trellis_graph::{PrimSpanningTree, UndirectedGraph, WeightedGraph};

/// A simple graph on `0..n` plus the same graph as a petgraph `UnGraph`.
fn arb_graph() -> impl Strategy<Value = (UndirectedGraph<usize>, UnGraph<usize, f64>)> {
    (0_usize..24).prop_flat_map(|n| {
        let pairs = if n == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec((0..n, 0..n, 1_u32..20), 0..64).boxed()
        };
        (Just(n), pairs).prop_map(|(n, pairs)| {
            let mut ours = UndirectedGraph::with_vertices(0..n);
            let mut reference = UnGraph::<usize, f64>::new_undirected();
            let nodes: Vec<NodeIndex> = (0..n).map(|i| reference.add_node(i)).collect();
            for (a, b, w) in pairs {
                let weight = f64::from(w);
                if ours.add_edge(a, b, weight).is_ok() {
                    reference.add_edge(nodes[a], nodes[b], weight);
                }
            }
            (ours, reference)
        })
    })
}

fn reference_mst_weight(graph: &UnGraph<usize, f64>) -> f64 {
    min_spanning_tree(graph)
        .filter_map(|element| match element {
            Element::Edge { weight, .. } => Some(weight),
            Element::Node { .. } => None,
        })
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn forest_edges_equal_vertices_minus_components((ours, reference) in arb_graph()) {
        let forest = PrimSpanningTree::new(&ours).spanning_tree();
        let components = connected_components(&reference);
        prop_assert_eq!(forest.edge_count(), ours.vertex_count() - components);
        prop_assert_eq!(forest.tree_count(), components);
    }

    #[test]
    fn forest_weight_matches_reference((ours, reference) in arb_graph()) {
        let forest = PrimSpanningTree::new(&ours).spanning_tree();
        let expected = reference_mst_weight(&reference);
        prop_assert!((forest.weight() - expected).abs() < 1e-9,
            "prim {} vs reference {}", forest.weight(), expected);
    }

    #[test]
    fn forest_is_idempotent((ours, _reference) in arb_graph()) {
        let prim = PrimSpanningTree::new(&ours);
        let first = prim.spanning_tree();
        let second = prim.spanning_tree();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn forest_edges_are_distinct((ours, _reference) in arb_graph()) {
        let forest = PrimSpanningTree::new(&ours).spanning_tree();
        let mut edges = forest.edges().to_vec();
        edges.sort_unstable();
        edges.dedup();
        prop_assert_eq!(edges.len(), forest.edge_count());
    }

    #[test]
    fn rooted_tree_spans_its_component((ours, _reference) in arb_graph(), pick in any::<prop::sample::Index>()) {
        prop_assume!(ours.vertex_count() > 0);
        let root = pick.index(ours.vertex_count());
        let tree = PrimSpanningTree::new(&ours)
            .spanning_tree_from(Some(&root))
            .expect("root is a vertex");
        let mut reached = tree.touched_vertices(&ours);
        reached.insert(root);
        prop_assert_eq!(tree.edge_count() + 1, reached.len());
    }

    #[test]
    fn connected_graph_weight_is_root_independent(seed in any::<u64>(), n in 2_usize..40, extra in 0_usize..60) {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = connected_graph(n, n - 1 + extra, &mut rng);
        let prim = PrimSpanningTree::new(&graph);
        let forest = prim.spanning_tree();
        prop_assert_eq!(forest.edge_count(), n - 1);

        for root in graph.vertices() {
            let tree = prim.spanning_tree_from(Some(&root)).expect("root is a vertex");
            prop_assert_eq!(tree.edge_count(), n - 1);
            prop_assert!((tree.weight() - forest.weight()).abs() < 1e-9);
        }
    }
}
