//! Property tests for the dependency orderer.

use std::collections::BTreeMap;

use proptest::prelude::*;

use sdd_system::techpack::DependencyGraph;

/// Random acyclic graphs: node `c{i}` may only depend on nodes with a
/// smaller index, so every generated graph has a valid order.
fn arb_acyclic_graph() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    (2usize..9).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), n)
            .prop_map(|node_deps| {
                node_deps
                    .into_iter()
                    .enumerate()
                    .map(|(i, picks)| {
                        let mut deps: Vec<String> = picks
                            .into_iter()
                            .filter(|_| i > 0)
                            .map(|pick| format!("c{}", pick.index(i)))
                            .collect();
                        deps.sort();
                        deps.dedup();
                        (format!("c{i}"), deps)
                    })
                    .collect()
            })
    })
}

fn order_of(graph: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let (built, issues) = DependencyGraph::build(graph);
    assert!(issues.is_empty());
    built.topological_order().unwrap()
}

proptest! {
    #[test]
    fn order_contains_every_component_once(graph in arb_acyclic_graph()) {
        let order = order_of(&graph);
        prop_assert_eq!(order.len(), graph.len());
        let mut sorted = order.clone();
        sorted.sort();
        let keys: Vec<String> = graph.keys().cloned().collect();
        prop_assert_eq!(sorted, keys);
    }

    #[test]
    fn dependencies_precede_dependents(graph in arb_acyclic_graph()) {
        let order = order_of(&graph);
        let position: BTreeMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();
        for (name, deps) in &graph {
            for dep in deps {
                prop_assert!(position[dep.as_str()] < position[name.as_str()]);
            }
        }
    }

    #[test]
    fn order_is_deterministic(graph in arb_acyclic_graph()) {
        prop_assert_eq!(order_of(&graph), order_of(&graph));
    }

    #[test]
    fn no_dependencies_orders_alphabetically(n in 2usize..9) {
        let graph: BTreeMap<String, Vec<String>> =
            (0..n).map(|i| (format!("c{i}"), Vec::new())).collect();
        let order = order_of(&graph);
        let mut sorted = order.clone();
        sorted.sort();
        prop_assert_eq!(order, sorted);
    }

    #[test]
    fn cycles_never_order_successfully(n in 2usize..9) {
        // A ring: every node depends on the next, closing back on c0.
        let graph: BTreeMap<String, Vec<String>> = (0..n)
            .map(|i| (format!("c{i}"), vec![format!("c{}", (i + 1) % n)]))
            .collect();
        let (built, issues) = DependencyGraph::build(&graph);
        prop_assert!(issues.is_empty());
        let err = built.topological_order().unwrap_err();
        prop_assert_eq!(err.code(), "dependency_cycle");
    }
}
