//! Component dependency ordering.
//!
//! Topological sort of component types via Kahn's algorithm. The ready
//! queue is kept lexicographically sorted at all times (sorted
//! initialization, sorted dependent iteration, sorted insertion), so the
//! same acyclic graph always yields the same order across runs and
//! platforms. Scaffolding automation depends on that stability.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::error::{Result, SddError};
use crate::techpack::manifest::Component;

/// Owned in-degree and adjacency bookkeeping for one `components` map.
#[derive(Debug)]
pub struct DependencyGraph {
    in_degree: BTreeMap<String, usize>,
    /// dependency → dependents (forward edges).
    dependents: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build the graph, failing with `UnknownDependency` on the first
    /// `depends_on` target that is not a declared component type.
    pub fn from_components(components: &BTreeMap<String, Component>) -> Result<Self> {
        let deps = components
            .iter()
            .map(|(name, component)| (name.clone(), component.depends_on.clone()))
            .collect();
        let (graph, unknown) = Self::build(&deps);
        match unknown.into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(graph),
        }
    }

    /// Build the graph from raw name → `depends_on` pairs, collecting an
    /// `UnknownDependency` issue per dangling target instead of failing.
    /// Unknown targets contribute no edge.
    #[must_use]
    pub fn build(depends_on: &BTreeMap<String, Vec<String>>) -> (Self, Vec<SddError>) {
        let mut issues = Vec::new();
        let mut in_degree: BTreeMap<String, usize> =
            depends_on.keys().map(|name| (name.clone(), 0)).collect();
        let mut dependents: BTreeMap<String, Vec<String>> =
            depends_on.keys().map(|name| (name.clone(), Vec::new())).collect();

        for (name, deps) in depends_on {
            for dep in deps {
                if let Some(list) = dependents.get_mut(dep) {
                    list.push(name.clone());
                    if let Some(degree) = in_degree.get_mut(name) {
                        *degree += 1;
                    }
                } else {
                    issues.push(SddError::UnknownDependency(format!(
                        "components.{name}.depends_on: references unknown component type \"{dep}\""
                    )));
                }
            }
        }

        (
            Self {
                in_degree,
                dependents,
            },
            issues,
        )
    }

    /// Run Kahn's algorithm, consuming the graph.
    ///
    /// On success the full ordered list of component type names is
    /// returned, every name preceded by all of its dependencies. A cycle
    /// is reported as `DependencyCycle` listing the names not reached by
    /// the time the queue empties (a superset of the cycle, sorted).
    pub fn topological_order(mut self) -> Result<Vec<String>> {
        let total = self.in_degree.len();

        // BTreeMap iteration order makes the initial queue sorted.
        let mut queue: Vec<String> = self
            .in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| name.clone())
            .collect();

        let mut order: Vec<String> = Vec::with_capacity(total);
        while !queue.is_empty() {
            let current = queue.remove(0);

            if let Some(mut deps) = self.dependents.remove(&current) {
                deps.sort();
                for dependent in deps {
                    let Some(degree) = self.in_degree.get_mut(&dependent) else {
                        continue;
                    };
                    *degree -= 1;
                    if *degree == 0 {
                        // Sorted insertion keeps the queue ordered.
                        let idx = queue.partition_point(|queued| *queued < dependent);
                        queue.insert(idx, dependent);
                    }
                }
            }

            order.push(current);
        }

        if order.len() != total {
            let ordered: BTreeSet<&str> = order.iter().map(String::as_str).collect();
            let remaining = self
                .in_degree
                .keys()
                .filter(|name| !ordered.contains(name.as_str()))
                .join(", ");
            return Err(SddError::DependencyCycle(remaining));
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(name, deps)| {
                (
                    (*name).to_string(),
                    deps.iter().map(|d| (*d).to_string()).collect(),
                )
            })
            .collect()
    }

    fn order_of(pairs: &[(&str, &[&str])]) -> Result<Vec<String>> {
        let (graph, issues) = DependencyGraph::build(&graph_of(pairs));
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        graph.topological_order()
    }

    #[test]
    fn independent_components_order_alphabetically() {
        let order = order_of(&[("db", &[]), ("api", &[])]).unwrap();
        assert_eq!(order, vec!["api", "db"]);
    }

    #[test]
    fn dependency_precedes_dependent() {
        let order = order_of(&[("api", &["db"]), ("db", &[])]).unwrap();
        assert_eq!(order, vec!["db", "api"]);
    }

    #[test]
    fn diamond_orders_deterministically() {
        let order = order_of(&[
            ("app", &["api", "worker"]),
            ("api", &["db"]),
            ("worker", &["db"]),
            ("db", &[]),
        ])
        .unwrap();
        assert_eq!(order, vec!["db", "api", "worker", "app"]);
    }

    #[test]
    fn two_cycle_reports_both_members() {
        let err = order_of(&[("a", &["b"]), ("b", &["a"])]).unwrap_err();
        assert_eq!(err.code(), "dependency_cycle");
        assert_eq!(err.to_string(), "dependency cycle detected involving: a, b");
    }

    #[test]
    fn cycle_remainder_includes_blocked_nodes() {
        // c is acyclic but blocked behind the a<->b cycle.
        let err = order_of(&[("a", &["b"]), ("b", &["a"]), ("c", &["a"])]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dependency cycle detected involving: a, b, c"
        );
    }

    #[test]
    fn unknown_dependency_is_collected() {
        let (_, issues) = DependencyGraph::build(&graph_of(&[("api", &["ghost"])]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code(), "unknown_dependency");
        assert!(issues[0].to_string().contains("ghost"));
    }

    #[test]
    fn empty_graph_orders_to_empty() {
        let order = order_of(&[]).unwrap();
        assert!(order.is_empty());
    }
}
