//! Graph view over a validated plan.
//!
//! A read-only petgraph projection of a [`CircuitPlan`] used for
//! connectivity queries: adjacency, isolated parts, summary statistics.
//! Built per call, never cached on the plan.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

use crate::circuit::types::{CircuitConnection, CircuitPlan};

/// Directed graph over component ids with one edge per connection.
pub struct CircuitGraph<'a> {
    graph: DiGraph<&'a str, &'a CircuitConnection>,
    indices: HashMap<&'a str, NodeIndex>,
}

impl<'a> CircuitGraph<'a> {
    pub fn from_plan(plan: &'a CircuitPlan) -> Self {
        let mut graph = DiGraph::new();
        let mut indices = HashMap::new();

        for component in &plan.components {
            let index = graph.add_node(component.id.as_str());
            indices.insert(component.id.as_str(), index);
        }

        // The validator guarantees referential closure, but a hand-built
        // plan may still dangle; those edges are skipped.
        for connection in &plan.connections {
            if let (Some(&from), Some(&to)) = (
                indices.get(connection.from.as_str()),
                indices.get(connection.to.as_str()),
            ) {
                graph.add_edge(from, to, connection);
            }
        }

        Self { graph, indices }
    }

    /// Ids of components this component connects to (outgoing edges).
    pub fn neighbors(&self, id: &str) -> Vec<&'a str> {
        let Some(&index) = self.indices.get(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(index, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .collect()
    }

    /// Whether a component has no connection in either direction.
    pub fn is_isolated(&self, id: &str) -> bool {
        match self.indices.get(id) {
            Some(&index) => self.graph.neighbors_undirected(index).next().is_none(),
            None => false,
        }
    }

    pub fn stats(&self) -> GraphStats {
        let isolated = self
            .indices
            .values()
            .filter(|&&index| self.graph.neighbors_undirected(index).next().is_none())
            .count();
        GraphStats {
            components: self.graph.node_count(),
            connections: self.graph.edge_count(),
            isolated,
        }
    }
}

/// Summary counts for human-readable reports.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub components: usize,
    pub connections: usize,
    pub isolated: usize,
}
