use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{ReportError, Result};

pub const FRIENDS: [&str; 10] = [
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Hannah", "Ian", "Jack",
];

pub const FRIENDSHIPS: [(&str, &str); 16] = [
    ("Alice", "Bob"),
    ("Alice", "Charlie"),
    ("Bob", "Charlie"),
    ("Charlie", "Diana"),
    ("Diana", "Eve"),
    ("Bob", "Diana"),
    ("Frank", "Eve"),
    ("Eve", "Ian"),
    ("Diana", "Ian"),
    ("Ian", "Grace"),
    ("Grace", "Hannah"),
    ("Hannah", "Jack"),
    ("Grace", "Jack"),
    ("Charlie", "Frank"),
    ("Alice", "Eve"),
    ("Bob", "Jack"),
];

/// Undirected, unweighted, simple graph of named people.
///
/// Node indices follow declaration order, which is also the iteration order
/// every metric and report uses.
#[derive(Debug, Clone)]
pub struct SocialNetwork {
    pub graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl SocialNetwork {
    /// The hardcoded friendship dataset.
    pub fn friendship() -> Result<Self> {
        Self::from_parts(&FRIENDS, &FRIENDSHIPS)
    }

    pub fn from_parts(nodes: &[&str], edges: &[(&str, &str)]) -> Result<Self> {
        let mut graph = UnGraph::<String, ()>::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());

        for &name in nodes {
            if index.contains_key(name) {
                return Err(ReportError::DuplicateNode(name.to_string()));
            }
            let idx = graph.add_node(name.to_string());
            index.insert(name.to_string(), idx);
        }

        for &(a, b) in edges {
            let ia = *index
                .get(a)
                .ok_or_else(|| ReportError::UnknownNode(a.to_string()))?;
            let ib = *index
                .get(b)
                .ok_or_else(|| ReportError::UnknownNode(b.to_string()))?;
            if ia == ib {
                return Err(ReportError::SelfLoop(a.to_string()));
            }
            if graph.find_edge(ia, ib).is_none() {
                graph.add_edge(ia, ib, ());
            } else {
                debug!(a, b, "duplicate edge merged");
            }
        }

        Ok(SocialNetwork { graph, index })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Node names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(|i| self.graph[i].as_str())
    }

    /// Adjacency lists by node position, used by the shortest-path sweeps.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        self.graph
            .node_indices()
            .map(|i| self.graph.neighbors(i).map(|j| j.index()).collect())
            .collect()
    }
}
