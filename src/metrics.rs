use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;

use crate::network::SocialNetwork;

/// Ordered mapping from node name to a score.
#[derive(Debug, Clone, PartialEq)]
pub struct Scores<T> {
    entries: Vec<(String, T)>,
}

impl<T: Copy + PartialOrd> Scores<T> {
    pub fn new(entries: Vec<(String, T)>) -> Self {
        Scores { entries }
    }

    pub fn get(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-scoring node. Ties go to the node declared first.
    pub fn max(&self) -> Option<(&str, T)> {
        let mut best: Option<(&str, T)> = None;
        for (name, value) in self.iter() {
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((name, value));
            }
        }
        best
    }
}

impl<T: Serialize> Serialize for Scores<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(n, v)| (n, v)))
    }
}

impl<T: fmt::Display> fmt::Display for Scores<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

fn collect<T: Copy + PartialOrd>(net: &SocialNetwork, values: Vec<T>) -> Scores<T> {
    Scores::new(net.names().map(str::to_string).zip(values).collect())
}

/// Number of incident edges per node.
pub fn degrees(net: &SocialNetwork) -> Scores<usize> {
    let values = net
        .graph
        .node_indices()
        .map(|i| net.graph.neighbors(i).count())
        .collect();
    collect(net, values)
}

/// Degree divided by `n - 1`. A lone node scores 1.0.
pub fn degree_centrality(net: &SocialNetwork) -> Scores<f64> {
    let n = net.node_count();
    let values = degrees(net)
        .iter()
        .map(|(_, d)| if n <= 1 { 1.0 } else { d as f64 / (n - 1) as f64 })
        .collect();
    collect(net, values)
}

/// Normalized betweenness centrality (Brandes), endpoints excluded.
pub fn betweenness_centrality(net: &SocialNetwork) -> Scores<f64> {
    let n = net.node_count();
    let neighbors = net.adjacency();

    let per_source: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|s| Sweep::run(&neighbors, s).dependencies(s))
        .collect();

    let mut centrality = vec![0.0; n];
    for delta in &per_source {
        for (c, d) in centrality.iter_mut().zip(delta) {
            *c += d;
        }
    }

    // Each undirected pair is counted from both ends.
    let scale = if n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        0.5
    };
    for c in &mut centrality {
        *c *= scale;
    }

    collect(net, centrality)
}

/// Single-source BFS over unweighted adjacency lists.
struct Sweep {
    /// Nodes in non-decreasing distance from the source.
    order: Vec<usize>,
    dist: Vec<Option<usize>>,
    /// Number of shortest paths from the source.
    sigma: Vec<f64>,
    predecessors: Vec<Vec<usize>>,
}

impl Sweep {
    fn run(neighbors: &[Vec<usize>], s: usize) -> Self {
        let n = neighbors.len();
        let mut order = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[s] = 1.0;
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v].unwrap_or(0);
            for &w in &neighbors[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        Sweep {
            order,
            dist,
            sigma,
            predecessors,
        }
    }

    /// Brandes dependency of the source on every node.
    fn dependencies(&self, s: usize) -> Vec<f64> {
        let mut delta = vec![0.0f64; self.sigma.len()];
        for &w in self.order.iter().rev() {
            for &v in &self.predecessors[w] {
                delta[v] += (self.sigma[v] / self.sigma[w]) * (1.0 + delta[w]);
            }
        }
        delta[s] = 0.0;
        delta
    }
}

/// Closeness centrality with the Wasserman-Faust correction for nodes that
/// cannot reach the whole graph. Isolated nodes score 0.0.
pub fn closeness_centrality(net: &SocialNetwork) -> Scores<f64> {
    let n = net.node_count();
    let neighbors = net.adjacency();

    let values = (0..n)
        .into_par_iter()
        .map(|s| {
            let sweep = Sweep::run(&neighbors, s);
            let total: usize = sweep.dist.iter().flatten().sum();
            let reachable = sweep.order.len();
            if total == 0 || n <= 1 {
                return 0.0;
            }
            let r = (reachable - 1) as f64;
            (r / total as f64) * (r / (n - 1) as f64)
        })
        .collect();

    collect(net, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friends() -> SocialNetwork {
        SocialNetwork::friendship().unwrap()
    }

    #[test]
    fn degrees_follow_edge_list() {
        let d = degrees(&friends());
        let expected = [
            ("Alice", 3),
            ("Bob", 4),
            ("Charlie", 4),
            ("Diana", 4),
            ("Eve", 4),
            ("Frank", 2),
            ("Grace", 3),
            ("Hannah", 2),
            ("Ian", 3),
            ("Jack", 3),
        ];
        for (name, deg) in expected {
            assert_eq!(d.get(name), Some(deg), "{name}");
        }
        assert_eq!(d.iter().map(|(_, v)| v).sum::<usize>(), 32);
    }

    #[test]
    fn max_prefers_first_declared() {
        let d = degrees(&friends());
        assert_eq!(d.max(), Some(("Bob", 4)));
    }

    #[test]
    fn degree_centrality_is_degree_over_n_minus_one() {
        let net = friends();
        let d = degrees(&net);
        let dc = degree_centrality(&net);
        for (name, value) in dc.iter() {
            let expected = d.get(name).unwrap() as f64 / 9.0;
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn betweenness_known_values() {
        let b = betweenness_centrality(&friends());
        assert!((b.get("Bob").unwrap() - 0.25).abs() < 1e-9);
        assert!(b.get("Hannah").unwrap().abs() < 1e-12);
        assert!((b.get("Ian").unwrap() - 0.175926).abs() < 1e-6);
        assert!((b.get("Frank").unwrap() - 0.009259).abs() < 1e-6);
    }

    #[test]
    fn closeness_known_values() {
        let c = closeness_centrality(&friends());
        assert!((c.get("Bob").unwrap() - 9.0 / 14.0).abs() < 1e-9);
        assert!((c.get("Diana").unwrap() - 0.6).abs() < 1e-9);
        assert!((c.get("Hannah").unwrap() - 0.409091).abs() < 1e-6);
    }

    #[test]
    fn path_graph_midpoint() {
        let net = SocialNetwork::from_parts(&["a", "b", "c"], &[("a", "b"), ("b", "c")]).unwrap();
        let b = betweenness_centrality(&net);
        assert!((b.get("b").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(b.get("a"), Some(0.0));
        let c = closeness_centrality(&net);
        assert!((c.get("b").unwrap() - 1.0).abs() < 1e-12);
        assert!((c.get("a").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sweep_counts_parallel_shortest_paths() {
        // 4-cycle a-b-c-d: two shortest paths from a to c, both of length 2.
        let neighbors = vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![2, 0]];
        let sweep = Sweep::run(&neighbors, 0);
        assert_eq!(sweep.dist, vec![Some(0), Some(1), Some(2), Some(1)]);
        assert_eq!(sweep.sigma[2], 2.0);
        assert_eq!(sweep.order[0], 0);
        assert_eq!(sweep.order[3], 2);
        let delta = sweep.dependencies(0);
        assert!((delta[1] - 0.5).abs() < 1e-12 && (delta[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn isolated_and_single_nodes() {
        let net = SocialNetwork::from_parts(&["a", "b", "c"], &[("a", "b")]).unwrap();
        let c = closeness_centrality(&net);
        assert_eq!(c.get("c"), Some(0.0));
        assert!((c.get("a").unwrap() - 0.5).abs() < 1e-12);

        let lone = SocialNetwork::from_parts(&["a"], &[]).unwrap();
        assert_eq!(degree_centrality(&lone).get("a"), Some(1.0));
        assert_eq!(closeness_centrality(&lone).get("a"), Some(0.0));
        assert_eq!(betweenness_centrality(&lone).get("a"), Some(0.0));
    }

    #[test]
    fn display_keeps_order() {
        let s = Scores::new(vec![("b".to_string(), 2usize), ("a".to_string(), 1)]);
        assert_eq!(s.to_string(), "{b: 2, a: 1}");
    }
}
