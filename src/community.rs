use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

use crate::network::SocialNetwork;

/// Disjoint communities, largest first, members in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    pub communities: Vec<Vec<String>>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Community index for each member.
    pub fn membership(&self) -> HashMap<&str, usize> {
        self.communities
            .iter()
            .enumerate()
            .flat_map(|(c, members)| members.iter().map(move |m| (m.as_str(), c)))
            .collect()
    }
}

/// Clauset-Newman-Moore greedy merging. Stops once the best merge would
/// lower modularity; zero-gain merges still happen.
pub fn greedy_modularity_communities(net: &SocialNetwork) -> Partition {
    let n = net.node_count();
    let m = net.edge_count() as i64;
    let adjacency = net.adjacency();

    // Communities as sorted node positions; kept in order of their lowest member.
    let mut communities: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut degree_sum: Vec<i64> = adjacency.iter().map(|a| a.len() as i64).collect();
    let mut links: Vec<HashMap<usize, i64>> = adjacency
        .iter()
        .map(|a| a.iter().map(|&j| (j, 1)).collect())
        .collect();

    loop {
        // Gain numerator: (2m*l - di*dj) / (2m^2). Ties keep the earliest pair.
        let mut best: Option<(i64, usize, usize)> = None;
        for i in 0..communities.len() {
            for j in (i + 1)..communities.len() {
                let Some(&l) = links[i].get(&j) else {
                    continue;
                };
                let gain = 2 * m * l - degree_sum[i] * degree_sum[j];
                if best.is_none_or(|(g, _, _)| gain > g) {
                    best = Some((gain, i, j));
                }
            }
        }

        let Some((gain, i, j)) = best.filter(|&(g, _, _)| g >= 0) else {
            break;
        };
        trace!(gain, left = ?communities[i], right = ?communities[j], "merging communities");

        let absorbed = communities.remove(j);
        communities[i].extend(absorbed);
        communities[i].sort_unstable();
        let absorbed_degree = degree_sum.remove(j);
        degree_sum[i] += absorbed_degree;

        let absorbed_links = links.remove(j);
        for (k, l) in absorbed_links {
            if k != i {
                *links[i].entry(k).or_insert(0) += l;
            }
        }
        // Reindex: j is gone, everything above it shifts down by one.
        for (c, row) in links.iter_mut().enumerate() {
            let mut merged: HashMap<usize, i64> = HashMap::with_capacity(row.len());
            for (&k, &l) in row.iter() {
                let k = if k == j { i } else if k > j { k - 1 } else { k };
                if k != c {
                    *merged.entry(k).or_insert(0) += l;
                }
            }
            *row = merged;
        }
    }

    communities.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));

    let names: Vec<&str> = net.names().collect();
    Partition {
        communities: communities
            .into_iter()
            .map(|c| c.into_iter().map(|i| names[i].to_string()).collect())
            .collect(),
    }
}

/// Newman modularity of `partition` over `net`.
pub fn modularity(net: &SocialNetwork, partition: &Partition) -> f64 {
    let m = net.edge_count() as f64;
    if m == 0.0 {
        return 0.0;
    }
    let membership = partition.membership();
    let community_of = |idx| membership.get(net.name(idx)).copied();

    let mut internal = vec![0.0f64; partition.len()];
    let mut degree_sum = vec![0.0f64; partition.len()];
    for idx in net.graph.node_indices() {
        if let Some(c) = community_of(idx) {
            degree_sum[c] += net.graph.neighbors(idx).count() as f64;
        }
    }
    for edge in net.graph.edge_indices() {
        if let Some((a, b)) = net.graph.edge_endpoints(edge) {
            match (community_of(a), community_of(b)) {
                (Some(ca), Some(cb)) if ca == cb => internal[ca] += 1.0,
                _ => {}
            }
        }
    }

    internal
        .iter()
        .zip(&degree_sum)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}
