use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::network::SocialNetwork;

pub const DEFAULT_SEED: u64 = 42;

// Fixed step count and dt keep the simulation reproducible.
const STEPS: usize = 400;
const DT: f32 = 0.02;
const SPREAD: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Node positions indexed by node position in the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub positions: Vec<Point>,
}

impl Layout {
    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }
}

/// Force-directed layout, centered on the origin with the largest coordinate at 1.
pub fn spring_layout(net: &SocialNetwork, seed: u64) -> Layout {
    let n = net.node_count();
    if n <= 1 {
        return Layout {
            positions: vec![Point { x: 0.0, y: 0.0 }; n],
        };
    }

    let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
        force_charge: 150.0,
        force_spring: 0.05,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let handles: Vec<_> = (0..n)
        .map(|position| {
            graph.add_node(NodeData {
                x: rng.gen_range(0.0..SPREAD),
                y: rng.gen_range(0.0..SPREAD),
                mass: 10.0,
                is_anchor: false,
                user_data: position,
            })
        })
        .collect();

    for edge in net.graph.edge_indices() {
        if let Some((a, b)) = net.graph.edge_endpoints(edge) {
            graph.add_edge(handles[a.index()], handles[b.index()], EdgeData::default());
        }
    }

    for _ in 0..STEPS {
        graph.update(DT);
    }

    let mut pos = vec![[0.0f64; 2]; n];
    graph.visit_nodes(|node| {
        if let Some(slot) = pos.get_mut(node.data.user_data) {
            *slot = [node.x() as f64, node.y() as f64];
        }
    });

    Layout {
        positions: rescale(&pos),
    }
}

fn rescale(pos: &[[f64; 2]]) -> Vec<Point> {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p[1]).sum::<f64>() / n;
    let extent = pos
        .iter()
        .flat_map(|p| [(p[0] - cx).abs(), (p[1] - cy).abs()])
        .fold(0.0, f64::max);
    let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };
    pos.iter()
        .map(|p| Point {
            x: (p[0] - cx) * scale,
            y: (p[1] - cy) * scale,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let net = SocialNetwork::friendship().unwrap();
        assert_eq!(spring_layout(&net, 42), spring_layout(&net, 42));
    }

    #[test]
    fn different_seed_moves_nodes() {
        let net = SocialNetwork::friendship().unwrap();
        assert_ne!(spring_layout(&net, 42), spring_layout(&net, 7));
    }

    #[test]
    fn positions_fit_unit_box() {
        let net = SocialNetwork::friendship().unwrap();
        let layout = spring_layout(&net, DEFAULT_SEED);
        assert_eq!(layout.positions.len(), 10);
        for p in &layout.positions {
            assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9);
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn two_nodes_mirror_each_other() {
        let net = SocialNetwork::from_parts(&["a", "b"], &[("a", "b")]).unwrap();
        let layout = spring_layout(&net, DEFAULT_SEED);
        let (a, b) = (layout.positions[0], layout.positions[1]);
        assert!((a.x + b.x).abs() < 1e-9 && (a.y + b.y).abs() < 1e-9);
        assert!((a.x.abs().max(a.y.abs()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_node_sits_at_origin() {
        let net = SocialNetwork::from_parts(&["solo"], &[]).unwrap();
        let layout = spring_layout(&net, DEFAULT_SEED);
        assert_eq!(layout.position(0), Some(Point { x: 0.0, y: 0.0 }));
    }
}
