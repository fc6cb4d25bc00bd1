use std::collections::HashSet;

use proptest::prelude::*;

use friendship_report::output::{render_html, render_text, write_report};
use friendship_report::{
    OutputFormat, ReportConfig, ReportContext, SocialNetwork, betweenness_centrality,
    closeness_centrality, degree_centrality, degrees, generate, greedy_modularity_communities,
};

fn assert_partition_covers(net: &SocialNetwork) {
    let partition = greedy_modularity_communities(net);
    let mut seen = HashSet::new();
    for community in &partition.communities {
        assert!(!community.is_empty());
        for member in community {
            assert!(seen.insert(member.clone()), "{member} in two communities");
        }
    }
    let all: HashSet<String> = net.names().map(str::to_string).collect();
    assert_eq!(seen, all);
}

#[test]
fn friendship_partition_is_a_cover() {
    assert_partition_covers(&SocialNetwork::friendship().unwrap());
}

#[test]
fn centralities_stay_in_unit_interval() {
    let net = SocialNetwork::friendship().unwrap();
    for scores in [
        betweenness_centrality(&net),
        closeness_centrality(&net),
        degree_centrality(&net),
    ] {
        for (name, value) in scores.iter() {
            assert!((0.0..=1.0).contains(&value), "{name} = {value}");
        }
    }
}

#[test]
fn two_runs_are_identical() {
    let first = ReportContext::friendship(ReportConfig::default()).unwrap();
    let second = ReportContext::friendship(ReportConfig::default()).unwrap();
    assert_eq!(first.layout, second.layout);

    let a = generate(&first).unwrap();
    let b = generate(&second).unwrap();
    assert_eq!(a.metrics, b.metrics);
    assert_eq!(render_html(&a), render_html(&b));
}

#[test]
fn most_influential_is_bob() {
    let ctx = ReportContext::friendship(ReportConfig::default()).unwrap();
    let report = generate(&ctx).unwrap();
    assert_eq!(report.metrics.most_influential.name, "Bob");
    assert!((report.metrics.most_influential.value - 4.0 / 9.0).abs() < 1e-12);
    assert_eq!(report.metrics.most_connected.name, "Bob");
    assert!(render_text(&report).contains("Most influential person: Bob (Centrality: 0.4444)"));
}

#[test]
fn writes_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        out_dir: dir.path().to_path_buf(),
        formats: vec![OutputFormat::Html, OutputFormat::Json],
        ..ReportConfig::default()
    };
    let ctx = ReportContext::friendship(config).unwrap();
    let report = generate(&ctx).unwrap();
    let written = write_report(&ctx, &report).unwrap();
    assert_eq!(written.len(), 4);

    let html = std::fs::read_to_string(dir.path().join("report.html")).unwrap();
    assert_eq!(html.matches("<svg").count(), 3);
    assert_eq!(html.matches("<section>").count(), 5);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(json["metrics"]["degrees"]["Charlie"], 4);
    assert_eq!(json["metrics"]["communities"]["communities"][2][0], "Grace");

    let mut rows = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
    let records: Vec<_> = rows.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 10);
    assert_eq!(&records[0][0], "Alice");
    assert_eq!(&records[0][5], "1");

    let dot = std::fs::read_to_string(dir.path().join("communities.dot")).unwrap();
    assert!(dot.contains("fillcolor"));
}

fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..16).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..40);
        (Just(n), edges)
    })
}

fn build(n: usize, raw: &[(usize, usize)]) -> SocialNetwork {
    let names: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    let nodes: Vec<&str> = names.iter().map(String::as_str).collect();
    let edges: Vec<(&str, &str)> = raw
        .iter()
        .filter(|(a, b)| a != b)
        .map(|&(a, b)| (nodes[a], nodes[b]))
        .collect();
    SocialNetwork::from_parts(&nodes, &edges).unwrap()
}

proptest! {
    #[test]
    fn degree_sum_is_twice_edges((n, raw) in arb_graph()) {
        let net = build(n, &raw);
        let total: usize = degrees(&net).iter().map(|(_, d)| d).sum();
        prop_assert_eq!(total, 2 * net.edge_count());
    }

    #[test]
    fn partition_always_covers((n, raw) in arb_graph()) {
        assert_partition_covers(&build(n, &raw));
    }

    #[test]
    fn scores_bounded_on_random_graphs((n, raw) in arb_graph()) {
        let net = build(n, &raw);
        for (_, v) in betweenness_centrality(&net).iter().chain(closeness_centrality(&net).iter()) {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&v));
        }
    }
}
