use serde::Serialize;
use tracing::{info, info_span};

use crate::community::{Partition, greedy_modularity_communities, modularity};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::layout::{Layout, spring_layout};
use crate::metrics::{
    Scores, betweenness_centrality, closeness_centrality, degree_centrality, degrees,
};
use crate::network::SocialNetwork;
use crate::render::{FigureStyle, SKYBLUE, render_svg};

pub const TITLE: &str = "Friendship Network Analysis";

// Network and layout are computed once and shared by every task.
pub struct ReportContext {
    pub network: SocialNetwork,
    pub layout: Layout,
    pub config: ReportConfig,
}

impl ReportContext {
    /// Context over the hardcoded friendship dataset.
    pub fn friendship(config: ReportConfig) -> Result<Self> {
        Self::new(SocialNetwork::friendship()?, config)
    }

    pub fn new(network: SocialNetwork, config: ReportConfig) -> Result<Self> {
        if network.is_empty() {
            return Err(ReportError::EmptyGraph);
        }
        let layout = spring_layout(&network, config.seed);
        Ok(ReportContext {
            network,
            layout,
            config,
        })
    }

    fn figure(&self, style: &FigureStyle) -> Block {
        Block::Figure {
            svg: render_svg(&self.network, &self.layout, style),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text { text: String },
    Mapping { label: String, rows: Vec<(String, String)> },
    Figure { svg: String },
}

impl Block {
    fn text(text: impl Into<String>) -> Self {
        Block::Text { text: text.into() }
    }

    fn mapping<T>(label: &str, scores: &Scores<T>) -> Self
    where
        T: Copy + PartialOrd + std::fmt::Display,
    {
        Block::Mapping {
            label: label.to_string(),
            rows: scores
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader<T> {
    pub name: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub degrees: Scores<usize>,
    pub most_connected: Leader<usize>,
    pub betweenness: Scores<f64>,
    pub closeness: Scores<f64>,
    pub communities: Partition,
    pub modularity: f64,
    pub degree_centrality: Scores<f64>,
    pub most_influential: Leader<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub metrics: Metrics,
    pub sections: Vec<Section>,
}

fn leader<T: Copy + PartialOrd>(scores: &Scores<T>) -> Result<Leader<T>> {
    scores
        .max()
        .map(|(name, value)| Leader {
            name: name.to_string(),
            value,
        })
        .ok_or(ReportError::EmptyGraph)
}

pub fn network_visualization(ctx: &ReportContext) -> Section {
    Section {
        heading: "Task 1: Network Visualization".into(),
        blocks: vec![ctx.figure(&FigureStyle::uniform(&ctx.network, SKYBLUE))],
    }
}

pub fn degree_analysis(ctx: &ReportContext) -> Result<(Section, Scores<usize>, Leader<usize>)> {
    let degrees = degrees(&ctx.network);
    let top = leader(&degrees)?;
    let section = Section {
        heading: "Task 2: Degree Analysis".into(),
        blocks: vec![
            Block::mapping("Degrees of each node:", &degrees),
            Block::text(format!(
                "Most connected person: **{}** with {} connections",
                top.name, top.value
            )),
        ],
    };
    Ok((section, degrees, top))
}

pub fn centrality_measures(ctx: &ReportContext) -> (Section, Scores<f64>, Scores<f64>) {
    let betweenness = betweenness_centrality(&ctx.network);
    let closeness = closeness_centrality(&ctx.network);
    let section = Section {
        heading: "Task 3: Centrality Measures".into(),
        blocks: vec![
            Block::mapping("Betweenness Centrality:", &betweenness),
            Block::mapping("Closeness Centrality:", &closeness),
        ],
    };
    (section, betweenness, closeness)
}

pub fn community_detection(ctx: &ReportContext) -> (Section, Partition, f64) {
    let partition = greedy_modularity_communities(&ctx.network);
    let score = modularity(&ctx.network, &partition);

    let mut blocks: Vec<Block> = partition
        .communities
        .iter()
        .enumerate()
        .map(|(i, members)| Block::text(format!("Community {}: {:?}", i + 1, members)))
        .collect();
    blocks.push(Block::text(format!("Modularity: {score:.4}")));
    blocks.push(ctx.figure(
        &FigureStyle::by_community(&ctx.network, &partition)
            .with_title("Friendship Network Colored by Community"),
    ));

    let section = Section {
        heading: "Task 4: Community Detection".into(),
        blocks,
    };
    (section, partition, score)
}

pub fn most_influential(ctx: &ReportContext) -> Result<(Section, Scores<f64>, Leader<f64>)> {
    let centrality = degree_centrality(&ctx.network);
    let top = leader(&centrality)?;
    let section = Section {
        heading: "Task 5: Most Influential Person".into(),
        blocks: vec![
            Block::text(format!(
                "Most influential person: **{}** (Centrality: {:.4})",
                top.name, top.value
            )),
            ctx.figure(&FigureStyle::highlight(&ctx.network, &top.name)),
        ],
    };
    Ok((section, centrality, top))
}

/// Runs all five tasks in order.
pub fn generate(ctx: &ReportContext) -> Result<Report> {
    let mut sections = Vec::with_capacity(5);

    sections.push(info_span!("visualization").in_scope(|| network_visualization(ctx)));

    let (section, degrees, most_connected) =
        info_span!("degrees").in_scope(|| degree_analysis(ctx))?;
    info!(name = %most_connected.name, degree = most_connected.value, "most connected");
    sections.push(section);

    let (section, betweenness, closeness) =
        info_span!("centrality").in_scope(|| centrality_measures(ctx));
    sections.push(section);

    let (section, communities, modularity) =
        info_span!("communities").in_scope(|| community_detection(ctx));
    info!(count = communities.len(), modularity, "communities detected");
    sections.push(section);

    let (section, degree_centrality, most_influential) =
        info_span!("influence").in_scope(|| most_influential(ctx))?;
    info!(name = %most_influential.name, centrality = most_influential.value, "most influential");
    sections.push(section);

    Ok(Report {
        title: TITLE.to_string(),
        metrics: Metrics {
            degrees,
            most_connected,
            betweenness,
            closeness,
            communities,
            modularity,
            degree_centrality,
            most_influential,
        },
        sections,
    })
}
