pub mod community;
pub mod config;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod network;
pub mod output;
pub mod render;
pub mod report;

pub use community::{Partition, greedy_modularity_communities, modularity};
pub use config::{OutputFormat, ReportConfig};
pub use error::{ReportError, Result};
pub use layout::{Layout, Point, spring_layout};
pub use metrics::{
    Scores, betweenness_centrality, closeness_centrality, degree_centrality, degrees,
};
pub use network::SocialNetwork;
pub use report::{Report, ReportContext, generate};
