use petgraph::dot::{Config, Dot};
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;

use crate::community::Partition;
use crate::layout::Layout;
use crate::network::SocialNetwork;

pub const SKYBLUE: &str = "#87ceeb";
pub const HIGHLIGHT: &str = "#ff0000";
pub const EDGE_COLOR: &str = "#808080";

/// Community colors; indices past the end wrap around.
pub const PALETTE: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN: f64 = 60.0;

/// How a single figure draws its nodes.
#[derive(Debug, Clone)]
pub struct FigureStyle {
    pub title: Option<String>,
    pub node_colors: Vec<String>,
    pub node_radius: f64,
}

impl FigureStyle {
    pub fn uniform(net: &SocialNetwork, color: &str) -> Self {
        FigureStyle {
            title: None,
            node_colors: vec![color.to_string(); net.node_count()],
            node_radius: 22.0,
        }
    }

    pub fn by_community(net: &SocialNetwork, partition: &Partition) -> Self {
        let membership = partition.membership();
        let node_colors = net
            .names()
            .map(|name| {
                membership
                    .get(name)
                    .map_or(SKYBLUE, |&c| palette_color(c))
                    .to_string()
            })
            .collect();
        FigureStyle {
            title: None,
            node_colors,
            node_radius: 30.0,
        }
    }

    pub fn highlight(net: &SocialNetwork, target: &str) -> Self {
        let node_colors = net
            .names()
            .map(|name| if name == target { HIGHLIGHT } else { SKYBLUE }.to_string())
            .collect();
        FigureStyle {
            title: None,
            node_colors,
            node_radius: 22.0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

fn to_canvas(x: f64, y: f64) -> (f64, f64) {
    (
        MARGIN + (x + 1.0) / 2.0 * (WIDTH - 2.0 * MARGIN),
        MARGIN + (1.0 - y) / 2.0 * (HEIGHT - 2.0 * MARGIN),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The network drawn as a standalone SVG document.
pub struct SvgFigure<'a> {
    pub net: &'a SocialNetwork,
    pub layout: &'a Layout,
    pub style: &'a FigureStyle,
}

impl SvgFigure<'_> {
    fn point(&self, idx: usize) -> (f64, f64) {
        self.layout
            .position(idx)
            .map(|p| to_canvas(p.x, p.y))
            .unwrap_or((WIDTH / 2.0, HEIGHT / 2.0))
    }
}

impl fmt::Display for SvgFigure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = &self.net.graph;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        )?;
        writeln!(f, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        if let Some(title) = &self.style.title {
            writeln!(
                f,
                r#"<text x="{}" y="28" text-anchor="middle" font-family="sans-serif" font-size="18">{}</text>"#,
                WIDTH / 2.0,
                escape(title)
            )?;
        }

        for edge in graph.edge_indices() {
            if let Some((a, b)) = graph.edge_endpoints(edge) {
                let (x1, y1) = self.point(a.index());
                let (x2, y2) = self.point(b.index());
                writeln!(
                    f,
                    r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{EDGE_COLOR}" stroke-width="1.5"/>"#
                )?;
            }
        }

        for idx in graph.node_indices() {
            let (x, y) = self.point(idx.index());
            let color = self
                .style
                .node_colors
                .get(idx.index())
                .map_or(SKYBLUE, String::as_str);
            writeln!(
                f,
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="{:.1}" fill="{color}"/>"#,
                self.style.node_radius
            )?;
            writeln!(
                f,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="10" font-weight="bold">{}</text>"#,
                y + 3.5,
                escape(self.net.name(idx))
            )?;
        }

        writeln!(f, "</svg>")
    }
}

pub fn render_svg(net: &SocialNetwork, layout: &Layout, style: &FigureStyle) -> String {
    SvgFigure { net, layout, style }.to_string()
}

/// Graphviz source with each node filled by its community color.
pub fn community_dot(net: &SocialNetwork, partition: &Partition) -> String {
    let membership = partition.membership();
    let node_attrs = |_: &UnGraph<String, ()>, (_, name): (NodeIndex, &String)| {
        let color = membership
            .get(name.as_str())
            .map_or(SKYBLUE, |&c| palette_color(c));
        format!("label=\"{name}\", style=filled, fillcolor=\"{color}\"")
    };
    let dot = Dot::with_attr_getters(
        &net.graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, _| String::new(),
        &node_attrs,
    );
    format!("{dot:?}")
}
