use csv::Writer;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::render::community_dot;
use crate::report::{Block, Report, ReportContext};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `**bold**` markers become `<strong>` tags; everything else is escaped.
fn inline_markup(text: &str) -> String {
    escape(text)
        .split("**")
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                format!("<strong>{part}</strong>")
            } else {
                part.to_string()
            }
        })
        .collect()
}

/// Standalone HTML page with the figures inlined.
pub struct HtmlPage<'a>(pub &'a Report);

impl fmt::Display for HtmlPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>{}</title>", escape(&report.title))?;
        writeln!(
            f,
            "<style>body{{font-family:sans-serif;max-width:860px;margin:2em auto}}\
             table{{border-collapse:collapse}}td,th{{border:1px solid #ccc;padding:2px 8px}}</style>"
        )?;
        writeln!(f, "</head>\n<body>\n<h1>{}</h1>", escape(&report.title))?;

        for section in &report.sections {
            writeln!(f, "<section>\n<h2>{}</h2>", escape(&section.heading))?;
            for block in &section.blocks {
                match block {
                    Block::Text { text } => writeln!(f, "<p>{}</p>", inline_markup(text))?,
                    Block::Mapping { label, rows } => {
                        writeln!(f, "<p>{}</p>\n<table>", escape(label))?;
                        for (name, value) in rows {
                            writeln!(
                                f,
                                "<tr><th>{}</th><td>{}</td></tr>",
                                escape(name),
                                escape(value)
                            )?;
                        }
                        writeln!(f, "</table>")?;
                    }
                    Block::Figure { svg } => writeln!(f, "<figure>\n{svg}</figure>")?,
                }
            }
            writeln!(f, "</section>")?;
        }

        writeln!(f, "</body>\n</html>")
    }
}

/// Terminal rendition; figures are left out.
pub struct TextReport<'a>(pub &'a Report);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{}\n{}", report.title, "=".repeat(report.title.len()))?;
        for section in &report.sections {
            writeln!(f, "\n{}\n{}", section.heading, "-".repeat(section.heading.len()))?;
            for block in &section.blocks {
                match block {
                    Block::Text { text } => writeln!(f, "{}", text.replace("**", ""))?,
                    Block::Mapping { label, rows } => {
                        writeln!(f, "{label}")?;
                        for (name, value) in rows {
                            writeln!(f, "  {name:<10} {value}")?;
                        }
                    }
                    Block::Figure { .. } => {}
                }
            }
        }
        Ok(())
    }
}

pub fn render_html(report: &Report) -> String {
    HtmlPage(report).to_string()
}

pub fn render_text(report: &Report) -> String {
    TextReport(report).to_string()
}

/// One row per node with every metric and its community number (1-based).
pub fn write_metrics_csv(report: &Report, path: &Path) -> Result<()> {
    let metrics = &report.metrics;
    let membership = metrics.communities.membership();
    let mut writer = Writer::from_path(path)?;
    writer.write_record([
        "name",
        "degree",
        "betweenness",
        "closeness",
        "degree_centrality",
        "community",
    ])?;
    for (name, degree) in metrics.degrees.iter() {
        let community = membership
            .get(name)
            .map(|c| (c + 1).to_string())
            .unwrap_or_default();
        writer.write_record([
            name.to_string(),
            degree.to_string(),
            metrics.betweenness.get(name).unwrap_or_default().to_string(),
            metrics.closeness.get(name).unwrap_or_default().to_string(),
            metrics
                .degree_centrality
                .get(name)
                .unwrap_or_default()
                .to_string(),
            community,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes every artifact the config asks for and returns the written paths.
pub fn write_report(ctx: &ReportContext, report: &Report) -> Result<Vec<PathBuf>> {
    let config = &ctx.config;
    fs::create_dir_all(&config.out_dir)?;
    let mut written = Vec::new();

    if config.wants(OutputFormat::Html) {
        let path = config.out_dir.join("report.html");
        fs::write(&path, render_html(report))?;
        written.push(path);
    }
    if config.wants(OutputFormat::Json) {
        let path = config.out_dir.join("report.json");
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        written.push(path);
    }
    if config.wants(OutputFormat::Text) {
        print!("{}", render_text(report));
    }

    let csv_path = config.out_dir.join("metrics.csv");
    write_metrics_csv(report, &csv_path)?;
    written.push(csv_path);

    let dot_path = config.out_dir.join("communities.dot");
    fs::write(&dot_path, community_dot(&ctx.network, &report.metrics.communities))?;
    written.push(dot_path);

    for path in &written {
        info!(path = %path.display(), "wrote");
    }
    Ok(written)
}

pub fn open_in_browser(path: &Path) -> Result<()> {
    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    let status = Command::new(opener).arg(path).status()?;
    if !status.success() {
        warn!(opener, %status, "could not open report");
    }
    Ok(())
}
