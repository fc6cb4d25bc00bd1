use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use friendship_report::output::{open_in_browser, write_report};
use friendship_report::{OutputFormat, ReportConfig, ReportContext, generate};

/// Degree, centrality and community report for a small friendship network.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory the report files are written to.
    #[arg(long, default_value = "report")]
    out_dir: PathBuf,

    /// Report formats to produce; repeatable.
    #[arg(long = "format", value_enum, default_values_t = [OutputFormat::Html])]
    formats: Vec<OutputFormat>,

    /// Open the HTML report once written.
    #[arg(long)]
    open: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ReportConfig {
        out_dir: cli.out_dir,
        formats: cli.formats,
        open: cli.open,
        ..ReportConfig::default()
    };

    let ctx = ReportContext::friendship(config).context("building friendship network")?;
    info!(
        nodes = ctx.network.node_count(),
        edges = ctx.network.edge_count(),
        "network loaded"
    );

    let report = generate(&ctx).context("generating report")?;
    let written = write_report(&ctx, &report)
        .with_context(|| format!("writing report to {}", ctx.config.out_dir.display()))?;

    if ctx.config.open {
        if let Some(html) = written.iter().find(|p| p.extension().is_some_and(|e| e == "html")) {
            open_in_browser(html).context("opening report")?;
        }
    }

    Ok(())
}
