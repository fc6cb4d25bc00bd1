use clap::ValueEnum;
use std::path::PathBuf;

use crate::layout::DEFAULT_SEED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page with inline SVG figures.
    Html,
    /// Plain text on stdout.
    Text,
    /// Machine-readable report.json.
    Json,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub seed: u64,
    pub out_dir: PathBuf,
    pub formats: Vec<OutputFormat>,
    pub open: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            seed: DEFAULT_SEED,
            out_dir: PathBuf::from("report"),
            formats: vec![OutputFormat::Html],
            open: false,
        }
    }
}

impl ReportConfig {
    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}
