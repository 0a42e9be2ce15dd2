use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use aibom::analysis::RiskCategory;
use aibom::application::dto::OutputFormat;

/// Catalog, fingerprint, and compare machine-learning model artifacts
#[derive(Parser, Debug)]
#[command(name = "aibom")]
#[command(version)]
#[command(about = "SBOM generation and risk analytics for ML model artifacts", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ./aibom.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build or fetch a model's SBOM and render it
    #[command(group(
        ArgGroup::new("source")
            .required(true)
            .multiple(true)
            .args(["purl", "path"])
    ))]
    Scan {
        /// Package URL the SBOM is cataloged under
        #[arg(short = 'u', long)]
        purl: Option<String>,

        /// Scan a local directory instead of the hub
        #[arg(short, long, value_name = "DIR")]
        path: Option<PathBuf>,

        /// Discard any cataloged SBOM and fingerprint from scratch
        #[arg(long)]
        rebuild: bool,

        /// Output format: json or markdown
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Resolve a free-form query to a cataloged identifier
    Resolve {
        /// Package URL, hub URL, org/name repository, or content hash
        query: String,
    },

    /// List cataloged models sharing file content with a model
    Similar {
        /// Query for the target model, resolved like `resolve`
        query: String,

        /// 1-based results page
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Results per page
        #[arg(long, default_value_t = 10)]
        items: usize,
    },

    /// Percentile rank of a model within the cataloged population
    Rank {
        /// Query for the model, resolved like `resolve`
        query: String,

        /// Risk category: security, ethics, performance, or overall
        #[arg(long, default_value = "overall")]
        category: RiskCategory,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
