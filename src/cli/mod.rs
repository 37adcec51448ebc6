mod audit;
mod compare;
mod view;

pub use audit::{audit, AuditOptions};
pub use compare::{compare, CompareOptions};
pub use view::view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::parser::{parse, Report};

#[derive(Parser)]
#[command(
    name = "lightkeeper",
    about = "Creates and pretty-prints Lighthouse reports for a CI context",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a Lighthouse report as a table
    View {
        /// Input file path
        #[arg(short, long)]
        input: String,

        /// Avoid praising yourself, hide audit rows showing full score
        #[arg(short, long)]
        omit_done: bool,
    },

    /// Compare two Lighthouse reports
    #[command(after_help = "Examples:
  lightkeeper compare \\
    --input lighthouse-a.json --inputlabel before \\
    --input lighthouse-b.json --inputlabel after

  lightkeeper compare \\
    --input lighthouse-a.json --inputlabel before \\
    --input lighthouse-b.json --inputlabel after \\
    --github-owner octo \\
    --github-repo site \\
    --github-issue 11 \\
    --github-token $(cat ~/.github-token)")]
    Compare {
        /// Input file path, to be used twice
        #[arg(short, long = "input")]
        input: Vec<String>,

        /// Input file label, to be used twice
        #[arg(short = 'l', long = "inputlabel")]
        input_label: Vec<String>,

        /// GitHub user or org owning the repo to post the result to as a comment
        #[arg(long)]
        github_owner: Option<String>,

        /// GitHub repo to post the result to as a comment
        #[arg(long)]
        github_repo: Option<String>,

        /// GitHub issue or PR number to post this to as a comment
        #[arg(long)]
        github_issue: Option<u64>,

        /// Personal GitHub auth token to submit the comparison as a comment
        #[arg(long)]
        github_token: Option<String>,
    },

    /// Create Lighthouse reports for one or more URLs
    #[command(after_help = "Examples:
  lightkeeper audit --url https://example.com/

  lightkeeper audit --form-factor mobile --url https://example.com/

  lightkeeper audit --name mysite --form-factor mobile --url https://example.com/

  lightkeeper audit --url https://container:5000/ --docker-link container:container

  lightkeeper audit \\
    --name first-name --url http://first-url \\
    --name second-name --url http://second-url")]
    Audit {
        /// URL to audit, can be used multiple times
        #[arg(short, long = "url")]
        url: Vec<String>,

        /// Output file name prefix, can be used multiple times
        #[arg(short, long = "name")]
        name: Vec<String>,

        /// Either 'desktop' or 'mobile'
        #[arg(short, long)]
        form_factor: Option<String>,

        /// Link the Lighthouse container to these named containers
        #[arg(long = "docker-link")]
        docker_link: Vec<String>,
    },
}

/// Read and parse one report file, tagging errors with the offending path.
fn read_report(path: &str) -> Result<Report> {
    let data = std::fs::read(Path::new(path))
        .with_context(|| format!("Error while reading file {:?}", path))?;
    parse(&data).with_context(|| format!("Error while parsing report {:?}", path))
}
