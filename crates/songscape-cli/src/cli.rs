//! Command line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "songscape", version, about = "Explore song embedding spaces")]
pub struct CliArgs {
    /// Config file (default: ~/songscape/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory from the config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lists the genres and emotions available for analysis.
    Info,

    /// Projects, clusters and labels the songs of one genre/emotion subset.
    Analyze {
        #[arg(long)]
        genre: String,

        /// Matched as a substring of each song's emotion labels
        #[arg(long)]
        emotion: String,

        /// Blind version name, looked up in the mappings
        #[arg(long, default_value = "A")]
        version: String,

        /// Version mapping such as A=GT or B=Model (repeatable)
        #[arg(long = "mapping", value_parser = parse_mapping)]
        mappings: Vec<(String, String)>,

        /// Use this many clusters instead of choosing automatically
        #[arg(long)]
        manual_k: Option<usize>,
    },

    /// Stores a session payload (JSON file, or - for stdin) in the results directory.
    Submit { payload: PathBuf },

    /// Writes the effective configuration to the config file.
    InitConfig,
}

/// Parse `VERSION=SOURCE`
pub fn parse_mapping(s: &str) -> Result<(String, String), String> {
    let (version, source) = s
        .split_once('=')
        .ok_or_else(|| format!("expected VERSION=SOURCE, got {:?}", s))?;
    let (version, source) = (version.trim(), source.trim());
    if version.is_empty() || source.is_empty() {
        return Err(format!("expected VERSION=SOURCE, got {:?}", s));
    }
    Ok((version.to_string(), source.to_string()))
}
