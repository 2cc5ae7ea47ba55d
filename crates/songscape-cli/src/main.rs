//! songscape - command line front end for embedding-space analysis
//!
//! Loads the configured song collections and feature table once, then runs
//! a single command and prints its JSON result to stdout.
//!
//! Set RUST_LOG=debug for per-k silhouette scores and skipped features.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use cli::{CliArgs, Command};
use songscape_core::config::{default_config_path, load_config, save_config, SongscapeConfig};
use songscape_core::context::DataStore;
use songscape_core::pipeline::catalog_summary;
use songscape_core::session::SessionStore;
use songscape_core::{run_analysis, AnalysisContext, AnalysisRequest};

static CONTEXT: AnalysisContext = AnalysisContext::new();

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = CliArgs::parse();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config: SongscapeConfig = load_config(&config_path);
    config.analysis.validate();
    if let Some(data_dir) = args.data_dir {
        config.data.data_dir = data_dir;
    }

    match args.command {
        Command::Info => {
            initialize(&config)?;
            print_json(&catalog_summary(&CONTEXT)?)
        }
        Command::Analyze { genre, emotion, version, mappings, manual_k } => {
            initialize(&config)?;
            let mut request = AnalysisRequest::new(genre, emotion);
            request.version = version;
            request.version_mapping = mappings.into_iter().collect();
            if let Some(k) = manual_k {
                request.auto_k = false;
                request.manual_k = k;
            }
            print_json(&run_analysis(&CONTEXT, &request, &config.analysis)?)
        }
        Command::Submit { payload } => {
            let payload = read_payload(&payload)?;
            let filename = SessionStore::new(&config.session.results_dir).save(&payload)?;
            print_json(&serde_json::json!({ "success": true, "filename": filename }))
        }
        Command::InitConfig => {
            save_config(&config, &config_path)?;
            log::info!("Wrote configuration to {:?}", config_path);
            Ok(())
        }
    }
}

fn initialize(config: &SongscapeConfig) -> Result<()> {
    CONTEXT
        .initialize(|| DataStore::load(&config.data))
        .context("Failed to load data")?;
    Ok(())
}

fn read_payload(path: &Path) -> Result<serde_json::Value> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload: {:?}", path))?
    };

    let payload: serde_json::Value =
        serde_json::from_str(&contents).context("Payload is not valid JSON")?;
    if !payload.is_object() {
        bail!("Session payload must be a JSON object");
    }
    Ok(payload)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
