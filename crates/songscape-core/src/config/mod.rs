//! Configuration for songscape
//!
//! Configuration is stored as YAML. Default location: ~/songscape/config.yaml
//!
//! - Generic YAML config loading/saving
//! - Data file locations
//! - Analysis thresholds and clustering parameters
//! - Session results directory
//!
//! # Usage
//!
//! ```ignore
//! use songscape_core::config::{load_config, default_config_path, SongscapeConfig};
//!
//! let mut config: SongscapeConfig = load_config(&default_config_path());
//! config.analysis.validate();
//! ```

mod io;
mod paths;
mod settings;

pub use io::{load_config, save_config};
pub use paths::{default_config_path, default_data_dir, default_home};
pub use settings::{AnalysisConfig, DataConfig, SessionConfig, SongscapeConfig};
