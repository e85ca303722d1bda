//! Configuration loading and management for the projection engine.
//!
//! This module provides functionality to load engine settings and an
//! alternate disbursement curve from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use disbursement_projection::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded curve: {}", config.curve_name());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CurveConfig, CurvePeriodConfig, EngineSettings};
