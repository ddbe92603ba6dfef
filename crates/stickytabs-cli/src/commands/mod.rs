pub mod init_config;
pub mod probe;
pub mod rows;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use stickytabs_core::Catalog;

/// Catalog from `path`, or the built-in demo menu
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(Catalog::demo()),
    }
}
