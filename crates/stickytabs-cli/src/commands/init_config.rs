use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use stickytabs_core::AppConfig;
use tracing::info;

/// Write the defaults to `path`, or to the default location when `None`
pub fn run(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let target = path.map(Path::to_path_buf).unwrap_or_else(AppConfig::config_path);
    if target.exists() && !force {
        bail!(
            "{} already exists.\nUse --force to overwrite it with the defaults.",
            target.display()
        );
    }

    let config = AppConfig::default();
    let written = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };
    info!("Wrote default configuration to {}", written.display());
    println!("Configuration written to {}", written.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stickytabs-{}-{}", name, std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_writes_defaults() {
        let dir = scratch("init");
        let path = dir.join("config.toml");

        let written = run(Some(&path), false).unwrap();
        assert_eq!(written, path);
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.engine, AppConfig::default().engine);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let dir = scratch("init-existing");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "# hand edited\n").unwrap();

        let err = run(Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hand edited\n");

        run(Some(&path), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[engine]"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
