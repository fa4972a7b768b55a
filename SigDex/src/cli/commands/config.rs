//! CLI commands for the settings file

use std::path::Path;

use anyhow::Context;

use crate::Settings;
use crate::cli::GlobalArgs;
use crate::cli::progress::DISK;

pub fn init(global: &GlobalArgs, path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = match path.or(global.config.as_deref()) {
        Some(path) => path.to_path_buf(),
        None => Settings::default_path().context("No config directory on this platform")?,
    };

    anyhow::ensure!(
        force || !path.exists(),
        "{} already exists (use --force to overwrite)",
        path.display()
    );

    Settings::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{DISK}Wrote default settings to {}", path.display());

    Ok(())
}

pub fn show(global: &GlobalArgs) -> anyhow::Result<()> {
    let settings = global.settings()?;
    print!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}
