//! Settings for sigdex.toml
//!
//! Every section is optional. A missing file means all defaults, which
//! expect the six site dumps and the repo header in the working directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sigcore::compact::{BracketPair, NameCompactor};
use sigcore::formats::{repo, site};
use sigcore::pipeline::PipelineOptions;
use sigcore::sources::DirectoryFetcher;

use crate::error::{Error, Result};

/// File name of the settings file.
pub const SETTINGS_FILE: &str = "sigdex.toml";

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_site_resources() -> Vec<String> {
    site::DEFAULT_RESOURCES.iter().map(ToString::to_string).collect()
}

fn default_repo_resource() -> String {
    repo::DEFAULT_RESOURCE.to_string()
}

fn default_placeholder() -> String {
    "[...]".to_string()
}

fn default_target_depth() -> usize {
    1
}

fn default_min_inner_length() -> usize {
    10
}

fn default_invalid_marker() -> String {
    "INVALID".to_string()
}

fn default_strip_prefix() -> String {
    "virtual ".to_string()
}

fn default_page_size() -> usize {
    10
}

/// The full settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sources: SourceSettings,
    #[serde(default)]
    pub compaction: CompactionSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Where the dumps live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_dir")]
    pub site_dir: PathBuf,
    #[serde(default = "default_dir")]
    pub repo_dir: PathBuf,
    /// Site dumps to load. An empty list loads every `*_funcs.c` in `site_dir`.
    #[serde(default = "default_site_resources")]
    pub site_resources: Vec<String>,
    #[serde(default = "default_repo_resource")]
    pub repo_resource: String,
    /// Directory holding hazedumper's `config.json` and `csgo.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazedumper_dir: Option<PathBuf>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            site_dir: default_dir(),
            repo_dir: default_dir(),
            site_resources: default_site_resources(),
            repo_resource: default_repo_resource(),
            hazedumper_dir: None,
        }
    }
}

/// Display name compaction. An empty `strip_prefix` disables stripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionSettings {
    #[serde(default)]
    pub pair: BracketPair,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_target_depth")]
    pub target_depth: usize,
    #[serde(default = "default_min_inner_length")]
    pub min_inner_length: usize,
    #[serde(default = "default_invalid_marker")]
    pub invalid_marker: String,
    #[serde(default = "default_strip_prefix")]
    pub strip_prefix: String,
}

impl Default for CompactionSettings {
    fn default() -> Self {
        Self {
            pair: BracketPair::default(),
            placeholder: default_placeholder(),
            target_depth: default_target_depth(),
            min_inner_length: default_min_inner_length(),
            invalid_marker: default_invalid_marker(),
            strip_prefix: default_strip_prefix(),
        }
    }
}

/// Listing output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    /// Default settings location: `<config dir>/sigdex/sigdex.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sigdex").join(SETTINGS_FILE))
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)?;
        settings.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save settings as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.display.page_size == 0 {
            return Err(Error::Config("display.page_size must be at least 1".to_string()));
        }
        if self.sources.repo_resource.is_empty() {
            return Err(Error::Config("sources.repo_resource must not be empty".to_string()));
        }
        Ok(())
    }

    /// Build the name compactor described by `[compaction]`
    #[must_use]
    pub fn compactor(&self) -> NameCompactor {
        let compaction = &self.compaction;
        NameCompactor {
            pair: compaction.pair,
            target_depth: compaction.target_depth,
            placeholder: compaction.placeholder.clone(),
            min_inner_length: compaction.min_inner_length,
            invalid_marker: compaction.invalid_marker.clone(),
            strip_prefix: (!compaction.strip_prefix.is_empty())
                .then(|| compaction.strip_prefix.clone()),
        }
    }

    /// Build pipeline options, discovering site dumps when none are listed
    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        let site_resources = if self.sources.site_resources.is_empty() {
            DirectoryFetcher::new(&self.sources.site_dir).discover_site_resources()?
        } else {
            self.sources.site_resources.clone()
        };

        Ok(PipelineOptions {
            site_resources,
            repo_resource: self.sources.repo_resource.clone(),
            compactor: self.compactor(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sources.site_resources.len(), 6);
        assert_eq!(settings.display.page_size, 10);
    }

    #[test]
    fn test_partial_sections() {
        let settings: Settings = toml::from_str(
            r#"
            [sources]
            site_dir = "rawsigdata"
            hazedumper_dir = "hazedumper"

            [compaction]
            pair = "round"
            min_inner_length = 4
            strip_prefix = ""
            "#,
        )
        .unwrap();

        assert_eq!(settings.sources.site_dir, PathBuf::from("rawsigdata"));
        assert_eq!(settings.sources.repo_dir, PathBuf::from("."));
        assert_eq!(settings.sources.hazedumper_dir, Some(PathBuf::from("hazedumper")));
        assert_eq!(settings.compaction.placeholder, "[...]");

        let compactor = settings.compactor();
        assert_eq!(compactor.pair, BracketPair::Round);
        assert_eq!(compactor.min_inner_length, 4);
        assert_eq!(compactor.strip_prefix, None);
    }

    #[test]
    fn test_default_compactor_matches_engine_default() {
        assert_eq!(Settings::default().compactor(), NameCompactor::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = Settings::default();
        settings.sources.site_dir = PathBuf::from("dumps");
        settings.display.page_size = 25;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[display]\npage_size = 0\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[display\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::TomlDe(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Settings::load_or_default(Some(&missing)),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_pipeline_options_discovers_site_dumps() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("engine_funcs.c"), "").unwrap();
        fs::write(dir.path().join("client_funcs.c"), "").unwrap();

        let mut settings = Settings::default();
        settings.sources.site_dir = dir.path().to_path_buf();
        settings.sources.site_resources.clear();

        let options = settings.pipeline_options().unwrap();
        assert_eq!(
            options.site_resources,
            vec!["client_funcs.c".to_string(), "engine_funcs.c".to_string()]
        );
        assert_eq!(options.repo_resource, "function_signatures.h");
    }
}
