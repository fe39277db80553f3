//! User configuration at ~/.config/evcopy/config.toml

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::copy::TitlePolicy;
use crate::credentials::EmptyFieldPolicy;
use crate::error::{EvCopyError, EvCopyResult};

static APP_DIR: &str = "evcopy";

fn default_template_tags() -> Vec<String> {
    vec!["template".to_string()]
}

/// Behaviour that differed between releases of the web app is pinned here
/// instead of being hardcoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvCopyConfig {
    /// Tag names/slugs that mark an event as a template.
    #[serde(default = "default_template_tags")]
    pub template_tags: Vec<String>,

    #[serde(default)]
    pub title_policy: TitlePolicy,

    #[serde(default)]
    pub empty_field_policy: EmptyFieldPolicy,
}

impl Default for EvCopyConfig {
    fn default() -> Self {
        EvCopyConfig {
            template_tags: default_template_tags(),
            title_policy: TitlePolicy::default(),
            empty_field_policy: EmptyFieldPolicy::default(),
        }
    }
}

/// Directory holding config.toml and credentials.toml
pub fn config_dir() -> EvCopyResult<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| EvCopyError::Config("Could not determine config directory".into()))?
        .join(APP_DIR);

    Ok(dir)
}

impl EvCopyConfig {
    pub fn config_path() -> EvCopyResult<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load the user config, writing a commented-out default on first run.
    pub fn load() -> EvCopyResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> EvCopyResult<Self> {
        let config: EvCopyConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| EvCopyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EvCopyError::Config(e.to_string()))?;

        if config.template_tags.is_empty() {
            return Err(EvCopyError::Config(
                "template_tags must name at least one tag".into(),
            ));
        }

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EvCopyResult<()> {
        let contents = "\
# evcopy configuration

# Tags (name or slug) that mark an event as a template:
# template_tags = [\"template\"]

# Title of copied events: \"unchanged\" or \"append_copy\" (adds \" (Copy)\"):
# title_policy = \"unchanged\"

# Clearing a credential field: \"clear\" removes the saved entry, \"keep\" leaves it:
# empty_field_policy = \"clear\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EvCopyError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EvCopyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
