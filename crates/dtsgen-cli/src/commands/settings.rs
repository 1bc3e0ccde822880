//! JSON settings file shared by the commands.
//!
//! ```json
//! {
//!   "output": "types/qooxdoo.d.ts",
//!   "aliases": { "Color": "string" },
//!   "suppress": { "my.app.Widget": ["set"] },
//!   "baseTemplate": "templates/base.d.ts"
//! }
//! ```
//!
//! Paths are relative to the settings file. Aliases extend or override the
//! built-in table; suppressed members extend it.

use std::fs;
use std::path::{Path, PathBuf};

use dtsgen_lib::Config;
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub aliases: IndexMap<String, String>,
    #[serde(default)]
    pub suppress: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub base_template: Option<PathBuf>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or(Path::new(""));
        settings.output = settings.output.map(|p| base.join(p));
        settings.base_template = settings.base_template.map(|p| base.join(p));

        tracing::debug!(path = %path.display(), aliases = settings.aliases.len(), "loaded settings");
        Ok(settings)
    }

    /// Layer these settings over `config`.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(output) = self.output {
            config = config.output(output);
        }
        for (from, to) in self.aliases {
            config = config.alias(from, to);
        }
        for (class, members) in self.suppress {
            for member in members {
                config = config.suppress(class.as_str(), member);
            }
        }
        if let Some(template) = self.base_template {
            config = config.base_template(template);
        }
        config
    }
}

/// Default config, with the settings file layered on when given.
pub fn load_config(settings: Option<&Path>) -> Result<Config, SettingsError> {
    let config = Config::new();
    match settings {
        Some(path) => Ok(Settings::load(path)?.apply(config)),
        None => Ok(config),
    }
}
