//! Configuration loading from files and the environment.
//!
//! Sources are layered: built-in defaults, then the YAML config file (when
//! it exists), then `TAGPRESS_*` environment variables. Relative paths are
//! resolved against the config file's directory.

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};
use scraper::Selector;

use super::{ConfigError, TagpressConfig};

const DEFAULT_CONFIG_FILE: &str = "tagpress.yaml";
const ENV_PREFIX: &str = "TAGPRESS";

impl TagpressConfig {
    /// Load the config from the command line argument, defaulting to `tagpress.yaml`
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path.
    ///
    /// A missing file is not an error: defaults and environment overrides
    /// still apply, with paths resolved against the file's directory.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if path.is_file() {
            tracing::debug!(path = %path.display(), "reading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("tags.exclude"),
            )
            .build()?;

        let config: TagpressConfig = settings.try_deserialize()?;
        let config = config.resolve_paths(&base_path_from_config(path));
        config.validate()?;

        Ok(config)
    }

    /// Make every relative path absolute against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.index = resolve(base, &self.index);
        self.output = self.output.map(|output| resolve(base, &output));
        self.script.source = resolve(base, &self.script.source);
        self
    }

    /// Check the values the pipeline cannot recover from at run time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'index' must name the index document".to_string(),
            ));
        }
        if self.script.source.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'script.source' must name the replacement script".to_string(),
            ));
        }

        let attributes = [
            ("sidebar.marker", Some(self.sidebar.marker.as_str())),
            ("tags.join_attribute", Some(self.tags.join_attribute.as_str())),
            ("script.marker", self.script.marker.as_deref()),
        ];
        for (key, name) in attributes {
            if let Some(name) = name
                && !is_attribute_name(name)
            {
                return Err(ConfigError::Validation(format!(
                    "invalid config: '{key}' must be an attribute name, got '{name}'"
                )));
            }
        }

        for (key, selector) in self.selectors.entries() {
            if Selector::parse(selector).is_err() {
                return Err(ConfigError::InvalidSelector {
                    key,
                    selector: selector.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Directory that relative paths in a config file are resolved against.
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Whether `name` can be used verbatim as an HTML attribute and in an
/// attribute selector.
fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
