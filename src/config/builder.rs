use std::path::Path;

use tracing::{debug, info};

use super::env::{Environment, ProcessEnv};
use super::file::FileSource;
use super::resolve::resolve;
use super::settings::GeneralSettings;
use super::source::{apply_layer, ConfigSource};
use super::ConfigError;

/// Builder for the general settings.
///
/// The settings are first resolved from the environment, then override layers
/// are applied in registration order, with later layers replacing the keys
/// they set.
///
/// ## Example
///
/// ```no_run
/// use craft_config::Config;
///
/// let settings = Config::builder()
///     .with_file("config/general.toml", false)
///     .build()?;
///
/// println!("serving {}", settings.site_url);
/// # Ok::<(), craft_config::ConfigError>(())
/// ```
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    env: Box<dyn Environment>,
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: Box::new(ProcessEnv),
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new configuration builder reading the process environment.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Replaces the environment the settings are resolved from.
    pub fn with_environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Adds a TOML override file.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds a custom override source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Resolves the settings, applies every override layer and validates the result.
    ///
    /// Layers may not override `omitScriptNameInUrls`, `maxUploadFileSize` or
    /// `useCompressedJs`, and `siteUrl` must keep an http or https scheme.
    pub fn build(self) -> Result<GeneralSettings, ConfigError> {
        let resolved = resolve(self.env.as_ref());

        let mut merged: toml::Table = toml::Value::try_from(&resolved)?.try_into()?;

        for source in &self.sources {
            for layer in source.layers(self.env.as_ref())? {
                debug!(origin = %layer.origin, keys = layer.table.len(), "applying config layer");
                apply_layer(&mut merged, layer)?;
            }
        }

        let settings: GeneralSettings = toml::Value::Table(merged).try_into()?;
        settings.validate()?;

        info!(
            site_url = %settings.site_url,
            dev_mode = settings.dev_mode,
            "general settings resolved"
        );
        Ok(settings)
    }
}
