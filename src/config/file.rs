//! File-based override layers.

use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::debug;

use super::env::Environment;
use super::source::{ConfigLayer, ConfigSource};
use super::ConfigError;

/// Key of the table that applies to every environment.
pub const WILDCARD: &str = "*";

/// An override layer loaded from a TOML file.
///
/// A file with a `"*"` table is per-environment: `"*"` applies first, then every
/// table whose key is contained in the server name, shortest key first so the
/// most specific host wins. Any other file is a flat overlay.
///
/// ```toml
/// ["*"]
/// omitScriptNameInUrls = true
///
/// ["example.test"]
/// devMode = true
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for FileSource {
    fn layers(&self, env: &dyn Environment) -> Result<Vec<ConfigLayer>, ConfigError> {
        match load_config_file(&self.path, self.required)? {
            Some(table) => select_layers(&self.path, table, env.server_name().as_deref()),
            None => {
                debug!(path = %self.path.display(), "optional config file not found, skipping");
                Ok(vec![])
            }
        }
    }
}

fn select_layers(
    path: &Path,
    table: Table,
    server_name: Option<&str>,
) -> Result<Vec<ConfigLayer>, ConfigError> {
    if !table.contains_key(WILDCARD) {
        return Ok(vec![ConfigLayer::new(path.display().to_string(), table)]);
    }

    let mut wildcard = Table::new();
    let mut matched = Vec::new();

    for (key, value) in table {
        let Value::Table(env_table) = value else {
            return Err(ConfigError::InvalidEnvironmentTable {
                path: path.to_path_buf(),
                key,
            });
        };

        if key == WILDCARD {
            wildcard = env_table;
        } else if server_name.is_some_and(|name| name.contains(key.as_str())) {
            matched.push((key, env_table));
        }
    }

    // Stable sort keeps key order for equal lengths.
    matched.sort_by_key(|(key, _)| key.len());

    let origin = |key: &str| format!("{}[{key}]", path.display());
    let mut layers = vec![ConfigLayer::new(origin(WILDCARD), wildcard)];
    layers.extend(
        matched
            .into_iter()
            .map(|(key, table)| ConfigLayer::new(origin(&key), table)),
    );
    Ok(layers)
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
