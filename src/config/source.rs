use toml::Table;

use super::env::Environment;
use super::settings::CONSTANT_KEYS;
use super::ConfigError;

/// A table of setting overrides, tagged with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub origin: String,
    pub table: Table,
}

impl ConfigLayer {
    pub fn new(origin: impl Into<String>, table: Table) -> Self {
        Self {
            origin: origin.into(),
            table,
        }
    }
}

/// A source of override layers applied on top of the resolved settings.
///
/// The environment is passed in so a source can pick layers for the current host.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn layers(&self, env: &dyn Environment) -> Result<Vec<ConfigLayer>, ConfigError>;
}

/// Applies `layer` over `base`, key by key.
///
/// A layer may not touch the constant settings; the first one found is reported.
pub fn apply_layer(base: &mut Table, layer: ConfigLayer) -> Result<(), ConfigError> {
    if let Some(key) = CONSTANT_KEYS
        .iter()
        .copied()
        .find(|key| layer.table.contains_key(*key))
    {
        return Err(ConfigError::ConstantOverride {
            key,
            origin: layer.origin,
        });
    }

    for (key, value) in layer.table {
        base.insert(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_layer_replaces_scalars() {
        let mut base = make_table("devMode = false\nsiteUrl = \"http://a\"");
        apply_layer(&mut base, ConfigLayer::new("local", make_table("devMode = true"))).unwrap();
        assert_eq!(base["devMode"].as_bool(), Some(true));
        assert_eq!(base["siteUrl"].as_str(), Some("http://a"));
    }

    #[test]
    fn test_layer_rejects_constant_keys() {
        for key in CONSTANT_KEYS {
            let mut base = make_table("devMode = false");
            let layer = ConfigLayer::new("local", make_table(&format!("{key} = 1")));
            let result = apply_layer(&mut base, layer);

            assert!(
                matches!(
                    result,
                    Err(ConfigError::ConstantOverride { key: k, ref origin })
                        if k == key && origin == "local"
                ),
                "{key} should be rejected"
            );
            assert_eq!(base.len(), 1);
        }
    }
}
