//! The general settings consumed by the host application at bootstrap.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const OMIT_SCRIPT_NAME_IN_URLS: &str = "omitScriptNameInUrls";
pub const MAX_UPLOAD_FILE_SIZE: &str = "maxUploadFileSize";
pub const DEV_MODE: &str = "devMode";
pub const TEST_TO_EMAIL_ADDRESS: &str = "testToEmailAddress";
pub const USE_COMPRESSED_JS: &str = "useCompressedJs";
pub const SITE_URL: &str = "siteUrl";

/// Settings whose values never vary across environments.
pub const CONSTANT_KEYS: [&str; 3] = [
    OMIT_SCRIPT_NAME_IN_URLS,
    MAX_UPLOAD_FILE_SIZE,
    USE_COMPRESSED_JS,
];

/// Upload limit in bytes (100 MiB).
pub const DEFAULT_MAX_UPLOAD_FILE_SIZE: u64 = 104_857_600;

/// Resolved general settings.
///
/// Field names serialize in camelCase; renaming or retyping any of them breaks
/// consumers that read the settings by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneralSettings {
    pub omit_script_name_in_urls: bool,
    pub max_upload_file_size: u64,
    pub dev_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_to_email_address: Option<String>,
    pub use_compressed_js: bool,
    pub site_url: String,
}

impl GeneralSettings {
    /// Returns the settings as a name-to-value mapping with exactly six entries.
    pub fn to_map(&self) -> BTreeMap<&'static str, SettingValue> {
        BTreeMap::from([
            (
                OMIT_SCRIPT_NAME_IN_URLS,
                SettingValue::Bool(self.omit_script_name_in_urls),
            ),
            (
                MAX_UPLOAD_FILE_SIZE,
                SettingValue::Integer(self.max_upload_file_size),
            ),
            (DEV_MODE, SettingValue::Bool(self.dev_mode)),
            (
                TEST_TO_EMAIL_ADDRESS,
                self.test_to_email_address
                    .clone()
                    .map_or(SettingValue::Null, SettingValue::String),
            ),
            (USE_COMPRESSED_JS, SettingValue::Bool(self.use_compressed_js)),
            (SITE_URL, SettingValue::String(self.site_url.clone())),
        ])
    }

    pub(crate) fn validate(&self) -> Result<(), super::ConfigError> {
        if self.max_upload_file_size == 0 {
            return Err(super::ConfigError::InvalidValue {
                key: MAX_UPLOAD_FILE_SIZE,
                reason: "must be greater than zero".into(),
            });
        }
        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return Err(super::ConfigError::InvalidValue {
                key: SITE_URL,
                reason: format!("'{}' must use the http or https scheme", self.site_url),
            });
        }
        Ok(())
    }
}

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(u64),
    String(String),
    Null,
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Integer(i) => write!(f, "{i}"),
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneralSettings {
        GeneralSettings {
            omit_script_name_in_urls: true,
            max_upload_file_size: DEFAULT_MAX_UPLOAD_FILE_SIZE,
            dev_mode: false,
            test_to_email_address: None,
            use_compressed_js: false,
            site_url: "http://example.com".into(),
        }
    }

    #[test]
    fn test_to_map_has_six_keys() {
        let map = sample().to_map();
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                DEV_MODE,
                MAX_UPLOAD_FILE_SIZE,
                OMIT_SCRIPT_NAME_IN_URLS,
                SITE_URL,
                TEST_TO_EMAIL_ADDRESS,
                USE_COMPRESSED_JS,
            ]
        );
        assert!(map[TEST_TO_EMAIL_ADDRESS].is_null());
        assert_eq!(map[MAX_UPLOAD_FILE_SIZE].as_integer(), Some(104_857_600));
        assert_eq!(map[SITE_URL].as_str(), Some("http://example.com"));
    }

    #[test]
    fn test_to_map_test_email_set() {
        let mut settings = sample();
        settings.test_to_email_address = Some("qa@example.com".into());
        assert_eq!(
            settings.to_map()[TEST_TO_EMAIL_ADDRESS],
            SettingValue::String("qa@example.com".into())
        );
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let value = toml::Value::try_from(sample()).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table["omitScriptNameInUrls"].as_bool(), Some(true));
        assert_eq!(table["maxUploadFileSize"].as_integer(), Some(104_857_600));
        assert_eq!(table["siteUrl"].as_str(), Some("http://example.com"));
        assert!(!table.contains_key("testToEmailAddress"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result: Result<GeneralSettings, _> = toml::from_str(
            r#"
            omitScriptNameInUrls = true
            maxUploadFileSize = 1
            devMode = false
            useCompressedJs = false
            siteUrl = "http://x"
            cacheDuration = 60
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_upload_size() {
        let mut settings = sample();
        settings.max_upload_file_size = 0;
        assert!(settings.validate().is_err());
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_site_url_scheme() {
        for url in ["http://", "https://example.com", "http://example.com/blog/"] {
            let mut settings = sample();
            settings.site_url = url.into();
            assert!(settings.validate().is_ok(), "{url:?}");
        }
        for url in ["ftp://example.com", "example.com", "HTTP://example.com", ""] {
            let mut settings = sample();
            settings.site_url = url.into();
            assert!(
                matches!(
                    settings.validate(),
                    Err(crate::config::ConfigError::InvalidValue { key: SITE_URL, .. })
                ),
                "{url:?}"
            );
        }
    }

    #[test]
    fn test_setting_value_display() {
        assert_eq!(SettingValue::Bool(true).to_string(), "true");
        assert_eq!(SettingValue::Integer(42).to_string(), "42");
        assert_eq!(SettingValue::String("x".into()).to_string(), "x");
        assert_eq!(SettingValue::Null.to_string(), "null");
    }
}
