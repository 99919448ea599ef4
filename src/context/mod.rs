//! Application context handed to the host bootstrap.

use crate::config::{Config, Environment, GeneralSettings};
use crate::Error;

/// Holds the resolved general settings for the lifetime of the application.
///
/// ## Example
///
/// ```
/// use craft_config::{AppContext, Config, MapEnv};
///
/// let env = MapEnv::new()
///     .with_var("CRAFT_SITEURL", "example.com")
///     .with_var("CRAFT_TEST_EMAIL", "qa@example.com");
///
/// let ctx = AppContext::builder()
///     .with_settings(Config::builder().with_environment(env).build()?)
///     .build()?;
///
/// assert_eq!(ctx.site_url(), "http://example.com");
/// assert_eq!(ctx.mail_recipient("editor@example.com"), "qa@example.com");
/// # Ok::<(), craft_config::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: GeneralSettings,
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder { settings: None }
    }

    /// Resolves settings from `env` with no override layers.
    pub fn from_environment(env: impl Environment + 'static) -> Result<Self, Error> {
        Self::builder()
            .with_settings(Config::builder().with_environment(env).build()?)
            .build()
    }

    pub fn settings(&self) -> &GeneralSettings {
        &self.settings
    }

    pub fn site_url(&self) -> &str {
        &self.settings.site_url
    }

    pub fn is_dev_mode(&self) -> bool {
        self.settings.dev_mode
    }

    /// Address outgoing mail should actually go to.
    ///
    /// When a test address is configured every message is redirected to it.
    pub fn mail_recipient<'a>(&'a self, intended: &'a str) -> &'a str {
        self.settings
            .test_to_email_address
            .as_deref()
            .unwrap_or(intended)
    }
}

/// Builder for constructing an [`AppContext`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder {
    settings: Option<GeneralSettings>,
}

impl AppContextBuilder {
    /// Attaches the settings, typically the result of [`Config::build`].
    pub fn with_settings(mut self, settings: GeneralSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Builds the `AppContext`.
    ///
    /// Returns an error if no settings were provided.
    pub fn build(self) -> Result<AppContext, Error> {
        Ok(AppContext {
            settings: self.settings.ok_or(Error::MissingSettings)?,
        })
    }
}
