//! Resolution and layering of the general settings.

mod builder;
pub mod env;
mod error;
pub mod file;
mod resolve;
mod scheme;
pub mod settings;
pub mod source;

pub use builder::Config;
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::ConfigError;
pub use resolve::{resolve, ENV_DEV_MODE, ENV_SITE_URL, ENV_TEST_EMAIL};
pub use scheme::Scheme;
pub use settings::{GeneralSettings, SettingValue};
