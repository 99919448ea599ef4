pub mod config;
pub mod context;
mod error;

pub use config::{
    resolve, Config, ConfigError, Environment, GeneralSettings, MapEnv, ProcessEnv, Scheme,
    SettingValue,
};
pub use context::AppContext;
pub use error::Error;
