//! Environment access behind an injectable trait.

use std::collections::HashMap;

use super::scheme::Scheme;

/// Variable carrying the transport-encryption flag, as set by CGI-style web servers.
pub const HTTPS_FLAG: &str = "HTTPS";

/// Variable carrying the host name the request was served for.
pub const SERVER_NAME: &str = "SERVER_NAME";

/// Read access to environment variables and the ambient request signals.
///
/// Only [`var`](Self::var) is required; the typed lookups are built on top of it
/// so every implementation shares the same coercion rules.
pub trait Environment: Send + Sync + std::fmt::Debug {
    /// Returns the raw value of a variable, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the transport-encryption flag.
    fn https_flag(&self) -> Option<String> {
        self.var(HTTPS_FLAG)
    }

    /// Returns the host name used to pick per-environment overrides.
    fn server_name(&self) -> Option<String> {
        self.var(SERVER_NAME)
    }

    /// Returns `true` only when the transport flag is exactly `"on"`.
    fn is_https(&self) -> bool {
        Scheme::from_https_flag(self.https_flag().as_deref()) == Scheme::Https
    }

    /// Returns the variable verbatim, or `default` when it is unset.
    fn get_string(&self, name: &str, default: &str) -> String {
        self.var(name).unwrap_or_else(|| default.to_string())
    }

    /// Returns the variable verbatim, or `None` when it is unset.
    fn get_opt_string(&self, name: &str) -> Option<String> {
        self.var(name)
    }

    /// Returns the variable coerced to a boolean.
    ///
    /// After trimming and ignoring ASCII case, `true`, `(true)`, `1`, `on` and
    /// `yes` are truthy, while `false`, `(false)`, `0`, `off`, `no` and the
    /// empty string are falsy. Unset or unrecognized values yield `default`.
    fn get_bool(&self, name: &str, default: bool) -> bool {
        self.var(name)
            .and_then(|value| coerce_bool(&value))
            .unwrap_or(default)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn https_flag(&self) -> Option<String> {
        (**self).https_flag()
    }

    fn server_name(&self) -> Option<String> {
        (**self).server_name()
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn https_flag(&self) -> Option<String> {
        (**self).https_flag()
    }

    fn server_name(&self) -> Option<String> {
        (**self).server_name()
    }
}

const TRUTHY: [&str; 5] = ["true", "(true)", "1", "on", "yes"];
const FALSY: [&str; 6] = ["false", "(false)", "0", "off", "no", ""];

fn coerce_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSY.iter().any(|f| s.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

/// The real process environment.
///
/// Values that are not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// An in-memory environment.
///
/// The transport flag and server name are held apart from the variables so they
/// can be set independently of whatever the variables contain.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
    https: Option<String>,
    server_name: Option<String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_https(mut self, flag: impl Into<String>) -> Self {
        self.https = Some(flag.into());
        self
    }

    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = Some(name.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn https_flag(&self) -> Option<String> {
        self.https.clone()
    }

    fn server_name(&self) -> Option<String> {
        self.server_name.clone()
    }
}

/// Collects name/value pairs, such as `std::env::vars()`.
///
/// `HTTPS` and `SERVER_NAME` go to the transport flag and server name, so a
/// collected snapshot sees the same signals as [`ProcessEnv`].
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |env, (k, v)| {
            let name = k.into();
            match name.as_str() {
                HTTPS_FLAG => env.with_https(v),
                SERVER_NAME => env.with_server_name(v),
                _ => env.with_var(name, v),
            }
        })
    }
}
