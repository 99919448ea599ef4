use std::fmt;

use super::env::Environment;

/// URL scheme derived from the transport-encryption flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    /// `Https` only when the flag is exactly `"on"`.
    pub fn from_https_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("on") => Scheme::Https,
            _ => Scheme::Http,
        }
    }

    pub fn detect<E: Environment + ?Sized>(env: &E) -> Self {
        Self::from_https_flag(env.https_flag().as_deref())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
