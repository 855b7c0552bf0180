use super::state::SessionState;
use std::fmt;

/// Process-wide media server defaults, resolved once at startup
#[derive(Debug, Clone, Default)]
pub struct ServerDefaults {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// Base URL and bearer token for one media server
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub token: String,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Session overrides first, then defaults, key by key
    ///
    /// Returns `None` ("not configured") unless both a base URL and a token
    /// are available. Empty strings count as absent.
    pub fn resolve(session: &SessionState, defaults: &ServerDefaults) -> Option<Self> {
        let base_url = pick(session.base_url.as_deref(), defaults.base_url.as_deref())?;
        let token = pick(session.token.as_deref(), defaults.token.as_deref())?;
        Some(Self::new(base_url, token))
    }
}

fn pick<'a>(over: Option<&'a str>, default: Option<&'a str>) -> Option<&'a str> {
    over.filter(|v| !v.is_empty())
        .or(default.filter(|v| !v.is_empty()))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
