//! Runtime configuration shared by the HTTP layer and the services.
//!
//! The server binary builds these from command-line flags / environment.

use std::net::SocketAddr;
use crate::Error;

/// Locale handling: the closed set of supported codes and the cookie carrying
/// the user's choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleConfig {
    supported: Vec<String>,
    default_locale: String,
    cookie_name: String,
}

impl LocaleConfig {
    /// Fails if the supported set is empty or holds a code that is not a
    /// cookie token, if the default is not a member of it, or if the cookie
    /// name is not a valid cookie token.
    pub fn new(
        supported: Vec<String>,
        default_locale: impl Into<String>,
        cookie_name: impl Into<String>,
    ) -> Result<Self, Error> {
        let supported: Vec<String> = supported
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let default_locale = default_locale.into();
        let cookie_name = cookie_name.into();

        if supported.is_empty() {
            return Err(Error::Config("supported locale set is empty".into()));
        }
        if !supported.iter().any(|l| *l == default_locale) {
            return Err(Error::Config(format!(
                "default locale '{}' is not in the supported set {:?}",
                default_locale, supported
            )));
        }
        if let Some(bad) = supported.iter().find(|l| !l.chars().all(is_cookie_token_char)) {
            return Err(Error::Config(format!("locale '{}' cannot be stored in a cookie", bad)));
        }
        if cookie_name.is_empty() || !cookie_name.chars().all(is_cookie_token_char) {
            return Err(Error::Config(format!("invalid cookie name '{}'", cookie_name)));
        }

        Ok(Self { supported, default_locale, cookie_name })
    }

    /// Parse a comma separated list such as `"fr,en"`.
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported.iter().any(|l| l == locale)
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["fr".to_string(), "en".to_string()],
            default_locale: "fr".to_string(),
            cookie_name: "NEXT_LOCALE".to_string(),
        }
    }
}

// RFC 6265 token characters.
fn is_cookie_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

/// Everything the server needs to come up.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub max_db_connections: u32,
    pub run_migrations: bool,
    pub runner_url: String,
    pub locale: LocaleConfig,
}
