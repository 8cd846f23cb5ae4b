//! Locale store. The chosen locale lives only in a client-side cookie; the
//! server keeps nothing.

use serde_json::Value;
use callboard_common::models::locale::{LocaleSelection, LOCALE_COOKIE_MAX_AGE_SECS};
use crate::config::LocaleConfig;

pub struct LocaleService {
    config: LocaleConfig,
}

impl LocaleService {
    pub fn new(config: LocaleConfig) -> Self {
        Self { config }
    }

    /// `None` when `locale` is absent, not a string, or unsupported.
    pub fn select(&self, payload: &Value) -> Option<LocaleSelection> {
        payload
            .get("locale")
            .and_then(Value::as_str)
            .filter(|l| self.config.is_supported(l))
            .map(|l| LocaleSelection { locale: l.to_string() })
    }

    /// `Set-Cookie` value: one year, whole site, readable from scripts
    /// (no `HttpOnly`), `SameSite=Lax`.
    pub fn cookie_header(&self, selection: &LocaleSelection) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.config.cookie_name(),
            selection.locale,
            LOCALE_COOKIE_MAX_AGE_SECS
        )
    }

    /// Locale carried by a `Cookie` request header, falling back to the
    /// configured default when missing or unsupported.
    pub fn resolve(&self, cookie_header: Option<&str>) -> String {
        cookie_header
            .and_then(|h| find_cookie(h, self.config.cookie_name()))
            .filter(|l| self.config.is_supported(l))
            .unwrap_or(self.config.default_locale())
            .to_string()
    }
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> LocaleService {
        LocaleService::new(LocaleConfig::default())
    }

    #[test]
    fn test_select_supported_only() {
        let svc = service();
        assert_eq!(svc.select(&json!({"locale": "fr"})).unwrap().locale, "fr");
        assert!(svc.select(&json!({"locale": "xx"})).is_none());
        assert!(svc.select(&json!({"locale": null})).is_none());
        assert!(svc.select(&json!({"locale": 1})).is_none());
        assert!(svc.select(&json!({})).is_none());
    }

    #[test]
    fn test_cookie_header_attributes() {
        let svc = service();
        let header = svc.cookie_header(&LocaleSelection { locale: "en".into() });
        assert_eq!(header, "NEXT_LOCALE=en; Path=/; Max-Age=31536000; SameSite=Lax");
        assert!(!header.contains("HttpOnly"));
    }

    #[test]
    fn test_resolve_reads_cookie_or_default() {
        let svc = service();
        assert_eq!(svc.resolve(Some("theme=dark; NEXT_LOCALE=en")), "en");
        assert_eq!(svc.resolve(Some("NEXT_LOCALE=\"en\"")), "en");
        assert_eq!(svc.resolve(Some("NEXT_LOCALE=zz")), "fr");
        assert_eq!(svc.resolve(Some("OTHER_NEXT_LOCALE=en")), "fr");
        assert_eq!(svc.resolve(None), "fr");
    }
}
