use serde::{Deserialize, Serialize};

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// A locale code already checked against the supported set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSelection {
    pub locale: String,
}
