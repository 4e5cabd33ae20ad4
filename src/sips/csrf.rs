//! CSRF token extraction from the portal's JavaScript config resource.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| token_regex("CSRFTokenKey"));
static TOKEN_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| token_regex("CSRFToken"));
static TOKEN_STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| token_regex("CSRFTokenString"));

fn token_regex(field: &str) -> Regex {
    // `\b` before the name keeps `CSRFToken` from matching inside other keys
    Regex::new(&format!(r#"\b{}\s*:\s*"([^"]*)""#, field))
        .unwrap_or_else(|e| panic!("invalid CSRF pattern for {}: {}", field, e))
}

/// The three cooperating fragments the portal expects on form submissions.
///
/// Any fragment missing from the script is an empty string; see
/// [`CsrfTokens::is_complete`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfTokens {
    pub key: String,
    pub value: String,
    /// Preformatted `key=value` query fragment, appended verbatim to requests
    pub query_string: String,
}

impl CsrfTokens {
    /// Extracts the token fragments from a config script body. Never fails.
    pub fn extract(script: &str) -> Self {
        Self {
            key: capture(&TOKEN_KEY_RE, script),
            value: capture(&TOKEN_VALUE_RE, script),
            query_string: capture(&TOKEN_STRING_RE, script),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty() && !self.query_string.is_empty()
    }
}

fn capture(re: &Regex, script: &str) -> String {
    re.captures(script)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
