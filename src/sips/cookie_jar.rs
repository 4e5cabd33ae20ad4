//! Session cookies accumulated across one portal login.
//!
//! No expiry, domain or path handling. A jar lives for a single lookup and is
//! dropped afterwards.

use reqwest::header::{HeaderMap, SET_COOKIE};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores every cookie set by a response, overwriting earlier values of
    /// the same name.
    pub fn merge_from(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            // invalid UTF-8 becomes U+FFFD
            let raw = String::from_utf8_lossy(value.as_bytes());
            self.merge_header_value(&raw);
        }
    }

    /// Stores the cookies of one `Set-Cookie` value, which may hold several
    /// cookies joined by commas.
    pub fn merge_header_value(&mut self, raw: &str) {
        for entry in split_set_cookie(raw) {
            let pair = entry.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    self.cookies.insert(name.to_string(), value.trim().to_string());
                }
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Renders the jar as a `Cookie` request header value.
    pub fn to_header_string(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Splits a comma-joined `Set-Cookie` value into single cookies.
///
/// A comma only starts a new cookie when it is followed by a `name=` token, so
/// commas inside attribute values such as `Expires=Wed, 21 Oct 2015 ...` stay
/// where they are.
fn split_set_cookie(raw: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;

    for (index, ch) in raw.char_indices() {
        if ch == ',' && starts_cookie_pair(&raw[index + 1..]) {
            entries.push(raw[start..index].trim());
            start = index + 1;
        }
    }
    entries.push(raw[start..].trim());

    entries.into_iter().filter(|e| !e.is_empty()).collect()
}

fn starts_cookie_pair(rest: &str) -> bool {
    let rest = rest.trim_start();
    let name_len = rest
        .find(|c: char| c == '=' || c == ';' || c == ',' || c.is_whitespace())
        .unwrap_or(rest.len());
    name_len > 0 && rest[name_len..].starts_with('=')
}
