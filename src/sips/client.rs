use crate::config::SipsConfig;
use crate::error::{Result, SipsError};
use crate::sips::cookie_jar::CookieJar;
use reqwest::header::{CONTENT_TYPE, COOKIE, LOCATION, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Client as HttpClient, RequestBuilder};
use std::time::Duration;
use url::Url;

const USER_AGENT_VALUE: &str = "Mozilla/5.0 (compatible; logosenergia-sips)";

/// HTTP access to the SIPS portal.
///
/// Holds no cookie store: every call takes the caller's [`CookieJar`], sends
/// its contents and merges the response cookies back, so sessions are never
/// shared between lookups.
pub struct Client {
    http_client: HttpClient,
    // redirects disabled so login cookies can be read before following
    login_client: HttpClient,
    base_url: Url,
}

impl Client {
    pub fn new(config: &SipsConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let timeout = Duration::from_secs(config.request_timeout_sec);
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(SipsError::from)?;
        let login_client = HttpClient::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(SipsError::from)?;

        Ok(Self {
            http_client,
            login_client,
            base_url,
        })
    }

    /// URL of a portal endpoint. `path` is relative to the base URL even when
    /// it starts with `/`, so a base such as `https://host/sips/` keeps its
    /// prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, SipsError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Resolves a `Location` header value against the base URL with the usual
    /// relative-reference rules.
    pub fn resolve(&self, location: &str) -> Result<Url, SipsError> {
        Ok(self.base_url.join(location)?)
    }

    /// GETs `url` with the jar's cookies and returns the body of a 2xx
    /// response. Cookies are merged even when the status is rejected.
    pub async fn get(&self, url: Url, jar: &mut CookieJar) -> Result<String, SipsError> {
        let request = with_cookies(self.http_client.get(url.clone()), jar);
        let response = request.send().await?;
        jar.merge_from(response.headers());

        let status = response.status();
        if !status.is_success() {
            return Err(SipsError::status(status, url.as_str()));
        }
        Ok(response.text().await?)
    }

    /// POSTs a URL-encoded `body` without following redirects and returns the
    /// `Location` header, if any. 2xx and 3xx statuses are accepted.
    pub async fn post_form_without_redirect(
        &self,
        url: Url,
        body: String,
        jar: &mut CookieJar,
    ) -> Result<Option<String>, SipsError> {
        let request = with_cookies(self.login_client.post(url.clone()), jar)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);
        let response = request.send().await?;
        jar.merge_from(response.headers());

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(SipsError::status(status, url.as_str()));
        }
        Ok(response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string))
    }
}

fn with_cookies(request: RequestBuilder, jar: &CookieJar) -> RequestBuilder {
    let request = request.header(USER_AGENT, USER_AGENT_VALUE);
    if jar.is_empty() {
        request
    } else {
        request.header(COOKIE, jar.to_header_string())
    }
}
