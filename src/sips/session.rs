//! Authenticated session against the SIPS portal.
//!
//! The login is a fixed sequence of dependent HTTP exchanges. Each one is a
//! transition of [`SessionState`], driven by [`SessionBuilder::advance`], so
//! a failing step leaves the builder in the last state it reached.
//!
//! ```text
//! Start -> LandingFetched -> PreLoginConfigFetched -> LoginSubmitted
//!       -> Redirected -> PostLoginConfigFetched -> Ready
//! ```

use crate::config::Credentials;
use crate::error::SipsError;
use crate::sips::client::Client;
use crate::sips::cookie_jar::CookieJar;
use crate::sips::csrf::CsrfTokens;
use url::form_urlencoded;

/// Portal root: landing page and login form target.
pub const ROOT_PATH: &str = "/";

/// JavaScript config carrying the CSRF tokens.
pub const CONFIG_SCRIPT_PATH: &str = "/application/jsConfig.php?template=/js/config.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Start,
    LandingFetched,
    PreLoginConfigFetched { tokens: CsrfTokens },
    LoginSubmitted { location: String },
    Redirected,
    PostLoginConfigFetched { tokens: CsrfTokens },
    Ready { tokens: CsrfTokens },
}

/// A logged-in session: the accumulated cookies and the post-login tokens.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    cookies: CookieJar,
    tokens: CsrfTokens,
}

impl AuthenticatedSession {
    #[cfg(test)]
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn cookies_mut(&mut self) -> &mut CookieJar {
        &mut self.cookies
    }

    /// Tokens issued after login; the portal rotates them on authentication.
    pub fn tokens(&self) -> &CsrfTokens {
        &self.tokens
    }
}

pub struct SessionBuilder<'a> {
    client: &'a Client,
    credentials: &'a Credentials,
    cookies: CookieJar,
    state: SessionState,
}

impl<'a> SessionBuilder<'a> {
    pub fn new(client: &'a Client, credentials: &'a Credentials) -> Self {
        Self {
            client,
            credentials,
            cookies: CookieJar::new(),
            state: SessionState::Start,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[cfg(test)]
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Performs the HTTP exchange for the current state and moves to the next
    /// one. On error the state is left unchanged. `Ready` is terminal.
    pub async fn advance(&mut self) -> Result<&SessionState, SipsError> {
        let next = match self.state.clone() {
            SessionState::Start => self.fetch_landing().await?,
            SessionState::LandingFetched => self.fetch_pre_login_config().await?,
            SessionState::PreLoginConfigFetched { tokens } => self.submit_login(&tokens).await?,
            SessionState::LoginSubmitted { location } => self.follow_redirect(&location).await?,
            SessionState::Redirected => self.fetch_post_login_config().await?,
            SessionState::PostLoginConfigFetched { tokens } => SessionState::Ready { tokens },
            SessionState::Ready { .. } => return Ok(&self.state),
        };
        tracing::debug!("SIPS session: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(&self.state)
    }

    /// Runs every remaining transition and returns the authenticated session.
    pub async fn establish(mut self) -> Result<AuthenticatedSession, SipsError> {
        loop {
            self.advance().await?;
            if let SessionState::Ready { tokens } = &self.state {
                return Ok(AuthenticatedSession {
                    tokens: tokens.clone(),
                    cookies: self.cookies,
                });
            }
        }
    }

    async fn fetch_landing(&mut self) -> Result<SessionState, SipsError> {
        let url = self.client.endpoint(ROOT_PATH)?;
        self.client.get(url, &mut self.cookies).await?;
        Ok(SessionState::LandingFetched)
    }

    async fn fetch_pre_login_config(&mut self) -> Result<SessionState, SipsError> {
        let tokens = self.fetch_tokens("pre-login").await?;
        Ok(SessionState::PreLoginConfigFetched { tokens })
    }

    async fn submit_login(&mut self, tokens: &CsrfTokens) -> Result<SessionState, SipsError> {
        let url = self.client.endpoint(ROOT_PATH)?;
        let body = login_body(tokens, self.credentials);
        let location = self
            .client
            .post_form_without_redirect(url, body, &mut self.cookies)
            .await?
            .unwrap_or_else(|| ROOT_PATH.to_string());
        Ok(SessionState::LoginSubmitted { location })
    }

    async fn follow_redirect(&mut self, location: &str) -> Result<SessionState, SipsError> {
        let url = self.client.resolve(location)?;
        self.client.get(url, &mut self.cookies).await?;
        Ok(SessionState::Redirected)
    }

    async fn fetch_post_login_config(&mut self) -> Result<SessionState, SipsError> {
        let tokens = self.fetch_tokens("post-login").await?;
        Ok(SessionState::PostLoginConfigFetched { tokens })
    }

    async fn fetch_tokens(&mut self, stage: &str) -> Result<CsrfTokens, SipsError> {
        let url = self.client.endpoint(CONFIG_SCRIPT_PATH)?;
        let script = self.client.get(url, &mut self.cookies).await?;
        let tokens = CsrfTokens::extract(&script);
        if !tokens.is_complete() {
            tracing::warn!("Incomplete {} CSRF tokens from SIPS config script", stage);
        }
        Ok(tokens)
    }
}

/// URL-encoded login form, prefixed with the preformatted CSRF query string.
fn login_body(tokens: &CsrfTokens, credentials: &Credentials) -> String {
    let form = form_urlencoded::Serializer::new(String::new())
        .append_pair("cmd", "login")
        .append_pair("login", &credentials.user)
        .append_pair("password", &credentials.password)
        .append_pair("keep_logged", "1")
        .finish();
    if tokens.query_string.is_empty() {
        form
    } else {
        format!("{}&{}", tokens.query_string, form)
    }
}
