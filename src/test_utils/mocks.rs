//! A mockito-backed SIPS portal.
//!
//! Each step of the login flow only matches the exact cookie header the
//! previous step should have produced, so a cookie-merge regression shows up
//! as an unmatched request (501) and a failed lookup.

use crate::config::{Credentials, SipsConfig};
use crate::test_utils::config::TestSipsConfigBuilder;
use crate::test_utils::fixtures::{config_script, portal};
use mockito::{Matcher, Mock, Server, ServerGuard};

const CONFIG_SCRIPT_PATH: &str = "/application/jsConfig.php";
const QUERY_PATH: &str = "/custom/logosenergia/sips/index.php";

pub struct PortalMock {
    server: ServerGuard,
    login_mocks: Vec<Mock>,
    search_mocks: Vec<Mock>,
}

impl PortalMock {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
            login_mocks: Vec::new(),
            search_mocks: Vec::new(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Configuration pointing at this portal with the expected credentials.
    pub fn config(&self) -> SipsConfig {
        TestSipsConfigBuilder::new()
            .with_url(self.url())
            .with_user(portal::USER)
            .with_password(portal::PASSWORD)
            .with_query_path(QUERY_PATH)
            .build()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            user: portal::USER.to_string(),
            password: portal::PASSWORD.to_string(),
        }
    }

    /// Registers the five HTTP exchanges of the login flow, each expected once.
    pub async fn mock_login_flow(&mut self) {
        let landing = self
            .server
            .mock("GET", "/")
            .match_header("cookie", Matcher::Missing)
            .with_status(200)
            .with_header("set-cookie", &format!("{}; path=/", portal::LANDING_COOKIE))
            .with_body("<html><body><form id=\"login\"></form></body></html>")
            .expect(1)
            .create_async()
            .await;

        let pre_login_config = self
            .server
            .mock("GET", CONFIG_SCRIPT_PATH)
            .match_query(Matcher::UrlEncoded(
                "template".to_string(),
                "/js/config.js".to_string(),
            ))
            .match_header("cookie", portal::LANDING_COOKIE_HEADER)
            .with_status(200)
            .with_body(config_script(portal::PRE_LOGIN_KEY, portal::PRE_LOGIN_VALUE))
            .expect(1)
            .create_async()
            .await;

        let login = self
            .server
            .mock("POST", "/")
            .match_header("cookie", portal::LANDING_COOKIE_HEADER)
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(format!(
                    "^{}={}&",
                    portal::PRE_LOGIN_KEY,
                    portal::PRE_LOGIN_VALUE
                )),
                Matcher::UrlEncoded("cmd".to_string(), "login".to_string()),
                Matcher::UrlEncoded("login".to_string(), portal::USER.to_string()),
                Matcher::UrlEncoded("password".to_string(), portal::PASSWORD.to_string()),
                Matcher::UrlEncoded("keep_logged".to_string(), "1".to_string()),
            ]))
            .with_status(302)
            .with_header("location", portal::REDIRECT_PATH)
            .with_header(
                "set-cookie",
                &format!("{}; path=/; HttpOnly", portal::LOGIN_SESSION_COOKIE),
            )
            .with_header("set-cookie", portal::REMEMBER_COOKIE)
            .expect(1)
            .create_async()
            .await;

        let redirect = self
            .server
            .mock("GET", portal::REDIRECT_PATH)
            .match_header("cookie", portal::LOGIN_COOKIE_HEADER)
            .with_status(200)
            .with_header("set-cookie", portal::LANG_COOKIE)
            .with_body("<html><body>Bienvenido</body></html>")
            .expect(1)
            .create_async()
            .await;

        let post_login_config = self
            .server
            .mock("GET", CONFIG_SCRIPT_PATH)
            .match_query(Matcher::UrlEncoded(
                "template".to_string(),
                "/js/config.js".to_string(),
            ))
            .match_header("cookie", portal::SESSION_COOKIE_HEADER)
            .with_status(200)
            .with_body(config_script(
                portal::POST_LOGIN_KEY,
                portal::POST_LOGIN_VALUE,
            ))
            .expect(1)
            .create_async()
            .await;

        self.login_mocks.extend([
            landing,
            pre_login_config,
            login,
            redirect,
            post_login_config,
        ]);
    }

    /// Serves `body` for a search on `cups` made with the post-login session.
    pub async fn mock_search(&mut self, cups: &str, body: &str) {
        let search = self
            .server
            .mock("GET", QUERY_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("cmd".to_string(), "search".to_string()),
                Matcher::UrlEncoded("Q_SUPPLY".to_string(), "Electricidad".to_string()),
                Matcher::UrlEncoded("Q_CUPS".to_string(), cups.to_string()),
                Matcher::UrlEncoded("LECTURAS_MEDIDAS".to_string(), "1".to_string()),
                Matcher::UrlEncoded(
                    portal::POST_LOGIN_KEY.to_string(),
                    portal::POST_LOGIN_VALUE.to_string(),
                ),
            ]))
            .match_header("cookie", portal::SESSION_COOKIE_HEADER)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(body)
            .create_async()
            .await;
        self.search_mocks.push(search);
    }

    /// Asserts every login exchange was hit exactly once.
    pub async fn assert_login_flow(&self) {
        for mock in &self.login_mocks {
            mock.assert_async().await;
        }
    }

    /// Asserts every registered search was hit.
    pub async fn assert_searches(&self) {
        for mock in &self.search_mocks {
            mock.assert_async().await;
        }
    }
}
