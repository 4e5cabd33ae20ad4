//! Portal fixtures: config scripts, cookie values and result pages.

use crate::test_utils::html::{ResultPageBuilder, TableBuilder};

/// A `jsConfig.php` body carrying the CSRF triple `key`/`value`.
pub fn config_script(key: &str, value: &str) -> String {
    format!(
        r#"var config = {{
    baseUrl: "/",
    lang: "es",
    CSRFTokenKey: "{key}",
    CSRFToken: "{value}",
    CSRFTokenString: "{key}={value}",
    debug: false
}};"#
    )
}

/// Values served by [`crate::test_utils::mocks::PortalMock`] along the login flow.
pub mod portal {
    use crate::sips::csrf::CsrfTokens;

    pub const USER: &str = "test_user";
    pub const PASSWORD: &str = "test_password";

    pub const LANDING_COOKIE: &str = "PHPSESSID=landing123";
    pub const LOGIN_SESSION_COOKIE: &str = "PHPSESSID=session456";
    pub const REMEMBER_COOKIE: &str = "remember=1";
    pub const LANG_COOKIE: &str = "lang=es";
    pub const REDIRECT_PATH: &str = "/inicio.php";

    /// Cookie header after the landing page.
    pub const LANDING_COOKIE_HEADER: &str = "PHPSESSID=landing123";
    /// Cookie header after the login POST; the session id was replaced.
    pub const LOGIN_COOKIE_HEADER: &str = "PHPSESSID=session456; remember=1";
    /// Cookie header after the redirect, used for every later request.
    pub const SESSION_COOKIE_HEADER: &str = "PHPSESSID=session456; lang=es; remember=1";

    pub const PRE_LOGIN_KEY: &str = "pre_key";
    pub const PRE_LOGIN_VALUE: &str = "pre_value";
    pub const POST_LOGIN_KEY: &str = "post_key";
    pub const POST_LOGIN_VALUE: &str = "post_value";

    pub fn pre_login_tokens() -> CsrfTokens {
        tokens(PRE_LOGIN_KEY, PRE_LOGIN_VALUE)
    }

    pub fn post_login_tokens() -> CsrfTokens {
        tokens(POST_LOGIN_KEY, POST_LOGIN_VALUE)
    }

    fn tokens(key: &str, value: &str) -> CsrfTokens {
        CsrfTokens {
            key: key.to_string(),
            value: value.to_string(),
            query_string: format!("{}={}", key, value),
        }
    }
}

/// Search result pages.
pub mod result_page {
    use super::*;
    use crate::sips::lookup::{ANNUAL_SECTION, READINGS_SECTION, SUPPLY_SECTION};

    pub const CUPS: &str = "ES0021000012345678AB0F";

    fn supply_table() -> String {
        TableBuilder::new()
            .row(&["CUPS", CUPS])
            .row(&["Tarifa", "3.0TD"])
            .row(&["Distribuidora", "I-DE REDES ELECTRICAS INTELIGENTES"])
            .row(&["Potencia contratada P1", "15"])
            .row(&["Potencia contratada P2", "15"])
            .row(&["Potencia contratada P3", "15"])
            .row(&["Potencia contratada P4", "15"])
            .row(&["Potencia contratada P5", "15"])
            .row(&["Potencia contratada P6", "20,5"])
            .build()
    }

    fn annual_table() -> String {
        TableBuilder::new()
            .header_row(&["Periodo", "Consumo (kWh)"])
            .labelled_row("P1", &["1.162"])
            .labelled_row("P2", &["840"])
            .labelled_row("P3", &["13.857"])
            .labelled_row("Total", &["15.859"])
            .build()
    }

    /// Activa anchored on 15/07/2025, Maxímetro on 15/06/2025.
    fn readings_table() -> String {
        TableBuilder::new()
            .thead(&["Fecha", "Tipo", "P1", "P2", "P3", "P4", "P5", "P6"])
            .row(&["15/07/2025", "Activa", "13.857", "1.162", "", "0", "0", "0"])
            .row(&["15/06/2025", "Maxímetro", "4.844", "140", "", "0", "0", "0"])
            .row(&["15/05/2025", "Reactiva", "12", "0", "0", "0", "0", "0"])
            .row(&["15/08/2024", "Activa", "500"])
            .row(&["15/07/2024", "Activa", "999"])
            .row(&["15/07/2024", "Maxímetro", "3.5"])
            .with_tbody()
            .build()
    }

    /// All three sections.
    pub fn full() -> String {
        ResultPageBuilder::new()
            .raw("<div id=\"cabecera\">SIPS Logos Energía</div>")
            .section(SUPPLY_SECTION, &supply_table())
            .section(ANNUAL_SECTION, &annual_table())
            .section(READINGS_SECTION, &readings_table())
            .build()
    }

    /// Only the supply data section.
    pub fn supply_only() -> String {
        ResultPageBuilder::new()
            .section(SUPPLY_SECTION, &supply_table())
            .build()
    }

    /// What the portal renders for an unknown CUPS.
    pub fn without_supply_section() -> String {
        ResultPageBuilder::new()
            .raw("<div class=\"aviso\">No se han encontrado resultados</div>")
            .section(ANNUAL_SECTION, &annual_table())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sips::csrf::CsrfTokens;

    #[test]
    fn test_config_script_round_trips_tokens() {
        let tokens = CsrfTokens::extract(&config_script(
            portal::PRE_LOGIN_KEY,
            portal::PRE_LOGIN_VALUE,
        ));
        assert_eq!(tokens, portal::pre_login_tokens());
    }
}
