use crate::config::{Credentials, SipsConfig};
use crate::error::{Result, SipsError};
use crate::model::{LookupOutcome, MonthlyAggregate, RawReadingRow, ReadingKind};
use crate::sips::aggregate::aggregate_monthly;
use crate::sips::assemble::assemble;
use crate::sips::client::Client;
use crate::sips::csrf::CsrfTokens;
use crate::sips::parsers::{
    AnnualConsumptionParser, KeyValueTableParser, ReadingTableParser, TableParser,
};
use crate::sips::session::SessionBuilder;
use crate::sips::table_locator::table_or_warn;
use std::time::Duration;
use url::{form_urlencoded, Url};

pub const SUPPLY_SECTION: &str = "Datos suministro";
pub const ANNUAL_SECTION: &str = "Consumo anual";
pub const READINGS_SECTION: &str = "Lecturas";

/// Entry point for CUPS lookups against the SIPS portal.
///
/// Every lookup logs in from scratch with its own cookie jar; nothing but the
/// HTTP clients is shared between calls.
pub struct SipsService {
    client: Client,
    config: SipsConfig,
}

impl SipsService {
    pub fn new(config: SipsConfig) -> Result<Self> {
        let client = Client::new(&config)?;
        Ok(Self { client, config })
    }

    /// Logs in, runs the search for `cups` and scrapes the result page.
    ///
    /// Missing credentials fail before any request is made. The whole sequence
    /// runs under the invocation deadline.
    pub async fn lookup(&self, cups: &str) -> Result<LookupOutcome> {
        let credentials = self.config.credentials()?;
        let deadline = self.config.invocation_timeout_sec;

        tracing::info!("Looking up CUPS {} in SIPS", cups);
        match tokio::time::timeout(
            Duration::from_secs(deadline),
            self.run_lookup(cups, &credentials),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(SipsError::Timeout(deadline).into()),
        }
    }

    async fn run_lookup(&self, cups: &str, credentials: &Credentials) -> Result<LookupOutcome> {
        let mut session = SessionBuilder::new(&self.client, credentials)
            .establish()
            .await?;
        let url = self.search_url(cups, session.tokens())?;
        let html = self.client.get(url, session.cookies_mut()).await?;

        let outcome = parse_result_page(&html);
        if outcome == LookupOutcome::NotFound {
            tracing::info!("No supply data for CUPS {}", cups);
        }
        Ok(outcome)
    }

    fn search_url(&self, cups: &str, tokens: &CsrfTokens) -> Result<Url, SipsError> {
        let mut url = self.client.endpoint(&self.config.query_path)?;
        let mut query = form_urlencoded::Serializer::new(String::new())
            .append_pair("cmd", "search")
            .append_pair("Q_SUPPLY", "Electricidad")
            .append_pair("Q_CUPS", cups)
            .append_pair("LECTURAS_MEDIDAS", "1")
            .finish();
        if !tokens.query_string.is_empty() {
            query.push('&');
            query.push_str(&tokens.query_string);
        }
        url.set_query(Some(&query));
        Ok(url)
    }
}

/// Scrapes the three sections of a search result page.
pub fn parse_result_page(html: &str) -> LookupOutcome {
    let metadata = table_or_warn(html, SUPPLY_SECTION)
        .map(|table| KeyValueTableParser.parse_table(table))
        .unwrap_or_default();
    let annual = table_or_warn(html, ANNUAL_SECTION)
        .map(|table| AnnualConsumptionParser.parse_table(table))
        .unwrap_or_default();

    let (consumo_mensual, potencia_consumida) = match table_or_warn(html, READINGS_SECTION) {
        Some(table) => (
            monthly_for(table, ReadingKind::Activa),
            monthly_for(table, ReadingKind::Maximetro),
        ),
        None => (MonthlyAggregate::new(), MonthlyAggregate::new()),
    };

    assemble(metadata, annual, consumo_mensual, potencia_consumida)
}

/// Parses the readings table with `kind`'s numeric locale and aggregates the
/// rows of that kind.
fn monthly_for(table: &str, kind: ReadingKind) -> MonthlyAggregate {
    let rows: Vec<RawReadingRow> = ReadingTableParser::for_kind(kind)
        .parse_table(table)
        .into_iter()
        .filter(|row| row.kind() == Some(kind))
        .collect();
    aggregate_monthly(&rows)
}
