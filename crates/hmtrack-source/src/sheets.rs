//! Google Sheets values API
//!
//! Each logical table is a worksheet of one spreadsheet document. Reads fetch
//! the whole sheet; writes clear it and then put the header and every row
//! back with raw (uninterpreted) values.

use hmtrack_core::{DataSource, SourceError, Table};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use tracing::{debug, info};

use crate::ValueRange;

/// Spreadsheet document accessed through the Sheets REST API
#[derive(Clone, Debug)]
pub struct SheetsSource {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    token: Option<String>,
}

impl SheetsSource {
    pub const DEFAULT_API_BASE: &'static str = "https://sheets.googleapis.com";

    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token: None,
        }
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// OAuth bearer token sent with every request
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// `…/v4/spreadsheets/{id}/values/{range}[suffix]`, range percent-encoded
    pub fn values_url(&self, range: &str, suffix: &str) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.api_base).map_err(|e| SourceError::unavailable(range, e))?;
        url.path_segments_mut()
            .map_err(|()| SourceError::unavailable(range, format!("invalid API base '{}'", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values"])
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, table: &str, request: RequestBuilder) -> Result<reqwest::blocking::Response, SourceError> {
        self.authorized(request)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| SourceError::unavailable(table, e))
    }
}

impl DataSource for SheetsSource {
    fn read(&mut self, table: &str) -> Result<Table, SourceError> {
        let url = self.values_url(table, "")?;
        debug!(%url, "fetching sheet");
        let range: ValueRange = self
            .send(table, self.client.get(url))?
            .json()
            .map_err(|e| SourceError::malformed(table, e))?;
        Ok(range.into_table())
    }

    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError> {
        let clear = self.values_url(table, ":clear")?;
        self.send(table, self.client.post(clear).json(&serde_json::json!({})))?;

        let mut update = self.values_url(table, "")?;
        update.query_pairs_mut().append_pair("valueInputOption", "RAW");
        self.send(table, self.client.put(update).json(&ValueRange::from_table(table, data)))?;

        info!(sheet = table, rows = data.row_count(), "sheet replaced");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("google sheets {}", self.spreadsheet_id)
    }
}
