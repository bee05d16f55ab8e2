//! Data source construction from configuration

use std::time::Duration;

use anyhow::{bail, Result};
use hmtrack_core::{DataSource, SourceConfig, SourceKind};
use hmtrack_source::{CachedSource, CsvDirSource, JsonDirSource, SheetsSource};
use tracing::info;

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV: &str = "HMTRACK_SHEETS_TOKEN";

pub type DynSource = CachedSource<Box<dyn DataSource>>;

/// Build the configured source, wrapped in the read cache
///
/// Failing here is fatal: without a source there is nothing to degrade to.
pub fn open_source(config: &SourceConfig) -> Result<DynSource> {
    let inner: Box<dyn DataSource> = match config.kind {
        SourceKind::JsonDir => Box::new(JsonDirSource::new(&config.data_dir)),
        SourceKind::CsvDir => Box::new(CsvDirSource::new(&config.data_dir)),
        SourceKind::Sheets => {
            let Some(id) = config.spreadsheet_id.as_deref().filter(|id| !id.is_empty()) else {
                bail!("source.spreadsheet_id is required for the sheets source");
            };
            let token = match &config.token {
                Some(token) => token.clone(),
                None => match std::env::var(TOKEN_ENV) {
                    Ok(token) if !token.is_empty() => token,
                    _ => bail!("no Sheets API token: set source.token or {TOKEN_ENV}"),
                },
            };
            Box::new(SheetsSource::new(id).api_base(&config.api_base).token(token))
        }
    };

    info!(source = %inner.describe(), "data source opened");
    Ok(CachedSource::new(inner).ttl(Duration::from_secs(config.cache_ttl_secs)))
}
