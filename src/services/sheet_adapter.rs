use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    configuration::SheetSettings,
    domain::{criteria::SearchCriteria, prospect::ProspectRecord},
    services::poller::ProspectFetcher,
};

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("no sheet export url configured")]
    NotConfigured,
    #[error("sheet fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("sheet export returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed sheet payload: {0}")]
    Parse(String),
}

/// Fetches the sheet's public export and converts its rows into prospect
/// records. The export wraps its JSON payload in a callback shim and
/// leading metadata, so the raw text has to be unwrapped first.
pub struct SheetAdapter {
    client: reqwest::Client,
    settings: SheetSettings,
}

impl SheetAdapter {
    pub fn new(settings: SheetSettings) -> Self {
        SheetAdapter {
            client: reqwest::Client::new(),
            settings,
        }
    }

    pub async fn fetch_prospects(&self) -> Result<Vec<ProspectRecord>, AdapterError> {
        let url = self
            .settings
            .export_url
            .as_deref()
            .ok_or(AdapterError::NotConfigured)?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AdapterError::Status(response.status()));
        }

        let text = response.text().await?;
        let records = parse_export(&text, self.settings.skip_header)?;
        log::info!("Fetched {} prospect rows from sheet export", records.len());
        Ok(records)
    }
}

#[async_trait::async_trait]
impl ProspectFetcher for SheetAdapter {
    async fn fetch(&self, _criteria: &SearchCriteria) -> Result<Vec<ProspectRecord>, AdapterError> {
        // The export always returns the whole sheet; windowing on the
        // criteria happens in the poller.
        self.fetch_prospects().await
    }
}

#[derive(Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Deserialize)]
struct GvizTable {
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Deserialize)]
struct GvizCell {
    v: Option<Value>,
}

/// Parse the raw export text into records. With `skip_header` the export is
/// the header-inclusive variant and row 0 carries column labels.
pub fn parse_export(text: &str, skip_header: bool) -> Result<Vec<ProspectRecord>, AdapterError> {
    let payload = extract_payload(text)?;
    let response: GvizResponse =
        serde_json::from_str(payload).map_err(|e| AdapterError::Parse(e.to_string()))?;

    let skip = usize::from(skip_header);
    Ok(response.table.rows.into_iter().skip(skip).map(map_row).collect())
}

/// Isolate the JSON object embedded in the export response: everything
/// before the first `{` and after the last `}` is wrapper text. This also
/// covers the callback variant, whose braces sit inside the parentheses.
fn extract_payload(text: &str) -> Result<&str, AdapterError> {
    let start = text
        .find('{')
        .ok_or_else(|| AdapterError::Parse("no json object in export response".to_string()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| AdapterError::Parse("unterminated json object in export response".to_string()))?;
    if end < start {
        return Err(AdapterError::Parse(
            "unbalanced braces in export response".to_string(),
        ));
    }

    Ok(&text[start..=end])
}

fn map_row(row: GvizRow) -> ProspectRecord {
    ProspectRecord {
        name: cell_text(&row, 0),
        title: cell_text(&row, 1),
        linkedin_url: cell_text(&row, 2),
        about: cell_text(&row, 3),
        image_url: cell_text(&row, 4),
    }
}

/// Cells map positionally; a missing cell, a null cell or a cell without a
/// value all read as the empty string.
fn cell_text(row: &GvizRow, index: usize) -> String {
    match row.c.get(index).and_then(|cell| cell.as_ref()).and_then(|cell| cell.v.as_ref()) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
