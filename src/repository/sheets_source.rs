use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use super::AvailabilitySource;

/// Reads the answer sheet through the Google Sheets v4 `values.get` endpoint.
#[derive(Debug)]
pub struct SheetsAvailabilitySource {
    client: reqwest::Client,
    values_url: Url,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsAvailabilitySource {
    pub fn new(
        api_base: &str,
        spreadsheet_id: &str,
        range: &str,
        api_key: &str,
    ) -> anyhow::Result<SheetsAvailabilitySource> {
        let values_url = values_url(api_base, spreadsheet_id, range, api_key)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!("Reading availability from spreadsheet {spreadsheet_id}, range {range}");

        Ok(SheetsAvailabilitySource { client, values_url })
    }
}

fn values_url(
    api_base: &str,
    spreadsheet_id: &str,
    range: &str,
    api_key: &str,
) -> anyhow::Result<Url> {
    let mut url =
        Url::parse(api_base).with_context(|| format!("Invalid Sheets API URL `{api_base}`"))?;

    url.path_segments_mut()
        .map_err(|_| anyhow!("Sheets API URL `{api_base}` cannot have a path"))?
        .pop_if_empty()
        .extend(["spreadsheets", spreadsheet_id, "values", range]);

    url.query_pairs_mut().append_pair("key", api_key);

    Ok(url)
}

#[async_trait]
impl AvailabilitySource for SheetsAvailabilitySource {
    #[tracing::instrument(skip(self))]
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Vec<String>>> {
        let response = self
            .client
            .get(self.values_url.clone())
            .send()
            .await
            .context("Request to the Sheets API failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Sheets API responded with {status}: {body}"));
        }

        let value_range: ValueRange = response
            .json()
            .await
            .context("Could not read the Sheets API response")?;

        debug!("Fetched {} rows", value_range.values.len());

        Ok(value_range.values)
    }
}
