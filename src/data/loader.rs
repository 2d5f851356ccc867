use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Default survey data location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data.json";

/// Raw survey data: category key → percentage, in document order.
pub type SurveyData = IndexMap<String, f64>;

/// Where survey data is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    File(PathBuf),
    /// Fetched with a blocking GET; requires the `http-loader` feature.
    Url(String),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Reads `source` exactly once and parses it into survey data.
///
/// Every failure (read, HTTP status, JSON syntax, shape) is reported as
/// [`ChartError::DataAcquisition`]. There is no retry.
pub fn load_survey_data(source: &DataSource) -> ChartResult<SurveyData> {
    let label = source.to_string();
    let body = read_source(source)?;
    let data = parse_survey_json(&body).map_err(|err| match err {
        ChartError::InvalidData(reason) => ChartError::data_acquisition(&label, reason),
        other => other,
    })?;
    debug!(source = %label, categories = data.len(), "survey data loaded");
    Ok(data)
}

/// Parses a flat JSON object of non-negative numbers, keeping key order.
pub fn parse_survey_json(input: &str) -> ChartResult<SurveyData> {
    let document: IndexMap<String, Value> = serde_json::from_str(input)
        .map_err(|err| ChartError::InvalidData(format!("malformed survey json: {err}")))?;

    document
        .into_iter()
        .map(|(key, value)| {
            let number = value
                .as_f64()
                .filter(|number| number.is_finite() && *number >= 0.0);
            match number {
                Some(number) => Ok((key, number)),
                None => Err(ChartError::InvalidData(format!(
                    "value for `{key}` must be a finite, non-negative number, got {value}"
                ))),
            }
        })
        .collect()
}

fn read_source(source: &DataSource) -> ChartResult<String> {
    match source {
        DataSource::File(path) => std::fs::read_to_string(path)
            .map_err(|err| ChartError::data_acquisition(path.display().to_string(), err)),
        DataSource::Url(url) => fetch_url(url),
    }
}

#[cfg(feature = "http-loader")]
fn fetch_url(url: &str) -> ChartResult<String> {
    let response =
        reqwest::blocking::get(url).map_err(|err| ChartError::data_acquisition(url, err))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ChartError::data_acquisition(
            url,
            format!("unexpected http status {status}"),
        ));
    }
    response
        .text()
        .map_err(|err| ChartError::data_acquisition(url, err))
}

#[cfg(not(feature = "http-loader"))]
fn fetch_url(url: &str) -> ChartResult<String> {
    Err(ChartError::data_acquisition(
        url,
        "url sources require the `http-loader` feature",
    ))
}
