//! Parsing of FRED observation documents.

use chrono::NaiveDate;
use macrodash_types::{Observation, RawSeries};
use serde::Deserialize;
use thiserror::Error;

/// Value FRED reports for a period without data.
pub const MISSING_VALUE: &str = ".";

/// Errors that can occur while parsing an observations document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The document is not valid JSON or lacks the expected fields.
    #[error("Malformed observations document: {0}")]
    Malformed(String),

    /// An observation date is not `YYYY-MM-DD`.
    #[error("Invalid observation date: {0}")]
    InvalidDate(String),

    /// An observation value is neither numeric nor the missing marker.
    #[error("Invalid value '{value}' on {date}")]
    InvalidValue {
        /// Observation date.
        date: NaiveDate,
        /// The offending value.
        value: String,
    },
}

#[derive(Deserialize)]
struct ObservationsDocument {
    observations: Vec<RawObservation>,
}

#[derive(Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// Error document returned by FRED alongside 4xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDocument {
    pub(crate) error_message: String,
}

/// Parses a FRED `series/observations` JSON body into a series.
///
/// # Errors
///
/// Returns an error if the document is malformed or any observation has an
/// unparsable date or value.
pub fn parse_observations(data: &[u8]) -> Result<RawSeries, ParseError> {
    let doc: ObservationsDocument =
        serde_json::from_slice(data).map_err(|e| ParseError::Malformed(e.to_string()))?;

    let observations = doc
        .observations
        .into_iter()
        .map(parse_single_observation)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawSeries::from_observations(observations))
}

fn parse_single_observation(raw: RawObservation) -> Result<Observation, ParseError> {
    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDate(raw.date.clone()))?;

    let value = match raw.value.trim() {
        MISSING_VALUE | "" => None,
        v => Some(v.parse::<f64>().map_err(|_| ParseError::InvalidValue {
            date,
            value: raw.value.clone(),
        })?),
    };

    Ok(Observation::new(date, value))
}

/// Extracts the message from a FRED error body, if it is one.
pub(crate) fn parse_error_message(data: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorDocument>(data)
        .ok()
        .map(|doc| doc.error_message)
}
