//! Listings API response schema and success classification.
//!
//! The API wraps everything in a top-level `response` object. Whether a search
//! succeeded is signalled by `application_response_code`: codes whose first
//! character is `'1'` are the success class, anything else is a failure.

use crate::model::error::FetchError;
use crate::model::listing::{lenient_count, Listing};
use serde::Deserialize;
use serde_json::Value;

/// Top-level JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchResponse,
}

/// The nested `response` object.
///
/// `application_response_code` is kept as a raw JSON value so that a missing
/// or oddly-typed code lands on the failure path instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub application_response_code: Option<Value>,

    #[serde(default)]
    pub application_response_text: Option<String>,

    #[serde(default)]
    pub listings: Vec<Listing>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_results: Option<u32>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub total_pages: Option<u32>,
}

impl SearchResponse {
    pub fn classify(&self) -> ResponseClass {
        classify(self.application_response_code.as_ref())
    }
}

/// Outcome class of a search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    /// Carries the code as text, if there was a usable one.
    Failure { code: Option<String> },
}

/// Classify an `application_response_code`.
///
/// Only a JSON string starting with `'1'` is a success. Numbers, empty
/// strings, null and a missing field are failures.
pub fn classify(code: Option<&Value>) -> ResponseClass {
    match code {
        Some(Value::String(code)) if code.starts_with('1') => ResponseClass::Success,
        Some(Value::String(code)) if !code.is_empty() => ResponseClass::Failure {
            code: Some(code.clone()),
        },
        Some(Value::Number(n)) => ResponseClass::Failure {
            code: Some(n.to_string()),
        },
        _ => ResponseClass::Failure { code: None },
    }
}

/// Decode a response body into the inner `response` object.
///
/// # Errors
///
/// Returns `FetchError::Parse` for invalid JSON, a missing `response` object,
/// or fields of the wrong shape (e.g. `listings` not being an array).
pub fn parse_search_body(body: &str) -> Result<SearchResponse, FetchError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    Ok(envelope.response)
}
