use crate::error::FetchError;
use crate::parse::Document;

/// Fetches and parses a schema document from a URL.
///
/// One HTTP GET, no retry or backoff; the fetch is a one-shot external
/// collaborator outside the generator core.
pub fn fetch_document(url: &str) -> Result<Document, FetchError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let json: serde_json::Value = response.json()?;
    Ok(Document::from_json(json)?)
}
