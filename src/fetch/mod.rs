//! Network sources. Requests are issued one at a time with a fixed pause
//! between them; a failed request is logged and skipped, never retried.

pub mod error;
pub mod historical;
pub mod open_data;

use crate::fetch::error::FetchError;
use log::warn;
use reqwest::{Client, Response};

/// Sends a GET request and turns non-success statuses into errors.
pub(crate) async fn get_checked(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<Response, FetchError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| FetchError::NetworkRequest(url.to_string(), e.without_url()))?;

    // Query strings may carry credentials; keep them out of errors and logs.
    response.error_for_status().map_err(|e| {
        let e = e.without_url();
        warn!("HTTP error for {}: {:?}", url, e);
        match e.status() {
            Some(status) => FetchError::HttpStatus {
                url: url.to_string(),
                status,
                source: e,
            },
            None => FetchError::NetworkRequest(url.to_string(), e),
        }
    })
}
