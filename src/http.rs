//! Shared helpers for the gateway and backend HTTP clients

use crate::{Error, Result};
use reqwest::Response;
use tracing::warn;

/// Join a base address and an absolute API path
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Turn a non-2xx response into [`Error::Status`]
///
/// The body of a failed response is discarded.
pub(crate) fn ensure_success(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("{} failed with status {}", endpoint, status);
    Err(Error::Status {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
    })
}
