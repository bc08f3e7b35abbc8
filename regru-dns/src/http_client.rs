//! Generic HTTP round trip
//!
//! One call against the reg.ru API: encode, send through the [`Transport`],
//! classify the outcome.
//!
//! # Wire format
//! Every method is a form-encoded POST (`application/x-www-form-urlencoded`):
//! `username`, `password`, `input_format=json`, `output_content_type=plain`
//! and `input_data`, the JSON payload with the credentials flattened into it.
//!
//! # Classification
//! - transport failure or elapsed deadline: `NetworkError` / `Timeout`
//! - cancelled token: `Cancelled`
//! - non-2xx status: `Http { status, body }`
//! - 2xx with a non-empty `error_text`: `Api`
//!
//! Nothing is retried.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::{RegruError, Result};
use crate::response::check_envelope;
use crate::transport::{HttpRequest, Transport};
use crate::utils::log_sanitizer::{redact_for_log, truncate_for_log};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Account credentials, attached to a payload only while it is being encoded.
#[derive(Clone, Copy)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Serialize)]
struct Authenticated<'a, P> {
    username: &'a str,
    password: &'a str,
    #[serde(flatten)]
    payload: &'a P,
}

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Builds the form-encoded request for `path` carrying `payload`.
    pub fn build_request<P: Serialize>(
        base_url: &str,
        path: &str,
        credentials: Credentials<'_>,
        payload: &P,
    ) -> Result<HttpRequest> {
        let input_data = serde_json::to_string(&Authenticated {
            username: credentials.username,
            password: credentials.password,
            payload,
        })
        .map_err(|e| RegruError::SerializationError {
            detail: e.to_string(),
        })?;

        let body = encode_form(&[
            ("username", credentials.username),
            ("password", credentials.password),
            ("input_format", "json"),
            ("output_content_type", "plain"),
            ("input_data", &input_data),
        ]);

        log::debug!(
            "[regru] Request Body: {}",
            redact_for_log(&body, credentials.password)
        );

        Ok(HttpRequest {
            url: format!("{}/{}", base_url.trim_end_matches('/'), path),
            headers: vec![("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body,
        })
    }

    /// Sends `request` and returns the body of a successful answer.
    ///
    /// The deadline covers the whole exchange whatever the transport; `cancel`,
    /// when given, aborts the wait as soon as it fires.
    pub async fn execute_request(
        transport: &dyn Transport,
        request: HttpRequest,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
        path: &str,
    ) -> Result<String> {
        log::debug!("[regru] POST {path}");

        let call = tokio::time::timeout(timeout, transport.send(request));
        let outcome = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        log::debug!("[regru] {path} cancelled");
                        return Err(RegruError::Cancelled);
                    }
                    outcome = call => outcome,
                }
            }
            None => call.await,
        };

        let response = outcome.map_err(|_| RegruError::Timeout {
            detail: format!("no response within {}s", timeout.as_secs_f32()),
        })??;

        log::debug!("[regru] Response Status: {}", response.status);

        if !response.is_success() {
            log::warn!(
                "[regru] {path} returned HTTP {}: {}",
                response.status,
                truncate_for_log(&response.body)
            );
            return Err(RegruError::Http {
                status: response.status,
                body: response.body,
            });
        }

        log::debug!("[regru] Response Body: {}", truncate_for_log(&response.body));

        check_envelope(&response.body)?;
        Ok(response.body)
    }

    /// Parse JSON response
    pub fn parse_json<T: DeserializeOwned>(response_text: &str) -> Result<T> {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[regru] JSON parse failed: {e}");
            log::error!("[regru] Raw response: {}", truncate_for_log(response_text));
            RegruError::parse_error(e)
        })
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a form body back into pairs. Inverse of the encoding above.
#[cfg(test)]
pub(crate) fn decode_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter_map(|(k, v)| {
            Some((
                urlencoding::decode(k).ok()?.into_owned(),
                urlencoding::decode(v).ok()?.into_owned(),
            ))
        })
        .collect()
}
