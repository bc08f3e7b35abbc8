use serde::{Deserialize, Serialize};

/// Error category, for callers that branch on the kind of failure rather than
/// on a specific variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The HTTP round trip itself failed (non-2xx, network, timeout).
    Transport,
    /// The API answered 2xx but reported a logical failure.
    Business,
    /// Local input was rejected before any request was sent.
    Validation,
    /// A lookup over a successful listing found nothing.
    NotFound,
    /// The caller cancelled the operation.
    Cancelled,
    /// A payload could not be encoded or a response could not be decoded.
    Decode,
}

/// Unified error type for all reg.ru client operations.
///
/// Every variant is serializable for structured error reporting. Use
/// [`kind()`](Self::kind) to classify an error without matching on variants.
///
/// No variant is ever retried internally: a failed call is returned to the
/// caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RegruError {
    /// The API responded with a non-2xx HTTP status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The request did not complete before the configured timeout.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The operation was cancelled through the client's cancellation token.
    Cancelled,

    /// The API answered successfully at the HTTP level but the envelope
    /// carried a non-empty `error_text`.
    Api {
        /// Machine-readable `error_code`, if the API sent one.
        #[serde(rename = "error_code", default)]
        code: Option<String>,
        /// The `error_text` exactly as returned by the API.
        message: String,
    },

    /// The DNS record type is outside the supported set (A, AAAA, CNAME, MX, NS, TXT).
    UnsupportedRecordType {
        /// The rejected record type string.
        record_type: String,
    },

    /// A request parameter or client setting is invalid.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// No record with the requested name exists in the zone.
    RecordNotFound {
        /// Name that was searched for.
        name: String,
    },

    /// No zone with the requested identifier exists in the account.
    ZoneNotFound {
        /// Identifier that was searched for.
        zone_id: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request payload.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl RegruError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http { .. } | Self::NetworkError { .. } | Self::Timeout { .. } => {
                ErrorKind::Transport
            }
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Api { .. } => ErrorKind::Business,
            Self::UnsupportedRecordType { .. } | Self::InvalidParameter { .. } => {
                ErrorKind::Validation
            }
            Self::RecordNotFound { .. } | Self::ZoneNotFound { .. } => ErrorKind::NotFound,
            Self::ParseError { .. } | Self::SerializationError { .. } => ErrorKind::Decode,
        }
    }

    /// Whether the error stems from expected conditions (bad input, missing
    /// resources, remote business errors) rather than a failure. Log these at
    /// `warn`, the rest at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Business | ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Cancelled
        )
    }

    pub(crate) fn invalid_parameter(param: &str, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn parse_error(detail: impl ToString) -> Self {
        Self::ParseError {
            detail: detail.to_string(),
        }
    }
}

impl std::fmt::Display for RegruError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, body } => {
                write!(f, "[regru] API returned status {status}: {body}")
            }
            Self::NetworkError { detail } => write!(f, "[regru] Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "[regru] Request timeout: {detail}"),
            Self::Cancelled => write!(f, "[regru] Request cancelled"),
            Self::Api { code, message } => {
                if let Some(code) = code {
                    write!(f, "[regru] API error {code}: {message}")
                } else {
                    write!(f, "[regru] API error: {message}")
                }
            }
            Self::UnsupportedRecordType { record_type } => {
                write!(f, "[regru] Unsupported record type: {record_type}")
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "[regru] Invalid parameter '{param}': {detail}")
            }
            Self::RecordNotFound { name } => write!(f, "[regru] Record '{name}' not found"),
            Self::ZoneNotFound { zone_id } => write!(f, "[regru] Zone '{zone_id}' not found"),
            Self::ParseError { detail } => write!(f, "[regru] Parse error: {detail}"),
            Self::SerializationError { detail } => {
                write!(f, "[regru] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for RegruError {}

/// Convenience type alias for `Result<T, RegruError>`.
pub type Result<T> = std::result::Result<T, RegruError>;
