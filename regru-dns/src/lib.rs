//! # regru-dns
//!
//! Client library for the DNS zone methods of the [reg.ru](https://www.reg.ru/)
//! registrar API (v2).
//!
//! It exposes a small domain model (zones and A, AAAA, CNAME, MX, NS, TXT
//! records) and translates it to reg.ru's form-encoded JSON-over-HTTPS calls,
//! normalizing the registrar's inconsistent answers on the way back.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! regru-dns = { version = "0.1", default-features = false, features = ["rustls"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use regru_dns::{
//!     CreateDnsRecordParams, DnsProvider, ListDnsRecordsParams, RecordType, RegruClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a client (or `RegruClient::from_env()`)
//!     let client = RegruClient::new("test", "test")?;
//!
//!     // 2. List domain zones
//!     for zone in client.list_zones().await? {
//!         println!("{} ({})", zone.name, zone.id);
//!     }
//!
//!     // 3. Create a record
//!     let params = CreateDnsRecordParams {
//!         name: "www".to_string(),
//!         record_type: RecordType::A,
//!         content: "192.0.2.1".to_string(),
//!         ttl: 3600,
//!     };
//!     client.create_record("example.com", &params).await?;
//!
//!     // 4. List A records
//!     let records = client
//!         .list_records(&ListDnsRecordsParams::for_zone("example.com").with_type(RecordType::A))
//!         .await?;
//!     for record in &records {
//!         println!("{} {} -> {}", record.name, record.record_type, record.content);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, RegruError>`](RegruError).
//! [`RegruError::kind`] sorts failures into transport failures, business errors
//! reported by reg.ru, local validation failures, not-found results,
//! cancellation and decode failures:
//!
//! - [`RegruError::Http`]: non-2xx status, with the literal response body
//! - [`RegruError::Api`]: the API answered with an `error_text`
//! - [`RegruError::InvalidParameter`]: input rejected before any request
//! - [`RegruError::RecordNotFound`] / [`RegruError::ZoneNotFound`]
//!
//! Nothing is retried.
//!
//! ## Cancellation
//!
//! Dropping an operation's future abandons the in-flight request. For a
//! handle that stops on a shared signal, attach a token:
//!
//! ```rust,no_run
//! # use regru_dns::*;
//! # use tokio_util::sync::CancellationToken;
//! # async fn example(client: RegruClient) -> Result<()> {
//! let token = CancellationToken::new();
//! let scoped = client.with_cancellation(token.clone());
//! token.cancel();
//! assert!(matches!(scoped.list_zones().await, Err(RegruError::Cancelled)));
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http_client;
mod provider;
pub mod request;
mod response;
pub mod transport;
mod types;
mod utils;

// Re-export error types
pub use error::{ErrorKind, RegruError, Result};

// Re-export client and configuration
pub use client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, RegruClient, RegruClientBuilder,
};

// Re-export core trait
pub use provider::DnsProvider;

pub use request::MAX_PAGE_SIZE;
pub use transport::{
    DEFAULT_CONNECT_TIMEOUT_SECS, HttpRequest, HttpResponse, ReqwestTransport, Transport,
};

// Re-export types
pub use types::{
    CreateDnsRecordParams, DnsRecord, ListDnsRecordsParams, RecordType, UpdateDnsRecordParams,
    Zone,
};

// Re-export utils module
pub use utils::log_sanitizer;
