//! Response normalization
//!
//! The reg.ru API is not consistent across its method families: the same logical
//! field shows up under different names (`service_type` / `servtype`,
//! `subname` / `subdomain`, ...) and identifiers arrive as strings, integers or
//! floats. The `Raw*` types accept every observed variant; their accessors
//! reduce them to one canonical value. Nothing outside this module sees the
//! wire shapes.

use serde::Deserialize;
use serde_json::Number;

use crate::error::{RegruError, Result};
use crate::types::{DnsRecord, RecordType, Zone};

const RESULT_SUCCESS: &str = "success";
const SERVICE_TYPE_DOMAIN: &str = "domain";

// ============ Scalars ============

/// A scalar the API sends either as a string or as a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(Number),
}

impl TextOrNumber {
    /// Canonical string form: text unchanged, numbers as their shortest exact
    /// decimal (`12345.0` becomes `"12345"`).
    fn canonical(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => canonical_number(n),
        }
    }
}

fn canonical_number(n: &Number) -> String {
    if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(f) = n.as_f64() {
        // f64's Display never emits an exponent or a trailing ".0".
        f.to_string()
    } else {
        n.to_string()
    }
}

/// Canonical id: absent and empty both map to `None`.
fn canonical_id(candidates: &[Option<&TextOrNumber>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|v| v.canonical())
        .find(|s| !s.is_empty())
}

/// First candidate that is present and non-empty.
fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().flatten().copied().find(|s| !s.is_empty())
}

// ============ Envelope ============

/// Fields shared by every API answer.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    error_code: Option<TextOrNumber>,
    #[serde(default)]
    error_text: Option<String>,
}

/// Checks a 2xx body for an envelope-level `error_text`.
///
/// Bodies that are not a JSON envelope pass; typed decoding reports them later
/// if the caller needs the content.
pub(crate) fn check_envelope(body: &str) -> Result<()> {
    let Ok(envelope) = serde_json::from_str::<Envelope>(body) else {
        return Ok(());
    };
    match envelope.error_text {
        Some(message) if !message.is_empty() => Err(RegruError::Api {
            code: envelope.error_code.map(|c| c.canonical()),
            message,
        }),
        _ => Ok(()),
    }
}

/// Generic `{ "answer": ... }` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    answer: Option<T>,
}

impl<T: Default> ApiResponse<T> {
    pub(crate) fn into_answer(self) -> T {
        self.answer.unwrap_or_default()
    }
}

// ============ Per-domain results ============

/// Result fields carried per domain in zone method answers.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DomainStatus {
    #[serde(default)]
    dname: Option<String>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error_code: Option<TextOrNumber>,
    #[serde(default)]
    error_text: Option<String>,
}

impl DomainStatus {
    pub(crate) fn dname(&self) -> &str {
        self.dname.as_deref().unwrap_or_default()
    }

    pub(crate) fn is_success(&self) -> bool {
        self.result.as_deref() == Some(RESULT_SUCCESS)
    }

    /// Fails when the API reported an error for this domain.
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        match self.error_text.as_deref() {
            Some(message) if !message.is_empty() => Err(RegruError::Api {
                code: self.error_code.as_ref().map(TextOrNumber::canonical),
                message: message.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

// ============ Add record ============

/// Answer of the `zone/add_*` methods.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddRecordAnswer {
    #[serde(default)]
    pub(crate) domains: Vec<AddRecordResult>,
}

/// One domain entry of an add answer.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddRecordResult {
    #[serde(flatten)]
    pub(crate) status: DomainStatus,
    #[serde(default)]
    dns_id: Option<TextOrNumber>,
    #[serde(default)]
    id: Option<TextOrNumber>,
}

impl AddRecordResult {
    /// Registrar-assigned record id, if reported.
    pub(crate) fn record_id(&self) -> Option<String> {
        canonical_id(&[self.dns_id.as_ref(), self.id.as_ref()])
    }
}

impl AddRecordAnswer {
    /// Entry reported for `zone`, if any.
    pub(crate) fn for_zone(&self, zone: &str) -> Option<&AddRecordResult> {
        self.domains.iter().find(|d| d.status.dname() == zone)
    }
}

// ============ Service listing ============

/// Answer of `service/get_list`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceListAnswer {
    #[serde(default)]
    pub(crate) services: Vec<RawService>,
}

/// One service of the account, in any of its historical spellings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawService {
    #[serde(default)]
    service_type: Option<String>,
    #[serde(default)]
    servtype: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    dname: Option<String>,
    #[serde(default)]
    service_id: Option<TextOrNumber>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl RawService {
    pub(crate) fn service_type(&self) -> Option<&str> {
        first_non_empty(&[self.service_type.as_deref(), self.servtype.as_deref()])
    }

    pub(crate) fn name(&self) -> Option<&str> {
        first_non_empty(&[self.domain.as_deref(), self.dname.as_deref()])
    }

    pub(crate) fn id(&self) -> Option<String> {
        canonical_id(&[self.service_id.as_ref()])
    }

    pub(crate) fn is_domain(&self) -> bool {
        self.service_type() == Some(SERVICE_TYPE_DOMAIN)
    }

    /// Canonical zone for this service.
    pub(crate) fn to_zone(&self) -> Zone {
        Zone {
            id: self.id().unwrap_or_default(),
            name: self.name().unwrap_or_default().to_string(),
            name_servers: Vec::new(),
            status: first_non_empty(&[self.state.as_deref(), self.status.as_deref()])
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl ServiceListAnswer {
    /// Zones of every `domain` service, in listing order.
    pub(crate) fn into_zones(self) -> Vec<Zone> {
        self.services
            .iter()
            .filter(|s| s.is_domain())
            .map(RawService::to_zone)
            .collect()
    }
}

// ============ Resource records ============

/// Answer of `zone/get_resource_records`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResourceRecordsAnswer {
    #[serde(default)]
    pub(crate) domains: Vec<RawZoneRecords>,
}

/// Records of one zone.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawZoneRecords {
    #[serde(flatten)]
    pub(crate) status: DomainStatus,
    #[serde(default)]
    rrs: Vec<RawResourceRecord>,
}

/// One resource record, in any of its historical spellings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawResourceRecord {
    #[serde(default)]
    subname: Option<String>,
    #[serde(default)]
    subdomain: Option<String>,
    #[serde(default)]
    rectype: Option<String>,
    #[serde(default, rename = "type")]
    record_type: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    prio: Option<TextOrNumber>,
    #[serde(default)]
    ttl: Option<TextOrNumber>,
    #[serde(default)]
    dns_id: Option<TextOrNumber>,
    #[serde(default)]
    id: Option<TextOrNumber>,
}

impl RawResourceRecord {
    pub(crate) fn name(&self) -> Option<&str> {
        first_non_empty(&[self.subname.as_deref(), self.subdomain.as_deref()])
    }

    pub(crate) fn record_type(&self) -> Option<&str> {
        first_non_empty(&[self.rectype.as_deref(), self.record_type.as_deref()])
    }

    /// TTL if the endpoint exposes one; `0` otherwise.
    pub(crate) fn ttl(&self) -> u32 {
        self.ttl
            .as_ref()
            .and_then(|t| t.canonical().parse().ok())
            .unwrap_or(0)
    }

    /// Record value; MX rows get their `prio` back as a `"<prio> <host>"`
    /// prefix unless the content already carries one.
    fn content(&self, record_type: RecordType) -> String {
        let content = self.content.clone().unwrap_or_default();
        if record_type != RecordType::Mx || has_priority_prefix(&content) {
            return content;
        }
        match self.prio.as_ref().map(TextOrNumber::canonical) {
            Some(prio) if !prio.is_empty() && !content.is_empty() => format!("{prio} {content}"),
            _ => content,
        }
    }

    /// Canonical record, or `None` for types outside [`RecordType`].
    pub(crate) fn to_record(&self) -> Option<DnsRecord> {
        let raw_type = self.record_type()?;
        let record_type = match raw_type.parse::<RecordType>() {
            Ok(t) => t,
            Err(e) => {
                log::debug!("[regru] Skipping record '{}': {e}", self.name().unwrap_or("?"));
                return None;
            }
        };
        Some(DnsRecord {
            name: self.name().unwrap_or_default().to_string(),
            record_type,
            content: self.content(record_type),
            ttl: self.ttl(),
            id: canonical_id(&[self.dns_id.as_ref(), self.id.as_ref()]),
            proxied: false,
        })
    }
}

fn has_priority_prefix(content: &str) -> bool {
    content
        .split_once(char::is_whitespace)
        .is_some_and(|(head, _)| head.parse::<u16>().is_ok())
}

impl ResourceRecordsAnswer {
    /// Canonical records of `zone`, in listing order.
    pub(crate) fn into_records(self, zone: &str) -> Result<Vec<DnsRecord>> {
        let mut records = Vec::new();
        for domain in self.domains.iter().filter(|d| d.status.dname() == zone) {
            domain.status.check()?;
            records.extend(domain.rrs.iter().filter_map(RawResourceRecord::to_record));
        }
        Ok(records)
    }
}
