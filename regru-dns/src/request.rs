//! Request shaping
//!
//! Every zone method of the reg.ru API expects a slightly different payload:
//! A/AAAA records carry their value as `ipaddr`, CNAME as `canonical_name`, MX
//! as `mail_server`, and so on. This module hides that behind one signature per
//! operation. The record type decides the endpoint and the payload shape through
//! exhaustive `match`es, so a new [`RecordType`] cannot compile without a route.
//!
//! Credentials are not part of these payloads; they are attached by the HTTP
//! layer right before encoding.

use serde::Serialize;

use crate::error::{RegruError, Result};
use crate::types::{CreateDnsRecordParams, DnsRecord, RecordType};

/// Endpoint for removing records of any type.
pub const REMOVE_RECORD_PATH: &str = "zone/remove_record";
/// Endpoint for the account service listing.
pub const SERVICE_LIST_PATH: &str = "service/get_list";
/// Endpoint for a zone's resource records.
pub const RESOURCE_RECORDS_PATH: &str = "zone/get_resource_records";
/// Endpoint that only checks authentication.
pub const NOP_PATH: &str = "nop";

/// Page size used for the service listing; large enough to avoid paging.
pub const MAX_PAGE_SIZE: u32 = 1000;

impl RecordType {
    /// API path of the method that adds records of this type.
    pub fn add_path(self) -> &'static str {
        match self {
            Self::A => "zone/add_alias",
            Self::Aaaa => "zone/add_aaaa",
            Self::Cname => "zone/add_cname",
            Self::Mx => "zone/add_mx",
            Self::Ns => "zone/add_ns",
            Self::Txt => "zone/add_txt",
        }
    }
}

/// An endpoint path paired with the payload to send there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRequest<P> {
    /// Path relative to the API base URL.
    pub path: &'static str,
    /// Payload, without credentials.
    pub payload: P,
}

/// Zone reference inside the `domains` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRef {
    /// Zone name.
    pub dname: String,
}

impl DomainRef {
    fn list(zone: &str) -> Vec<Self> {
        vec![Self {
            dname: zone.to_string(),
        }]
    }
}

/// Type-specific value fields of an add request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    /// A and AAAA records.
    Address {
        /// IPv4 or IPv6 address.
        ipaddr: String,
    },
    /// CNAME records.
    Alias {
        /// Target host name.
        canonical_name: String,
    },
    /// MX records.
    Mail {
        /// Mail server host name.
        mail_server: String,
        /// Preference, when the content carried one.
        #[serde(skip_serializing_if = "Option::is_none")]
        priority: Option<u16>,
    },
    /// NS records.
    NameServer {
        /// Name server host name.
        dns_server: String,
    },
    /// TXT records.
    Text {
        /// Text value.
        text: String,
    },
}

impl RecordValue {
    /// Shapes `content` into the value fields expected for `record_type`.
    pub fn new(record_type: RecordType, content: &str) -> Self {
        match record_type {
            RecordType::A | RecordType::Aaaa => Self::Address {
                ipaddr: content.to_string(),
            },
            RecordType::Cname => Self::Alias {
                canonical_name: content.to_string(),
            },
            RecordType::Mx => {
                let (priority, mail_server) = split_mx_content(content);
                Self::Mail {
                    mail_server: mail_server.to_string(),
                    priority,
                }
            }
            RecordType::Ns => Self::NameServer {
                dns_server: content.to_string(),
            },
            RecordType::Txt => Self::Text {
                text: content.to_string(),
            },
        }
    }
}

/// Payload of the `zone/add_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddRecordPayload {
    /// Target zone.
    pub domains: Vec<DomainRef>,
    /// Record name relative to the zone.
    pub subdomain: String,
    /// Type-specific value fields.
    #[serde(flatten)]
    pub value: RecordValue,
    /// TTL, only sent when positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Payload of `zone/remove_record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveRecordPayload {
    /// Target zone.
    pub domains: Vec<DomainRef>,
    /// Record name relative to the zone.
    pub subdomain: String,
    /// Record value; only records with exactly this value are removed.
    pub content: String,
    /// Record type.
    pub record_type: RecordType,
}

/// Payload of `service/get_list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceListPayload {
    /// Service type filter.
    pub servtype: &'static str,
    /// Page size.
    pub page_size: u32,
}

/// Payload of `zone/get_resource_records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecordsPayload {
    /// Zones to list.
    pub domains: Vec<DomainRef>,
}

/// Payload of `nop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyPayload {}

/// Shapes an add request for `params` in `zone`.
pub fn build_create_request(
    zone: &str,
    params: &CreateDnsRecordParams,
) -> Result<ShapedRequest<AddRecordPayload>> {
    require_non_empty("zone", zone)?;
    require_non_empty("name", &params.name)?;
    require_non_empty("content", &params.content)?;

    Ok(ShapedRequest {
        path: params.record_type.add_path(),
        payload: AddRecordPayload {
            domains: DomainRef::list(zone),
            subdomain: params.name.clone(),
            value: RecordValue::new(params.record_type, &params.content),
            ttl: (params.ttl > 0).then_some(params.ttl),
        },
    })
}

/// Shapes a removal request for `record` in `zone`.
///
/// Removal goes through the single `zone/remove_record` method for every type,
/// addressed by name, content and explicit type.
pub fn build_delete_request(
    zone: &str,
    record: &DnsRecord,
) -> Result<ShapedRequest<RemoveRecordPayload>> {
    require_non_empty("zone", zone)?;
    require_non_empty("name", &record.name)?;
    require_non_empty("content", &record.content)?;

    Ok(ShapedRequest {
        path: REMOVE_RECORD_PATH,
        payload: RemoveRecordPayload {
            domains: DomainRef::list(zone),
            subdomain: record.name.clone(),
            content: record.content.clone(),
            record_type: record.record_type,
        },
    })
}

/// Shapes the account-wide domain service listing.
pub fn build_list_zones_request() -> ShapedRequest<ServiceListPayload> {
    ShapedRequest {
        path: SERVICE_LIST_PATH,
        payload: ServiceListPayload {
            servtype: "domain",
            page_size: MAX_PAGE_SIZE,
        },
    }
}

/// Shapes the no-op call used to check credentials.
pub fn build_nop_request() -> ShapedRequest<EmptyPayload> {
    ShapedRequest {
        path: NOP_PATH,
        payload: EmptyPayload {},
    }
}

/// Shapes the resource record listing for `zone`.
pub fn build_list_records_request(zone: &str) -> Result<ShapedRequest<ResourceRecordsPayload>> {
    require_non_empty("zone", zone)?;
    Ok(ShapedRequest {
        path: RESOURCE_RECORDS_PATH,
        payload: ResourceRecordsPayload {
            domains: DomainRef::list(zone),
        },
    })
}

/// Splits `"10 mail.example.com"` into `(Some(10), "mail.example.com")`.
/// Anything else is returned whole as the host.
fn split_mx_content(content: &str) -> (Option<u16>, &str) {
    let trimmed = content.trim();
    if let Some((head, tail)) = trimmed.split_once(char::is_whitespace) {
        let host = tail.trim_start();
        if let Ok(priority) = head.parse::<u16>() {
            if !host.is_empty() {
                return (Some(priority), host);
            }
        }
    }
    (None, trimmed)
}

fn require_non_empty(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegruError::invalid_parameter(param, "must not be empty"));
    }
    Ok(())
}
