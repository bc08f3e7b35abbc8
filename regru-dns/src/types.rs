use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegruError;

// ============ DNS Record Types ============

/// DNS record type supported by the reg.ru zone API.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.). Parsing any
/// other string fails with [`RegruError::UnsupportedRecordType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Text record.
    Txt,
}

impl RecordType {
    /// All supported record types.
    pub const ALL: [Self; 6] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Txt,
    ];

    /// Wire representation of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = RegruError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "TXT" => Ok(Self::Txt),
            _ => Err(RegruError::UnsupportedRecordType {
                record_type: s.to_string(),
            }),
        }
    }
}

// ============ Records ============

/// A DNS record in a zone.
///
/// Records are matched by `(name, record_type)`: listings from the registrar do
/// not reliably carry an `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record name relative to the zone (e.g., `"www"` or `"@"` for apex).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record value (e.g., `"192.0.2.1"` or `"10 mail.example.com"`).
    pub content: String,
    /// Time to live in seconds; `0` when unknown.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ttl: u32,
    /// Registrar-assigned identifier, if one has been reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Kept for parity with other DNS APIs; always `false` for reg.ru.
    #[serde(default)]
    pub proxied: bool,
}

/// Parameters for creating a DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDnsRecordParams {
    /// Record name relative to the zone.
    pub name: String,
    /// Record type; selects the API endpoint and payload shape.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record value. MX values may carry a priority prefix (`"10 mail.example.com"`).
    pub content: String,
    /// Time to live in seconds; `0` leaves the registrar default.
    #[serde(default)]
    pub ttl: u32,
}

/// New values for [`update_record`](crate::DnsProvider::update_record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDnsRecordParams {
    /// New record value.
    pub content: String,
    /// New TTL in seconds; `0` leaves the registrar default.
    #[serde(default)]
    pub ttl: u32,
}

/// Parameters for listing DNS records.
///
/// Every field is optional. Empty strings count as "not specified".
///
/// # Default
///
/// No zone and no filters; a zone must be set before listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDnsRecordsParams {
    /// Zone (domain) name to list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    /// Zone identifier; used as the zone name when `zone_name` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Keep only records with exactly this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Keep only records of this type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
}

impl ListDnsRecordsParams {
    /// Parameters listing every record of `zone`.
    pub fn for_zone(zone: impl Into<String>) -> Self {
        Self {
            zone_name: Some(zone.into()),
            ..Self::default()
        }
    }

    /// Keep only records named `name`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Keep only records of `record_type`.
    #[must_use]
    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Zone to query: `zone_name`, falling back to `zone_id`.
    pub fn zone(&self) -> Option<&str> {
        non_empty(self.zone_name.as_deref()).or_else(|| non_empty(self.zone_id.as_deref()))
    }

    /// Name filter, if set and non-empty.
    pub fn name_filter(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Whether `record` passes the name and type filters.
    pub fn accepts(&self, record: &DnsRecord) -> bool {
        self.name_filter().is_none_or(|name| record.name == name)
            && self.record_type.is_none_or(|t| record.record_type == t)
    }
}

// ============ Zones ============

/// A DNS zone (domain) managed by the registrar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Registrar service identifier.
    pub id: String,
    /// Domain name.
    pub name: String,
    /// Authoritative name servers, when the listing exposes them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
    /// Service state as reported by the registrar; empty if not reported.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
