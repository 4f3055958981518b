use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DNS record types accepted by the uploader.
///
/// Anything outside this set is skipped, not failed: the CSV may carry
/// rows for tooling this uploader does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Canonical name record
    Cname,
    /// Text record
    Txt,
    /// IPv4 address record
    A,
    /// IPv6 address record
    Aaaa,
    /// Mail exchange record
    Mx,
    /// Name server record
    Ns,
    /// Pointer record
    Ptr,
    /// Service locator record
    Srv,
    /// Start of authority record
    Soa,
}

impl RecordType {
    /// The record type as it appears on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Soa => "SOA",
        }
    }

    /// TXT records get provider-convention quoting applied to their values
    #[must_use]
    pub const fn is_txt(&self) -> bool {
        matches!(self, Self::Txt)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a record type is not in the supported set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedRecordType(pub String);

impl fmt::Display for UnsupportedRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported record type: {}", self.0)
    }
}

impl std::error::Error for UnsupportedRecordType {}

impl FromStr for RecordType {
    type Err = UnsupportedRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CNAME" => Ok(Self::Cname),
            "TXT" => Ok(Self::Txt),
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "PTR" => Ok(Self::Ptr),
            "SRV" => Ok(Self::Srv),
            "SOA" => Ok(Self::Soa),
            other => Err(UnsupportedRecordType(other.to_string())),
        }
    }
}

/// One validated CSV row, ready for batch construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    /// Environment tag (informational, carried through to the console)
    pub env: String,

    /// Zone name the record belongs to
    pub zone: String,

    /// DNS record type
    pub record_type: RecordType,

    /// Record name, relative or already fully qualified
    pub name: String,

    /// Record value, forwarded to the provider unvalidated
    pub value: String,

    /// Time-to-live in seconds
    pub ttl: u32,
}

/// One hosted zone as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// Provider-assigned zone ID, already stripped of the `/hostedzone/` prefix
    pub id: String,

    /// Zone name, with the provider's trailing dot
    pub name: String,
}

/// Receipt for a submitted change batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReceipt {
    /// Provider-assigned change ID, when the response carried one
    pub change_id: Option<String>,
}
