//! Change-batch construction.
//!
//! A change batch is the provider payload describing one record mutation.
//! Building one is a pure transformation over a CSV row: no I/O, no
//! validation of the record value itself. The serde field names match the
//! provider's payload shape so dry-run output reads like the real request.

use serde::Serialize;

use super::dns::{RecordRow, RecordType};

/// Provider mutation action. This tool only ever upserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeAction {
    /// Create-or-replace semantics for a record set
    #[serde(rename = "UPSERT")]
    Upsert,
}

/// A batch of record mutations applied atomically by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    /// The mutations in this batch. Exactly one in this design.
    pub changes: Vec<Change>,
}

/// A single record mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    /// What to do with the record set
    pub action: ChangeAction,

    /// The record set the action applies to
    pub resource_record_set: ResourceRecordSet,
}

/// The record set payload inside a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    /// Fully qualified record name with trailing dot
    pub name: String,

    /// DNS record type
    #[serde(rename = "Type")]
    pub record_type: RecordType,

    /// Time-to-live in seconds
    #[serde(rename = "TTL")]
    pub ttl: u32,

    /// The record values. Exactly one per batch in this design; rows are
    /// never merged into multi-value sets.
    pub resource_records: Vec<ResourceRecord>,
}

/// One value inside a record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    /// The raw record value as the provider should store it
    pub value: String,
}

/// Join a record name with its zone and terminate it with the provider's
/// trailing dot.
///
/// A name that already ends in the zone name is left alone, so fully
/// qualified input is not double-qualified.
#[must_use]
pub fn qualify(record_name: &str, zone_name: &str) -> String {
    let mut fqdn = if record_name.ends_with(zone_name) {
        record_name.to_string()
    } else {
        format!("{record_name}.{zone_name}")
    };

    if !fqdn.ends_with('.') {
        fqdn.push('.');
    }

    fqdn
}

impl ChangeBatch {
    /// Build the single-record upsert batch for one record.
    ///
    /// TXT values are wrapped in literal double quotes (provider convention
    /// for text records); every other type passes through verbatim. Values
    /// are not syntax-checked here, the provider is the sole validator.
    #[must_use]
    pub fn upsert(
        record_type: RecordType,
        record_name: &str,
        zone_name: &str,
        value: &str,
        ttl: u32,
    ) -> Self {
        let value = if record_type.is_txt() {
            format!("\"{value}\"")
        } else {
            value.to_string()
        };

        Self {
            changes: vec![Change {
                action: ChangeAction::Upsert,
                resource_record_set: ResourceRecordSet {
                    name: qualify(record_name, zone_name),
                    record_type,
                    ttl,
                    resource_records: vec![ResourceRecord { value }],
                },
            }],
        }
    }

    /// Build the batch for a validated CSV row
    #[must_use]
    pub fn from_row(row: &RecordRow) -> Self {
        Self::upsert(row.record_type, &row.name, &row.zone, &row.value, row.ttl)
    }

    /// The fully qualified name this batch targets
    #[must_use]
    pub fn fqdn(&self) -> &str {
        &self.changes[0].resource_record_set.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualify_joins_and_terminates() {
        assert_eq!(qualify("www", "example.com"), "www.example.com.");
    }

    #[test]
    fn qualify_keeps_existing_dot() {
        assert_eq!(qualify("www", "example.com."), "www.example.com.");
    }

    #[test]
    fn qualify_does_not_double_append_zone() {
        assert_eq!(qualify("www.example.com", "example.com"), "www.example.com.");
        assert_eq!(qualify("www.example.com.", "example.com."), "www.example.com.");
    }

    #[test]
    fn txt_value_is_quoted_once() {
        let batch = ChangeBatch::upsert(RecordType::Txt, "_verification", "example.com", "code-123", 300);
        let value = &batch.changes[0].resource_record_set.resource_records[0].value;
        assert_eq!(value, "\"code-123\"");
    }

    #[test]
    fn non_txt_value_passes_through() {
        for rt in [RecordType::Cname, RecordType::A, RecordType::Mx] {
            let batch = ChangeBatch::upsert(rt, "www", "example.com", "target.example.com", 60);
            let value = &batch.changes[0].resource_record_set.resource_records[0].value;
            assert_eq!(value, "target.example.com");
        }
    }

    #[test]
    fn upsert_builds_single_record_batch() {
        let batch = ChangeBatch::upsert(RecordType::Cname, "www", "example.com", "target.example.com", 300);
        assert_eq!(batch.changes.len(), 1);
        let set = &batch.changes[0].resource_record_set;
        assert_eq!(set.name, "www.example.com.");
        assert_eq!(set.record_type, RecordType::Cname);
        assert_eq!(set.ttl, 300);
        assert_eq!(set.resource_records.len(), 1);
    }

    #[test]
    fn batch_construction_is_deterministic() {
        let a = ChangeBatch::upsert(RecordType::Txt, "www", "example.com", "v", 300);
        let b = ChangeBatch::upsert(RecordType::Txt, "www", "example.com", "v", 300);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn serialized_shape_matches_provider_payload() {
        let batch = ChangeBatch::upsert(RecordType::Cname, "www", "example.com", "t.example.com", 300);
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["Changes"][0]["Action"], "UPSERT");
        assert_eq!(json["Changes"][0]["ResourceRecordSet"]["Name"], "www.example.com.");
        assert_eq!(json["Changes"][0]["ResourceRecordSet"]["Type"], "CNAME");
        assert_eq!(json["Changes"][0]["ResourceRecordSet"]["TTL"], 300);
        assert_eq!(
            json["Changes"][0]["ResourceRecordSet"]["ResourceRecords"][0]["Value"],
            "t.example.com"
        );
    }
}
