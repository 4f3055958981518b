//! Route53 call wrappers.

use async_trait::async_trait;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch as SdkChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use tracing::debug;

use awsops_core::{ChangeBatch, ChangeReceipt, OpsError, Result, ZoneSummary};

use crate::sdk::map_sdk_err;

/// The calls the upload driver needs from the DNS service.
///
/// [`Route53Zones`] implements this against real AWS; tests drive the
/// uploader with in-memory fakes instead.
#[async_trait]
pub trait ZoneService {
    /// List every hosted zone visible to the caller's credentials
    async fn list_zones(&self) -> Result<Vec<ZoneSummary>>;

    /// Apply one change batch to a hosted zone
    async fn apply_change(&self, zone_id: &str, batch: &ChangeBatch) -> Result<ChangeReceipt>;
}

/// Route53-backed implementation of [`ZoneService`]
#[derive(Clone)]
pub struct Route53Zones {
    inner: aws_sdk_route53::Client,
}

impl Route53Zones {
    /// Create a wrapper from shared AWS configuration
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            inner: aws_sdk_route53::Client::new(config),
        }
    }
}

/// Strip the `/hostedzone/` prefix the API puts in front of zone IDs
fn bare_zone_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

#[async_trait]
impl ZoneService for Route53Zones {
    async fn list_zones(&self) -> Result<Vec<ZoneSummary>> {
        // One page only, matching the original tool. Zones beyond the
        // first page are invisible to the resolver.
        let response = self
            .inner
            .list_hosted_zones()
            .send()
            .await
            .map_err(|e| map_sdk_err("list-hosted-zones", &e))?;

        let zones = response
            .hosted_zones()
            .iter()
            .map(|zone| ZoneSummary {
                id: bare_zone_id(zone.id()).to_string(),
                name: zone.name().to_string(),
            })
            .collect();

        Ok(zones)
    }

    async fn apply_change(&self, zone_id: &str, batch: &ChangeBatch) -> Result<ChangeReceipt> {
        let sdk_batch = to_sdk_batch(batch)?;
        debug!(zone_id, fqdn = batch.fqdn(), "submitting change batch");

        let response = self
            .inner
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(sdk_batch)
            .send()
            .await
            .map_err(|e| map_sdk_err("change-resource-record-sets", &e))?;

        Ok(ChangeReceipt {
            change_id: response.change_info().map(|info| info.id().to_string()),
        })
    }
}

/// Map the pure batch model onto the SDK's builder types
fn to_sdk_batch(batch: &ChangeBatch) -> Result<SdkChangeBatch> {
    let mut changes = Vec::with_capacity(batch.changes.len());

    for change in &batch.changes {
        let set = &change.resource_record_set;

        let mut records = Vec::with_capacity(set.resource_records.len());
        for record in &set.resource_records {
            records.push(
                ResourceRecord::builder()
                    .value(&record.value)
                    .build()
                    .map_err(|e| OpsError::BuildRequest(e.to_string()))?,
            );
        }

        let record_set = ResourceRecordSet::builder()
            .name(&set.name)
            .r#type(RrType::from(set.record_type.as_str()))
            .ttl(i64::from(set.ttl))
            .set_resource_records(Some(records))
            .build()
            .map_err(|e| OpsError::BuildRequest(e.to_string()))?;

        changes.push(
            Change::builder()
                .action(ChangeAction::Upsert)
                .resource_record_set(record_set)
                .build()
                .map_err(|e| OpsError::BuildRequest(e.to_string()))?,
        );
    }

    SdkChangeBatch::builder()
        .set_changes(Some(changes))
        .build()
        .map_err(|e| OpsError::BuildRequest(e.to_string()))
}
