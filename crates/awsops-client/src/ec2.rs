//! EC2 call wrappers and the instance locator.

use async_trait::async_trait;
use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_sdk_ec2::operation::RequestId;
use aws_sdk_ec2::types::{Filter, Instance, SummaryStatus};
use tracing::debug;

use awsops_core::{InstanceState, InstanceSummary, OpsError, RebootReceipt, Result};

use crate::sdk::map_sdk_err;

/// States the locator asks the provider to filter on. Terminated and
/// shutting-down instances never count as tag matches.
const ACTIVE_STATES: &[&str] = &["pending", "running", "stopping", "stopped"];

/// The calls the reboot driver needs from the compute service.
///
/// [`Ec2Instances`] implements this against real AWS; tests drive the
/// driver with in-memory fakes instead.
#[async_trait]
pub trait InstanceService {
    /// Describe one instance by ID
    async fn describe(&self, instance_id: &str) -> Result<InstanceSummary>;

    /// List instances carrying the given Name tag, active states only
    async fn by_name_tag(&self, name: &str) -> Result<Vec<InstanceSummary>>;

    /// Issue a reboot for one instance
    async fn reboot(&self, instance_id: &str) -> Result<RebootReceipt>;

    /// Whether the instance currently passes its status checks
    async fn status_ok(&self, instance_id: &str) -> Result<bool>;
}

/// EC2-backed implementation of [`InstanceService`]
#[derive(Clone)]
pub struct Ec2Instances {
    inner: aws_sdk_ec2::Client,
}

impl Ec2Instances {
    /// Create a wrapper from shared AWS configuration
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            inner: aws_sdk_ec2::Client::new(config),
        }
    }
}

/// Flatten one SDK instance into the summary the drivers work with
fn summarize(instance: &Instance) -> InstanceSummary {
    let state = instance
        .state()
        .and_then(|s| s.name())
        .map_or(InstanceState::Unknown, |name| {
            InstanceState::parse(name.as_str())
        });

    let name_tag = instance.tags().iter().find_map(|tag| {
        (tag.key() == Some("Name")).then(|| tag.value().unwrap_or_default().to_string())
    });

    InstanceSummary {
        instance_id: instance.instance_id().unwrap_or_default().to_string(),
        state,
        name_tag,
    }
}

#[async_trait]
impl InstanceService for Ec2Instances {
    async fn describe(&self, instance_id: &str) -> Result<InstanceSummary> {
        let response = match self
            .inner
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
        {
            Ok(response) => response,
            // A malformed or unknown ID comes back as an error, not an
            // empty reservation list.
            Err(err) if err.code().is_some_and(|c| c.starts_with("InvalidInstanceID")) => {
                return Err(OpsError::InstanceNotFound {
                    name: instance_id.to_string(),
                });
            }
            Err(err) => return Err(map_sdk_err("describe-instances", &err)),
        };

        response
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .next()
            .map(summarize)
            .ok_or_else(|| OpsError::InstanceNotFound {
                name: instance_id.to_string(),
            })
    }

    async fn by_name_tag(&self, name: &str) -> Result<Vec<InstanceSummary>> {
        let tag_filter = Filter::builder().name("tag:Name").values(name).build();
        let state_filter = Filter::builder()
            .name("instance-state-name")
            .set_values(Some(
                ACTIVE_STATES.iter().map(ToString::to_string).collect(),
            ))
            .build();

        let response = self
            .inner
            .describe_instances()
            .filters(tag_filter)
            .filters(state_filter)
            .send()
            .await
            .map_err(|e| map_sdk_err("describe-instances", &e))?;

        Ok(response
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .map(summarize)
            .collect())
    }

    async fn reboot(&self, instance_id: &str) -> Result<RebootReceipt> {
        debug!(instance_id, "issuing reboot");

        let response = self
            .inner
            .reboot_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| map_sdk_err("reboot-instances", &e))?;

        Ok(RebootReceipt {
            request_id: response.request_id().map(ToString::to_string),
        })
    }

    async fn status_ok(&self, instance_id: &str) -> Result<bool> {
        let response = self
            .inner
            .describe_instance_status()
            .instance_ids(instance_id)
            .include_all_instances(true)
            .send()
            .await
            .map_err(|e| map_sdk_err("describe-instance-status", &e))?;

        let ok = response
            .instance_statuses()
            .first()
            .and_then(|status| status.instance_status())
            .and_then(|summary| summary.status())
            .is_some_and(|status| matches!(status, SummaryStatus::Ok));

        Ok(ok)
    }
}

/// Resolve a Name tag to exactly one instance ID.
///
/// Zero matches and multiple matches are both failures: with several
/// candidates the operator must disambiguate with a specific instance ID;
/// the locator never guesses.
pub async fn locate_by_name_tag<S: InstanceService + ?Sized>(
    service: &S,
    name: &str,
) -> Result<String> {
    let matches = service.by_name_tag(name).await?;

    match matches.as_slice() {
        [] => Err(OpsError::InstanceNotFound {
            name: name.to_string(),
        }),
        [only] => Ok(only.instance_id.clone()),
        many => Err(OpsError::AmbiguousInstance {
            name: name.to_string(),
            candidates: many.iter().map(|i| i.instance_id.clone()).collect(),
        }),
    }
}
