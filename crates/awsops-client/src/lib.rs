//! Typed wrappers over the AWS SDK clients used by the awsops tools.
//!
//! Each wrapper sits behind an `async_trait` seam ([`ZoneService`],
//! [`InstanceService`]) so the drivers in `awsops-cli` can be exercised
//! against in-memory fakes. Every call returns a typed
//! [`OpsError`](awsops_core::OpsError) instead of a broad catch-all, so
//! callers branch on explicit failure kinds.
//!
//! Authentication, signing, retries, and transport belong to the SDK and
//! are deliberately not re-implemented here.

mod config;
mod sdk;

pub mod dns;
pub mod ec2;
pub mod resolver;

pub use awsops_core::{OpsError, Result};
pub use config::{load_aws_config, region_name, DEFAULT_REGION};
pub use dns::{Route53Zones, ZoneService};
pub use ec2::{locate_by_name_tag, Ec2Instances, InstanceService};
pub use resolver::{resolve_zone_id, ZoneCache};
