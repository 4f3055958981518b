//! Shared AWS configuration assembly.

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Fallback region when neither the CLI nor the environment supplies one
pub const DEFAULT_REGION: &str = "us-west-2";

/// Load shared AWS configuration for both tools.
///
/// Region resolution order: explicit `region` argument, then the SDK's
/// default provider chain (`AWS_REGION`, profile configuration), then
/// [`DEFAULT_REGION`]. The named `profile` is handed to the SDK untouched.
pub async fn load_aws_config(region: Option<String>, profile: Option<String>) -> SdkConfig {
    let region_provider = RegionProviderChain::first_try(region.map(Region::new))
        .or_default_provider()
        .or_else(Region::new(DEFAULT_REGION));

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }

    loader.load().await
}

/// The effective region of a loaded configuration, for console display
#[must_use]
pub fn region_name(config: &SdkConfig) -> String {
    config
        .region()
        .map_or_else(|| DEFAULT_REGION.to_string(), ToString::to_string)
}
