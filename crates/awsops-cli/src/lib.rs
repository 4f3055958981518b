//! Operator CLI tools for AWS: `r53up` (bulk Route53 record uploads from
//! CSV) and `ec2reboot` (reboot one EC2 instance by ID or Name tag).
//!
//! The binaries are thin shells over [`dns::run`] and [`ec2::run`]; all
//! decision logic lives in the driver modules, which are generic over the
//! service traits in `awsops-client` so tests can run them against
//! in-memory fakes.

pub mod args;
pub mod dns;
pub mod ec2;
pub mod report;

/// Install the fmt subscriber honoring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
