//! EC2 instance reboot utility.

use clap::Parser;

use awsops_cli::args::RebootArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    awsops_cli::init_tracing();
    awsops_cli::ec2::run(RebootArgs::parse()).await
}
