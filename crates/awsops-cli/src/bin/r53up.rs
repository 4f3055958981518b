//! Route53 DNS records bulk upload utility.

use clap::Parser;

use awsops_cli::args::UploadArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    awsops_cli::init_tracing();
    awsops_cli::dns::run(UploadArgs::parse()).await
}
