//! `ec2reboot`: reboot one EC2 instance.

pub mod reboot;

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use awsops_client::{load_aws_config, locate_by_name_tag, region_name, Ec2Instances};
use awsops_core::OpsError;

use crate::args::RebootArgs;
use crate::report;

/// Entry point for the `ec2reboot` binary
pub async fn run(args: RebootArgs) -> Result<()> {
    report::banner("EC2 Instance Reboot Utility");

    let config = load_aws_config(args.region.clone(), args.profile.clone()).await;
    let region = region_name(&config);
    let instances = Ec2Instances::new(&config);

    let instance_id = match &args.instance_id {
        Some(id) => id.clone(),
        None => {
            let name = args.name.as_deref().unwrap_or_default();
            match locate_by_name_tag(&instances, name).await {
                Ok(id) => id,
                Err(err) => {
                    print_locate_failure(&err);
                    std::process::exit(1);
                }
            }
        }
    };

    let options = reboot::RebootOptions {
        dry_run: args.dry_run,
        verbose: args.verbose,
        ..reboot::RebootOptions::default()
    };

    if let Err(err) = reboot::reboot_instance(&instances, &instance_id, &region, &options).await {
        println!(
            "{}",
            format!("Error rebooting instance {instance_id}: {err}").red()
        );
        std::process::exit(1);
    }

    if args.wait && !args.dry_run {
        let timeout = Duration::from_secs(args.timeout);
        if let Err(err) =
            reboot::wait_for_status_ok(&instances, &instance_id, timeout, &options).await
        {
            println!(
                "{}",
                format!("Error waiting for instance {instance_id}: {err}").red()
            );
            std::process::exit(1);
        }
    }

    println!("{}", "Reboot operation completed successfully.".green());

    if !args.dry_run && !args.verbose {
        println!(
            "{}",
            "For detailed API verification, run with --verbose.".yellow()
        );
    }

    Ok(())
}

/// Report a locator failure. The ambiguous case lists every candidate so
/// the operator can pick one with --instance-id.
fn print_locate_failure(err: &OpsError) {
    match err {
        OpsError::AmbiguousInstance { name, candidates } => {
            println!(
                "{}",
                format!(
                    "Error: Multiple instances found with Name tag '{name}'. Please use --instance-id instead."
                )
                .red()
            );
            for candidate in candidates {
                println!("  - {candidate}");
            }
        }
        other => println!("{}", format!("Error: {other}").red()),
    }
}
