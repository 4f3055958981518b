//! `r53up`: bulk Route53 record upload.

pub mod records;
pub mod upload;

use anyhow::Result;
use clap::CommandFactory;
use colored::Colorize;

use awsops_client::{load_aws_config, Route53Zones};

use crate::args::UploadArgs;
use crate::report;

/// Entry point for the `r53up` binary
pub async fn run(args: UploadArgs) -> Result<()> {
    report::banner("Route53 DNS Records Bulk Upload Utility");

    if args.create_template {
        let path = records::write_template()?;
        println!(
            "{}",
            format!("Created template CSV at {}", path.display()).green()
        );
        println!(
            "{}",
            "Please fill this template with your DNS records and run the tool again.".yellow()
        );
        return Ok(());
    }

    let Some(csv_file) = args.csv_file.as_deref() else {
        UploadArgs::command().print_help()?;
        println!();
        println!(
            "{}",
            "No CSV file specified. Use --create-template to create a template.".yellow()
        );
        std::process::exit(1);
    };

    if !csv_file.exists() {
        println!(
            "{}",
            format!("Error: File {} not found.", csv_file.display()).red()
        );
        std::process::exit(1);
    }

    let config = load_aws_config(None, None).await;
    let zones = Route53Zones::new(&config);

    let options = upload::UploadOptions {
        dry_run: args.dry_run,
        ..upload::UploadOptions::default()
    };

    if let Err(err) = upload::process_csv(&zones, csv_file, &options).await {
        println!("{}", format!("Error: {err}").red());
        std::process::exit(1);
    }

    Ok(())
}
