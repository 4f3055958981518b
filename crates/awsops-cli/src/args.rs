//! Command-line argument definitions using clap.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Route53 DNS Records Bulk Upload Utility
///
/// Reads a CSV of env,zone,type,name,value,ttl rows and upserts one record
/// per row into the matching hosted zone. Use --create-template to write a
/// starting CSV.
#[derive(Parser, Debug)]
#[command(name = "r53up")]
#[command(author, version, about, long_about = None)]
pub struct UploadArgs {
    /// CSV file with DNS records
    pub csv_file: Option<PathBuf>,

    /// Show what would be done without making actual changes
    #[arg(long)]
    pub dry_run: bool,

    /// Create a template CSV file and exit
    #[arg(long)]
    pub create_template: bool,
}

/// EC2 Instance Reboot Utility
///
/// Identifies one instance by ID or Name tag, reboots it, and optionally
/// waits for its status checks to pass.
#[derive(Parser, Debug)]
#[command(name = "ec2reboot")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["instance_id", "name"])))]
pub struct RebootArgs {
    /// EC2 instance ID to reboot
    #[arg(long)]
    pub instance_id: Option<String>,

    /// EC2 instance Name tag to search for
    #[arg(long)]
    pub name: Option<String>,

    /// AWS region (default: AWS_REGION env var or us-west-2)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// AWS profile to use
    #[arg(long)]
    pub profile: Option<String>,

    /// Wait for the instance to pass all status checks after reboot
    #[arg(long)]
    pub wait: bool,

    /// Timeout in seconds when waiting for instance status
    #[arg(long, default_value_t = 600)]
    pub timeout: u64,

    /// Show what would be done without making actual changes
    #[arg(long)]
    pub dry_run: bool,

    /// Show detailed API response information and CloudTrail guidance
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn upload_args_are_well_formed() {
        UploadArgs::command().debug_assert();
    }

    #[test]
    fn reboot_args_are_well_formed() {
        RebootArgs::command().debug_assert();
    }

    #[test]
    fn reboot_selectors_are_mutually_exclusive() {
        let err = RebootArgs::try_parse_from([
            "ec2reboot",
            "--instance-id",
            "i-0abc",
            "--name",
            "web-1",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn reboot_requires_one_selector() {
        let err = RebootArgs::try_parse_from(["ec2reboot"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn reboot_timeout_defaults_to_600() {
        let args = RebootArgs::try_parse_from(["ec2reboot", "--instance-id", "i-0abc"]).unwrap();
        assert_eq!(args.timeout, 600);
        assert!(!args.wait);
    }
}
