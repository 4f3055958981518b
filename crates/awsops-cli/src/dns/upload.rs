//! The upload driver: CSV rows in, change batches out.
//!
//! Per row: validate, resolve the zone, build the batch, then submit it
//! (or print it in dry-run mode). Rows run strictly in file order with a
//! fixed delay between live submissions; one bad row never blocks the
//! rest of the batch.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use tokio::time::sleep;

use awsops_client::{resolve_zone_id, ZoneCache, ZoneService};
use awsops_core::{ChangeBatch, Result, RunSummary};

use super::records::{self, RowPlan};

/// Knobs for one upload run
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Print batches instead of submitting them
    pub dry_run: bool,

    /// Fixed delay between live submissions. Blunt rate-limit avoidance:
    /// serial rows plus a constant pause, no backoff on actual throttle
    /// errors.
    pub throttle: Duration,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            throttle: Duration::from_millis(500),
        }
    }
}

/// Process every row of `path` in file order and return the run counters.
///
/// Only a missing file or a bad header aborts the run; everything after
/// the header is per-row accounting.
pub async fn process_csv<Z: ZoneService>(
    zones: &Z,
    path: &Path,
    options: &UploadOptions,
) -> Result<RunSummary> {
    let rows = records::read_rows(path)?;

    let mut summary = RunSummary::new();
    let mut cache = ZoneCache::new();

    for (line, plan) in rows {
        let row = match plan {
            Ok(RowPlan::Upsert(row)) => row,
            Ok(RowPlan::Skip { record_type }) => {
                println!(
                    "{}",
                    format!("Skipping unsupported record type on row {line}: {record_type}")
                        .yellow()
                );
                summary.skip();
                continue;
            }
            Err(err) => {
                println!("{}", format!("Error processing row {line}: {err}").red());
                summary.failure();
                continue;
            }
        };

        println!();
        println!(
            "{}",
            format!(
                "Processing row {line}: {} {} {} {} {} {}",
                row.env, row.zone, row.record_type, row.name, row.value, row.ttl
            )
            .yellow()
        );

        let zone_id = match resolve_zone_id(zones, &row.zone, &mut cache).await {
            Ok(id) => id,
            Err(err) => {
                println!("{}", format!("Error: {err}").red());
                summary.failure();
                continue;
            }
        };

        println!("Found hosted zone ID: {zone_id} for {}", row.zone);

        let batch = ChangeBatch::from_row(&row);

        if options.dry_run {
            println!("{}", "DRY RUN: Would apply change:".cyan());
            let rendered = serde_json::to_string_pretty(&batch)
                .unwrap_or_else(|_| format!("{batch:#?}"));
            println!("{rendered}");
            summary.success();
            continue;
        }

        match zones.apply_change(&zone_id, &batch).await {
            Ok(receipt) => {
                let change_id = receipt.change_id.as_deref().unwrap_or("unknown");
                println!(
                    "{}",
                    format!("Successfully submitted change. Change ID: {change_id}").green()
                );
                summary.success();
            }
            Err(err) => {
                println!(
                    "{}",
                    format!("Error uploading record {}: {err}", batch.fqdn()).red()
                );
                summary.failure();
            }
        }

        sleep(options.throttle).await;
    }

    println!();
    println!("{}", format!("Summary: {summary}").green());

    Ok(summary)
}
