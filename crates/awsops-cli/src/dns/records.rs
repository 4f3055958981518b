//! CSV input handling for the uploader.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use awsops_core::{OpsError, RecordRow, RecordType, Result};

/// The exact header set a record CSV must carry, in template order
pub const EXPECTED_HEADERS: [&str; 6] = ["env", "zone", "type", "name", "value", "ttl"];

/// Fixed template filename, written into the working directory
pub const TEMPLATE_FILE: &str = "dns_records_template.csv";

const TEMPLATE_BODY: &str = "\
env,zone,type,name,value,ttl
prod,example.com,CNAME,www,target.example.com,300
prod,example.com,TXT,_verification,verification-code-here,300
";

/// One raw CSV row before validation
#[derive(Debug, Deserialize)]
struct RawRecord {
    env: String,
    zone: String,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    value: String,
    ttl: String,
}

/// What the driver should do with one parsed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPlan {
    /// Upsert the record
    Upsert(RecordRow),

    /// Skip the row: the record type is outside the supported set
    Skip {
        /// The unsupported type as it appeared in the file, upper-cased
        record_type: String,
    },
}

impl RawRecord {
    fn into_plan(self) -> Result<RowPlan> {
        let ttl = self
            .ttl
            .trim()
            .parse::<u32>()
            .map_err(|_| OpsError::InvalidTtl {
                raw: self.ttl.trim().to_string(),
            })?;

        let record_type = self.record_type.trim().to_ascii_uppercase();
        let Ok(record_type) = record_type.parse::<RecordType>() else {
            return Ok(RowPlan::Skip { record_type });
        };

        Ok(RowPlan::Upsert(RecordRow {
            env: self.env.trim().to_string(),
            zone: self.zone.trim().to_string(),
            record_type,
            name: self.name.trim().to_string(),
            value: self.value.trim().to_string(),
            ttl,
        }))
    }
}

/// The header must equal the expected column set, order-insensitive.
/// Any deviation aborts the run before a single row is processed.
pub fn validate_header(headers: &[String]) -> Result<()> {
    let found: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let expected: HashSet<&str> = EXPECTED_HEADERS.into_iter().collect();

    if found == expected && headers.len() == EXPECTED_HEADERS.len() {
        Ok(())
    } else {
        Err(OpsError::BadHeader {
            found: headers.join(","),
        })
    }
}

/// Read and validate a record CSV.
///
/// Returns one entry per data row, tagged with its 1-based file line
/// (the header occupies line 1). Row-level problems stay inside the entry
/// so one bad row never hides the rest of the file.
pub fn read_rows(path: &Path) -> Result<Vec<(usize, Result<RowPlan>)>> {
    let file = fs::File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| OpsError::Row(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    validate_header(&headers)?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<RawRecord>().enumerate() {
        let line = index + 2;
        let plan = record
            .map_err(|e| OpsError::Row(e.to_string()))
            .and_then(RawRecord::into_plan);
        rows.push((line, plan));
    }

    Ok(rows)
}

/// Write the template CSV into the working directory
pub fn write_template() -> Result<PathBuf> {
    fs::write(TEMPLATE_FILE, TEMPLATE_BODY)?;
    Ok(PathBuf::from(TEMPLATE_FILE))
}

/// Write the template CSV into `dir`, returning its path
pub fn write_template_in(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(TEMPLATE_FILE);
    fs::write(&path, TEMPLATE_BODY)?;
    Ok(path)
}
