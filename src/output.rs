//! Tabular (CSV) and structured (JSON) exports of the crawl result
//!
//! Both files come from the same record slice, row for row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, ScrapeError};
use crate::record::ProductRecord;

/// Column names across all records, in first-seen order.
pub fn column_superset(records: &[ProductRecord]) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for record in records {
        for (key, _) in record.columns() {
            if !header.contains(&key) {
                header.push(key);
            }
        }
    }
    header
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn write_csv(records: &[ProductRecord], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ScrapeError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    let header = column_superset(records);
    if !header.is_empty() {
        writer.write_record(&header)?;
    }
    for record in records {
        let columns = record.columns();
        let row = header.iter().map(|name| {
            cell(
                columns
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value),
            )
        });
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| ScrapeError::io(path, e))?;
    Ok(())
}

pub fn write_json(records: &[ProductRecord], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ScrapeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush().map_err(|e| ScrapeError::io(path, e))?;
    Ok(())
}

/// JSON export path that goes with a CSV path
pub fn json_path_for(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("json")
}

/// Write the CSV to `csv_path` and the JSON next to it. Returns the JSON
/// path. An empty crawl still produces both files.
pub fn export(records: &[ProductRecord], csv_path: &Path) -> Result<PathBuf> {
    if records.is_empty() {
        warn!("no products to export, writing empty outputs");
    }

    let json_path = json_path_for(csv_path);
    write_csv(records, csv_path)?;
    write_json(records, &json_path)?;
    info!(
        records = records.len(),
        csv = %csv_path.display(),
        json = %json_path.display(),
        "export finished"
    );
    Ok(json_path)
}
