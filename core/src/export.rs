//! Batch export to spreadsheet-friendly CSV.
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet tools pick
//! the right encoding for the Chinese text. A header row is always written,
//! even for an empty batch.

use crate::{
    error::{GenError, GenResult},
    generator::OrderGenerator,
    order::{OrderRecord, COLUMNS},
};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// UTF-8 signature written at the start of every exported file.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportReport {
    /// Absolute path of the written file.
    pub path: PathBuf,
    /// Data rows written, header excluded.
    pub rows: usize,
}

/// Generate `count` records and write them to `path`.
pub fn export_batch(
    generator: &OrderGenerator,
    count: usize,
    path: &Path,
) -> GenResult<ExportReport> {
    let records = generator.generate(count);
    write_orders_csv(path, &records)
}

/// Write order records with the documented header.
pub fn write_orders_csv(path: &Path, records: &[OrderRecord]) -> GenResult<ExportReport> {
    write_bom_csv(path, &COLUMNS, records)?;
    let path = std::fs::canonicalize(path)?;
    log::info!("wrote {} orders to {}", records.len(), path.display());
    Ok(ExportReport {
        path,
        rows: records.len(),
    })
}

/// Write any serializable rows under an explicit header, BOM first.
pub fn write_bom_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> GenResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read an exported orders file back. The BOM is optional.
pub fn read_orders_csv(path: &Path) -> GenResult<Vec<OrderRecord>> {
    read_bom_csv(path, &COLUMNS)
}

/// Read rows from a BOM-prefixed CSV, checking the header first.
pub fn read_bom_csv<T: DeserializeOwned>(
    path: &Path,
    expected_header: &[&str],
) -> GenResult<Vec<T>> {
    let bytes = std::fs::read(path)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = csv::Reader::from_reader(body);
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header != expected_header {
        return Err(GenError::Other(anyhow::anyhow!(
            "unexpected header in {}: {header:?}",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for row in reader.deserialize::<T>() {
        rows.push(row?);
    }
    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
