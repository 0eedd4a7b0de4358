//! Matrix CSV format
//!
//! ```text
//! ,1,2,3
//! 1,0,5,100
//! 2,5,0,5
//! 3,100,,0
//! ```
//!
//! The header lists column ids after one leading cell (its text is
//! ignored). Each data row starts with its row id. Rows may appear in any
//! order but every header id needs exactly one row. Empty cells are
//! missing entries.

use crate::csv_error;
use hubroute_core::{HubRouteError, HubRouteResult, LocationId, LocationMatrix};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

fn parse_id(cell: &str, table: &str, line: usize) -> HubRouteResult<LocationId> {
    cell.trim()
        .parse::<usize>()
        .map(LocationId::new)
        .map_err(|_| HubRouteError::Parse(format!("{table}: line {line}: '{cell}' is not a location id")))
}

fn parse_cell(cell: &str, table: &str, line: usize) -> HubRouteResult<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| HubRouteError::Parse(format!("{table}: line {line}: '{cell}' is not a number")))
}

/// Read a location matrix from any CSV source.
pub fn read_location_matrix_from<R: Read>(reader: R, name: &str) -> HubRouteResult<LocationMatrix> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| csv_error(name, e))?,
        None => return Err(HubRouteError::data(name, "file is empty")),
    };
    let ids = header
        .iter()
        .skip(1)
        .map(|cell| parse_id(cell, name, 1))
        .collect::<HubRouteResult<Vec<_>>>()?;
    let mut matrix = LocationMatrix::new(name, ids.clone())?;

    let mut seen = HashSet::with_capacity(ids.len());
    for (offset, record) in records.enumerate() {
        let line = offset + 2;
        let record = record.map_err(|e| csv_error(name, e))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.len() != ids.len() + 1 {
            return Err(HubRouteError::data(
                name,
                format!(
                    "line {} has {} cells, expected {} (matrix must be square)",
                    line,
                    record.len(),
                    ids.len() + 1
                ),
            ));
        }
        let row = parse_id(&record[0], name, line)?;
        if !matrix.contains(row) {
            return Err(HubRouteError::data(
                name,
                format!("row id {} on line {} is not a column id", row, line),
            ));
        }
        if !seen.insert(row) {
            return Err(HubRouteError::data(name, format!("duplicate row id {}", row)));
        }
        for (col, cell) in ids.iter().zip(record.iter().skip(1)) {
            if let Some(value) = parse_cell(cell, name, line)? {
                matrix.set(row, *col, value)?;
            }
        }
    }

    if let Some(missing) = ids.iter().find(|id| !seen.contains(id)) {
        return Err(HubRouteError::data(name, format!("no row for location {}", missing)));
    }
    debug!(table = name, locations = ids.len(), "read location matrix");
    Ok(matrix)
}

/// Read a location matrix from a CSV file.
pub fn read_location_matrix(path: &Path, name: &str) -> HubRouteResult<LocationMatrix> {
    let file = std::fs::File::open(path)?;
    read_location_matrix_from(file, name)
}

/// Write a location matrix in the same CSV format.
pub fn write_location_matrix(path: &Path, matrix: &LocationMatrix) -> HubRouteResult<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| csv_error(matrix.name(), e))?;
    let mut header = vec![String::new()];
    header.extend(matrix.ids().iter().map(|id| id.to_string()));
    wtr.write_record(&header).map_err(|e| csv_error(matrix.name(), e))?;

    for &row in matrix.ids() {
        let mut record = vec![row.to_string()];
        record.extend(
            matrix
                .ids()
                .iter()
                .map(|&col| matrix.get(row, col).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record).map_err(|e| csv_error(matrix.name(), e))?;
    }
    wtr.flush()?;
    Ok(())
}
