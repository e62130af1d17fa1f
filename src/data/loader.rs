use std::path::Path;

use log::warn;
use ndarray::{Array1, Array2};

use super::model::Table;
use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// Primary table
// ---------------------------------------------------------------------------

/// Load the main CSV: header row + data rows, all columns kept as text.
pub fn load_table(path: &Path) -> Result<Table> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ConvertError::file(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ConvertError::file(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ConvertError::file(path, e))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(Table { headers, rows })
}

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// Load a headerless single-column list of 0-based anchor indices.
///
/// `n_rows` is the primary table's row count; every index must lie in
/// [0, n_rows).
pub fn load_anchors(path: &Path, n_rows: usize) -> Result<Array1<i64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| ConvertError::file(path, e))?;

    let mut anchors = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ConvertError::file(path, e))?;
        if record.len() != 1 {
            return Err(ConvertError::Validation(format!(
                "anchors file must contain a single column of indices; row {row_no} has {} fields",
                record.len()
            )));
        }
        let tok = record.get(0).unwrap_or("");
        let index = tok.trim().parse::<i64>().map_err(|_| {
            ConvertError::Validation(format!(
                "anchors file row {row_no}: '{tok}' is not an integer"
            ))
        })?;
        anchors.push(index);
    }

    for &a in &anchors {
        if a < 0 || a as usize >= n_rows {
            return Err(ConvertError::Bounds {
                context: "anchor",
                index: a,
                rows: n_rows,
            });
        }
    }

    Ok(Array1::from(anchors))
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Column names a constraints file must carry, in output order.
const CONSTRAINT_COLS: [&str; 4] = ["i", "j", "type", "rho"];

/// Load a constraints CSV into an (m, 4) matrix with columns i, j, type, rho.
///
/// Extra columns are ignored. `i` and `j` must lie in [0, n_rows); `rho`
/// outside [0, 1] is tolerated but logged.
pub fn load_constraints(path: &Path, n_rows: usize) -> Result<Array2<f64>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ConvertError::file(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ConvertError::file(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut col_indices = Vec::with_capacity(CONSTRAINT_COLS.len());
    for name in CONSTRAINT_COLS {
        let idx = headers.iter().position(|h| h == name).ok_or_else(|| {
            ConvertError::Schema {
                name: name.to_string(),
                available: headers.clone(),
            }
        })?;
        col_indices.push(idx);
    }

    // Structural safety check: the projection must be exactly 4 columns wide.
    if col_indices.len() != CONSTRAINT_COLS.len() {
        return Err(ConvertError::Validation(format!(
            "constraints projection yielded {} columns, expected 4 (i,j,type,rho)",
            col_indices.len()
        )));
    }

    let mut flat = Vec::new();
    let mut m = 0usize;
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ConvertError::file(path, e))?;
        for (&idx, name) in col_indices.iter().zip(CONSTRAINT_COLS) {
            let tok = record.get(idx).unwrap_or("");
            flat.push(parse_float(tok, row_no, name)?);
        }
        m += 1;
    }

    let constraints = Array2::from_shape_vec((m, 4), flat).map_err(|e| {
        ConvertError::Validation(format!("constraints matrix is malformed: {e}"))
    })?;

    for row in constraints.rows() {
        for (index, context) in [(row[0] as i64, "constraint i"), (row[1] as i64, "constraint j")] {
            if index < 0 || index as usize >= n_rows {
                return Err(ConvertError::Bounds {
                    context,
                    index,
                    rows: n_rows,
                });
            }
        }
        let rho = row[3];
        if !(0.0..=1.0).contains(&rho) {
            warn!("constraint rho {rho} outside [0, 1]; writing it unchanged");
        }
    }

    Ok(constraints)
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse one cell as a float, reporting row and column on failure.
pub(crate) fn parse_float(tok: &str, row: usize, col: &str) -> Result<f64> {
    tok.trim().parse::<f64>().map_err(|_| {
        ConvertError::Validation(format!(
            "row {row}, column '{col}': '{tok}' is not a number"
        ))
    })
}

/// Parse one cell as an integer; float-valued cells truncate toward zero.
pub(crate) fn parse_int(tok: &str, row: usize, col: &str) -> Result<i64> {
    let t = tok.trim();
    if let Ok(v) = t.parse::<i64>() {
        return Ok(v);
    }
    if let Ok(v) = t.parse::<f64>() {
        return Ok(v as i64);
    }
    Err(ConvertError::Validation(format!(
        "row {row}, column '{col}': '{tok}' is not an integer"
    )))
}
