use ndarray::{Array1, Array2};

use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// Table – the loaded CSV
// ---------------------------------------------------------------------------

/// A CSV loaded in full: ordered header plus row-major string cells.
///
/// No schema is assumed at load time; typing happens later, when named
/// columns are projected into numeric arrays.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names, in file order.
    pub headers: Vec<String>,
    /// One `Vec<String>` per data row, aligned to `headers`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows (observations).
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve a column name or fail with the full available-column list.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| ConvertError::Schema {
            name: name.to_string(),
            available: self.headers.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Bundle – the output payload
// ---------------------------------------------------------------------------

/// The arrays to be written into one `.npz` archive.
///
/// `x` and `s` are mandatory; the rest are present iff the corresponding
/// input was supplied. Built once, written once, never mutated.
#[derive(Debug)]
pub struct Bundle {
    /// Feature matrix, shape (n, k).
    pub x: Array2<f64>,
    /// Coordinate matrix, shape (n, 2).
    pub s: Array2<f64>,
    /// Anchor row indices, each in [0, n).
    pub anchors: Option<Array1<i64>>,
    /// Anchor labels, aligned by position to `anchors`.
    pub y_anchor: Option<Array1<i64>>,
    /// Constraint rows (i, j, type, rho), shape (m, 4).
    pub constraints: Option<Array2<f64>>,
}

impl Bundle {
    /// Archive keys in sorted order, as reported to the user.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = vec!["X", "S"];
        if self.anchors.is_some() {
            keys.push("anchors");
        }
        if self.y_anchor.is_some() {
            keys.push("y_anchor");
        }
        if self.constraints.is_some() {
            keys.push("constraints");
        }
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn small_bundle() -> Bundle {
        Bundle {
            x: arr2(&[[1.0, 2.0], [3.0, 4.0]]),
            s: arr2(&[[0.0, 0.0], [1.0, 1.0]]),
            anchors: None,
            y_anchor: None,
            constraints: None,
        }
    }

    #[test]
    fn mandatory_keys_only() {
        assert_eq!(small_bundle().keys(), ["S", "X"]);
    }

    #[test]
    fn optional_keys_sorted() {
        let mut b = small_bundle();
        b.anchors = Some(Array1::from(vec![0, 1]));
        b.constraints = Some(arr2(&[[0.0, 1.0, 1.0, 0.5]]));
        assert_eq!(b.keys(), ["S", "X", "anchors", "constraints"]);
    }

    #[test]
    fn require_column_reports_available() {
        let t = Table {
            headers: vec!["east".into(), "north".into()],
            rows: vec![],
        };
        assert_eq!(t.require_column("north").unwrap(), 1);
        let err = t.require_column("depth").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'depth'"));
        assert!(msg.contains("east"));
    }
}
