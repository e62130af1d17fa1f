use ndarray::{Array1, Array2, ArrayView1};

use super::loader::{parse_float, parse_int};
use super::model::Table;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

/// Project named columns into an (n, k) float matrix.
///
/// Row order follows the table, column order follows `names`. Every name
/// must exist in the table; every cell must parse as a number.
pub fn project_columns(table: &Table, names: &[String]) -> Result<Array2<f64>> {
    let indices: Vec<usize> = names
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<_>>()?;

    let n = table.n_rows();
    let mut matrix = Array2::zeros((n, indices.len()));
    for (row_no, row) in table.rows.iter().enumerate() {
        for (k, (&idx, name)) in indices.iter().zip(names).enumerate() {
            matrix[[row_no, k]] = parse_float(&row[idx], row_no, name)?;
        }
    }
    Ok(matrix)
}

/// Extract anchor labels: the named column gathered at the anchor rows, in
/// anchor order, cast to integer.
///
/// Anchor indices are assumed bounds-checked against the table already.
pub fn anchor_labels(
    table: &Table,
    col: &str,
    anchors: &ArrayView1<i64>,
) -> Result<Array1<i64>> {
    let idx = table.require_column(col)?;

    let mut labels = Vec::with_capacity(anchors.len());
    for &a in anchors {
        let row_no = a as usize;
        labels.push(parse_int(&table.rows[row_no][idx], row_no, col)?);
    }
    Ok(Array1::from(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use ndarray::arr1;

    fn survey_table() -> Table {
        Table {
            headers: vec![
                "log_res".into(),
                "chargeability".into(),
                "east".into(),
                "north".into(),
                "label".into(),
            ],
            rows: vec![
                vec!["1.5".into(), "0.1".into(), "100".into(), "200".into(), "0".into()],
                vec!["2.5".into(), "0.2".into(), "101".into(), "201".into(), "1".into()],
                vec!["3.5".into(), "0.3".into(), "102".into(), "202".into(), "2.0".into()],
            ],
        }
    }

    #[test]
    fn projection_preserves_row_and_argument_order() {
        let table = survey_table();
        let x = project_columns(&table, &["chargeability".into(), "log_res".into()]).unwrap();
        assert_eq!(x.shape(), [3, 2]);
        assert_eq!(x.row(0).to_vec(), [0.1, 1.5]);
        assert_eq!(x.row(2).to_vec(), [0.3, 3.5]);
    }

    #[test]
    fn projection_missing_column_is_schema_error() {
        let table = survey_table();
        let err = project_columns(&table, &["depth".into()]).unwrap_err();
        assert!(matches!(err, ConvertError::Schema { .. }));
    }

    #[test]
    fn projection_non_numeric_cell_is_validation_error() {
        let mut table = survey_table();
        table.rows[1][0] = "n/a".into();
        let err = project_columns(&table, &["log_res".into()]).unwrap_err();
        match err {
            ConvertError::Validation(msg) => {
                assert!(msg.contains("row 1"));
                assert!(msg.contains("'n/a'"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn labels_follow_anchor_order_and_cast_to_int() {
        let table = survey_table();
        let anchors = arr1(&[2i64, 0]);
        let y = anchor_labels(&table, "label", &anchors.view()).unwrap();
        assert_eq!(y.to_vec(), [2, 0]);
    }

    #[test]
    fn labels_missing_column_is_schema_error() {
        let table = survey_table();
        let anchors = arr1(&[0i64]);
        let err = anchor_labels(&table, "lith", &anchors.view()).unwrap_err();
        assert!(matches!(err, ConvertError::Schema { .. }));
    }
}
