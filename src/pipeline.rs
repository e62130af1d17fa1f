use log::info;

use crate::cli::{split_cols, Cli};
use crate::data::loader::{load_anchors, load_constraints, load_table};
use crate::data::model::Bundle;
use crate::data::project::{anchor_labels, project_columns};
use crate::data::writer::write_bundle;
use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// The conversion pipeline
// ---------------------------------------------------------------------------

/// Run one conversion end to end and return the archive keys written.
///
/// Stages run in a fixed order: argument checks, table load, X/S projection,
/// optional anchors and labels, optional constraints, bundle write. All
/// validation happens before the writer runs, so a failure anywhere leaves
/// no output file behind.
pub fn run(cli: &Cli) -> Result<Vec<&'static str>> {
    let x_cols = split_cols(&cli.x_cols);
    let s_cols = split_cols(&cli.s_cols);

    // Checked before any file is touched.
    if s_cols.len() != 2 {
        return Err(ConvertError::Validation(format!(
            "--s-cols must contain exactly 2 column names, got {}",
            s_cols.len()
        )));
    }

    let table = load_table(&cli.csv)?;
    let n = table.n_rows();
    info!(
        "loaded {} with {n} rows, {} columns",
        cli.csv.display(),
        table.headers.len()
    );

    let x = project_columns(&table, &x_cols)?;
    let s = project_columns(&table, &s_cols)?;

    let mut bundle = Bundle {
        x,
        s,
        anchors: None,
        y_anchor: None,
        constraints: None,
    };

    if let Some(anchors_path) = &cli.anchors {
        let anchors = load_anchors(anchors_path, n)?;
        info!("loaded {} anchor indices", anchors.len());

        if let Some(col) = &cli.y_anchor_col {
            bundle.y_anchor = Some(anchor_labels(&table, col, &anchors.view())?);
        }
        bundle.anchors = Some(anchors);
    }

    if let Some(constraints_path) = &cli.constraints {
        let constraints = load_constraints(constraints_path, n)?;
        info!("loaded {} constraint rows", constraints.nrows());
        bundle.constraints = Some(constraints);
    }

    write_bundle(&cli.out, &bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use ndarray_npy::NpzReader;
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::{tempdir, TempDir};

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    /// 100-row survey CSV with columns log_res,chargeability,east,north.
    fn survey_csv(dir: &TempDir) -> PathBuf {
        let mut contents = String::from("log_res,chargeability,east,north\n");
        for i in 0..100 {
            contents.push_str(&format!("{}.5,0.{i:02},{},{}\n", i, 100 + i, 200 + i));
        }
        write_file(dir, "survey.csv", &contents)
    }

    fn base_cli(dir: &TempDir) -> Cli {
        Cli {
            csv: survey_csv(dir),
            out: dir.path().join("out.npz"),
            x_cols: "log_res,chargeability".into(),
            s_cols: "east,north".into(),
            anchors: None,
            y_anchor_col: None,
            constraints: None,
        }
    }

    fn read_2d(npz: &mut NpzReader<File>, key: &str) -> Array2<f64> {
        npz.by_name(key)
            .or_else(|_| npz.by_name(&format!("{key}.npy")))
            .unwrap()
    }

    fn read_1d(npz: &mut NpzReader<File>, key: &str) -> Array1<i64> {
        npz.by_name(key)
            .or_else(|_| npz.by_name(&format!("{key}.npy")))
            .unwrap()
    }

    fn open_npz(path: &Path) -> NpzReader<File> {
        NpzReader::new(File::open(path).unwrap()).unwrap()
    }

    #[test]
    fn mandatory_only_produces_x_and_s() {
        let dir = tempdir().unwrap();
        let cli = base_cli(&dir);
        let keys = run(&cli).unwrap();
        assert_eq!(keys, ["S", "X"]);

        let mut npz = open_npz(&cli.out);
        assert_eq!(read_2d(&mut npz, "X").shape(), [100, 2]);
        assert_eq!(read_2d(&mut npz, "S").shape(), [100, 2]);
    }

    #[test]
    fn anchors_without_label_column() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.anchors = Some(write_file(&dir, "anchors.txt", "0\n5\n10\n"));
        let keys = run(&cli).unwrap();
        assert_eq!(keys, ["S", "X", "anchors"]);

        let mut npz = open_npz(&cli.out);
        assert_eq!(read_1d(&mut npz, "anchors").to_vec(), [0, 5, 10]);
    }

    #[test]
    fn anchors_with_label_column() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.anchors = Some(write_file(&dir, "anchors.txt", "0\n5\n10\n"));
        cli.y_anchor_col = Some("north".into());
        let keys = run(&cli).unwrap();
        assert_eq!(keys, ["S", "X", "anchors", "y_anchor"]);

        let mut npz = open_npz(&cli.out);
        assert_eq!(read_1d(&mut npz, "y_anchor").to_vec(), [200, 205, 210]);
    }

    #[test]
    fn label_column_without_anchors_is_ignored() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.y_anchor_col = Some("north".into());
        assert_eq!(run(&cli).unwrap(), ["S", "X"]);
    }

    #[test]
    fn constraints_are_bundled() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.constraints = Some(write_file(
            &dir,
            "constraints.csv",
            "i,j,type,rho\n0,1,1,0.9\n2,3,0,0.4\n",
        ));
        let keys = run(&cli).unwrap();
        assert_eq!(keys, ["S", "X", "constraints"]);

        let mut npz = open_npz(&cli.out);
        let c = read_2d(&mut npz, "constraints");
        assert_eq!(c.shape(), [2, 4]);
        assert_eq!(c.row(1).to_vec(), [2.0, 3.0, 0.0, 0.4]);
    }

    #[test]
    fn single_coordinate_name_fails_before_reading_csv() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.csv = dir.path().join("does-not-exist.csv");
        cli.s_cols = "east".into();
        // Arity is checked first, so the missing CSV is never opened.
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, ConvertError::Validation(_)));
        assert!(!cli.out.exists());
    }

    #[test]
    fn missing_feature_column_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.x_cols = "log_res,porosity".into();
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, ConvertError::Schema { .. }));
        assert!(!cli.out.exists());
    }

    #[test]
    fn out_of_bounds_anchor_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli(&dir);
        cli.anchors = Some(write_file(&dir, "anchors.txt", "0\n100\n"));
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, ConvertError::Bounds { index: 100, rows: 100, .. }));
        assert!(!cli.out.exists());
    }
}
