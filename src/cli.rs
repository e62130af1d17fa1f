use std::path::PathBuf;

use clap::Parser;

// ---------------------------------------------------------------------------
// Argument surface
// ---------------------------------------------------------------------------

/// Convert a CSV table into the `.npz` array bundle used downstream.
///
/// The tool is intentionally conservative: column names are taken verbatim
/// from the flags, never guessed.
#[derive(Debug, Parser)]
#[command(name = "csv2npz", version, about)]
pub struct Cli {
    /// Input CSV file (header row + data rows).
    #[arg(long, value_name = "PATH")]
    pub csv: PathBuf,

    /// Output .npz path. Parent directories are created if absent.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Comma-separated feature (amplitude) column names.
    #[arg(long, value_name = "NAMES")]
    pub x_cols: String,

    /// Comma-separated coordinate column names (exactly 2).
    #[arg(long, value_name = "NAMES")]
    pub s_cols: String,

    /// Optional file with 0-based anchor indices, one per line, no header.
    #[arg(long, value_name = "PATH")]
    pub anchors: Option<PathBuf>,

    /// Optional column in the main CSV holding anchor labels.
    #[arg(long, value_name = "NAME")]
    pub y_anchor_col: Option<String>,

    /// Optional constraints CSV with columns i,j,type,rho.
    #[arg(long, value_name = "PATH")]
    pub constraints: Option<PathBuf>,
}

/// Split a comma-separated column list, trimming each name and dropping
/// empties (`"a, b,"` → `["a", "b"]`).
pub fn split_cols(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
