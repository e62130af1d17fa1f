use std::fs::File;
use std::path::Path;

use log::info;
use ndarray_npy::NpzWriter;

use super::model::Bundle;
use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// Bundle writer
// ---------------------------------------------------------------------------

/// Serialize the bundle into a single `.npz` archive at `path`.
///
/// Parent directories are created if absent; an existing archive is
/// overwritten. Exactly one file is written per invocation.
pub fn write_bundle(path: &Path, bundle: &Bundle) -> Result<Vec<&'static str>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ConvertError::file(path, e))?;
        }
    }

    let file = File::create(path).map_err(|e| ConvertError::file(path, e))?;
    let mut npz = NpzWriter::new(file);

    npz.add_array("X", &bundle.x)
        .map_err(|e| ConvertError::file(path, e))?;
    npz.add_array("S", &bundle.s)
        .map_err(|e| ConvertError::file(path, e))?;
    if let Some(anchors) = &bundle.anchors {
        npz.add_array("anchors", anchors)
            .map_err(|e| ConvertError::file(path, e))?;
    }
    if let Some(y_anchor) = &bundle.y_anchor {
        npz.add_array("y_anchor", y_anchor)
            .map_err(|e| ConvertError::file(path, e))?;
    }
    if let Some(constraints) = &bundle.constraints {
        npz.add_array("constraints", constraints)
            .map_err(|e| ConvertError::file(path, e))?;
    }

    npz.finish().map_err(|e| ConvertError::file(path, e))?;

    let keys = bundle.keys();
    info!("wrote {} with keys {:?}", path.display(), keys);
    Ok(keys)
}
