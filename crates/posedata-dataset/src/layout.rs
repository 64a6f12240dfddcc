//! Enumeration of the `root/<class_name>/<image_file>` input layout.

use crate::DatasetError;
use std::fs;
use std::path::Path;

/// Sorted names of the sub-directories of `root`. Plain files are ignored.
pub fn class_names(root: &Path) -> Result<Vec<String>, DatasetError> {
    sorted_entries(root, |path| path.is_dir())
}

/// Sorted names of the regular files inside a class folder.
pub fn image_names(class_dir: &Path) -> Result<Vec<String>, DatasetError> {
    sorted_entries(class_dir, |path| path.is_file())
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>, DatasetError> {
    let entries = fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        let path = entry.path();
        if !keep(&path) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => log::warn!("Ignoring non UTF-8 entry {:?} in {}", name, dir.display()),
        }
    }
    names.sort();
    Ok(names)
}
