use crate::InferError;
use std::fs;
use std::path::{Path, PathBuf};

/// `<path>.part`, next to the final file.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Make sure a model file exists locally, downloading it once if needed.
///
/// An existing file at `path` is used as-is. Otherwise the file is fetched
/// from `url` into a `.part` sibling and renamed into place, so an
/// interrupted download never leaves a truncated model at `path`.
///
/// # Errors
///
/// `InferError::ModelLoad` when the file is missing and no URL is given,
/// `InferError::Download` when the request fails, `InferError::Io` when
/// the file cannot be written.
pub fn ensure_model(path: impl AsRef<Path>, url: Option<&str>) -> Result<PathBuf, InferError> {
    let path = path.as_ref();
    if path.is_file() {
        log::info!("Using model {}", path.display());
        return Ok(path.to_path_buf());
    }

    let url = url.ok_or_else(|| {
        InferError::ModelLoad(format!(
            "model {} not found and no download URL configured",
            path.display()
        ))
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    log::info!("Downloading model {} -> {}", url, path.display());
    let bytes = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map_err(|e| InferError::Download(format!("{}: {}", url, e)))?;

    let partial = partial_path(path);
    fs::write(&partial, &bytes)?;
    fs::rename(&partial, path)?;
    log::info!("Saved model {} ({} bytes)", path.display(), bytes.len());

    Ok(path.to_path_buf())
}
