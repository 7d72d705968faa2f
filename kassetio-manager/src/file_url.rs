//! Filesystem-path ↔ `file://` URL conversion.
//!
//! Backends exchange locations as URLs (the `LocatableContent` trait's
//! `location` property); hosts want filesystem paths. Conversion is
//! bijective for well-formed absolute local paths — characters reserved in
//! URLs (`#`, spaces, ...) are percent-encoded on the way out and decoded
//! on the way back.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::ManagerError;

/// Converts an absolute filesystem path to a `file://` URL string.
pub fn path_to_url(path: &str) -> Result<String, ManagerError> {
    let url = Url::from_file_path(Path::new(path))
        .map_err(|()| ManagerError::InvalidPath(path.to_string()))?;
    Ok(url.into())
}

/// Converts a `file://` URL string back to a filesystem path.
pub fn path_from_url(url: &str) -> Result<String, ManagerError> {
    let parsed =
        Url::parse(url).map_err(|_| ManagerError::InvalidUrl(url.to_string()))?;
    let path: PathBuf = parsed
        .to_file_path()
        .map_err(|()| ManagerError::InvalidUrl(url.to_string()))?;
    path.into_os_string()
        .into_string()
        .map_err(|_| ManagerError::InvalidUrl(url.to_string()))
}
