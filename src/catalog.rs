//! Item Catalogs
//!
//! Catalogs are YAML sequences of item records:
//!
//! ```yaml
//! - item: FXIP
//!   weight: 66
//!   value: 66
//!   pieces: 481
//! - item: Tree
//!   weight: 10
//!   value: 1
//! ```
//!
//! Records are read into [`BoundedItem`](crate::items::BoundedItem)s, where a
//! missing `pieces` means one piece, or [`UnboundedItem`](crate::items::UnboundedItem)s,
//! where `pieces` is ignored.

use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

/// Catalog Parsing Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading or writing a catalog file
    #[error("Failed to access item catalog: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Load items from a YAML catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load<I: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<I>, CatalogError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let items = from_str(&contents)?;

    debug!(path = %path.display(), items = items.len(), "loaded item catalog");

    Ok(items)
}

/// Parse items from YAML catalog contents.
///
/// # Errors
///
/// Returns an error if the contents cannot be parsed.
pub fn from_str<I: DeserializeOwned>(contents: &str) -> Result<Vec<I>, CatalogError> {
    Ok(serde_norway::from_str(contents)?)
}

/// Render items as YAML catalog contents.
///
/// # Errors
///
/// Returns an error if the items cannot be serialized.
pub fn to_string<I: Serialize>(items: &[I]) -> Result<String, CatalogError> {
    Ok(serde_norway::to_string(items)?)
}

/// Write items to a YAML catalog file.
///
/// # Errors
///
/// Returns an error if the items cannot be serialized or the file written.
pub fn save<I: Serialize>(path: impl AsRef<Path>, items: &[I]) -> Result<(), CatalogError> {
    fs::write(path, to_string(items)?)?;

    Ok(())
}
