//! Error types for loading, tagging and writing GeoJSON documents

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Document-level failures. Any of these aborts the whole run.
#[derive(Debug)]
pub enum RegionError {
    /// Input file missing or unreadable
    Read { path: PathBuf, source: io::Error },
    /// Input file is not well-formed JSON
    Parse { path: PathBuf, source: serde_json::Error },
    /// JSON is well-formed but not shaped like a feature collection
    InvalidDocument(String),
    /// Updated document could not be serialized
    Serialize(serde_json::Error),
    /// Output file could not be written
    Write { path: PathBuf, source: io::Error },
    /// Location of the running executable is unknown
    Locate(io::Error),
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            RegionError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
            RegionError::InvalidDocument(msg) => write!(f, "Invalid GeoJSON document: {}", msg),
            RegionError::Serialize(e) => write!(f, "Failed to serialize updated geojson: {}", e),
            RegionError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            RegionError::Locate(e) => write!(f, "Failed to locate executable: {}", e),
        }
    }
}

impl Error for RegionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegionError::Read { source, .. } | RegionError::Write { source, .. } => Some(source),
            RegionError::Parse { source, .. } => Some(source),
            RegionError::Serialize(e) => Some(e),
            RegionError::Locate(e) => Some(e),
            RegionError::InvalidDocument(_) => None,
        }
    }
}

/// Result type for document operations
pub type RegionResult<T> = Result<T, RegionError>;
