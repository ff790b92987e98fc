use std::env;
use std::path::{Path, PathBuf};

use log::info;

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod regions;

pub use classifier::{classify, Continent};
pub use error::{RegionError, RegionResult};
pub use extractor::{extract, extract_json, Extraction, LatLon};
pub use regions::{TaggingOptions, TaggingSummary};

// File updated when no input is given
pub const DEFAULT_DOCUMENT: &str = "world.geojson";

// `world.geojson` in the directory above the running executable
pub fn default_document_path() -> RegionResult<PathBuf> {
    let exe = env::current_exe().map_err(RegionError::Locate)?;
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(exe_dir.join("..").join(DEFAULT_DOCUMENT))
}

// Loads `input`, tags every feature with its continent and writes the
// result to `output` (which may be `input` itself). Nothing is written
// unless the whole document was tagged; `output: None` skips writing.
pub fn process_file(
    input: &Path,
    output: Option<&Path>,
    options: &TaggingOptions,
) -> RegionResult<TaggingSummary> {
    let mut document = regions::load_document(input)?;
    let summary = regions::tag_document(&mut document, options)?;
    regions::log_summary(&summary);

    match output {
        Some(path) => regions::write_document(path, &document)?,
        None => info!("Dry run, {} left untouched", input.display()),
    }

    Ok(summary)
}
