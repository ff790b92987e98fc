use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

use log::{debug, info, warn};
use serde_json::{Map, Value as JsonValue};
use tempfile::NamedTempFile;

use crate::classifier::{classify, Continent};
use crate::error::{RegionError, RegionResult};
use crate::extractor::{extract_json, Extraction};

// Property key the continent label is written to
pub const REGION_PROPERTY: &str = "region";

// Settings for tagging a document
#[derive(Debug, Clone)]
pub struct TaggingOptions {
    // Property holding the feature's display name, handed to the classifier
    pub name_property: String,
}

impl Default for TaggingOptions {
    fn default() -> Self {
        TaggingOptions {
            name_property: "name".to_string(),
        }
    }
}

// Counts gathered while tagging a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggingSummary {
    pub features: usize,
    pub by_continent: BTreeMap<Continent, usize>,
    // Features without geometry
    pub missing: usize,
    // Features whose geometry has no vertices
    pub empty: usize,
    // Features whose geometry could not be walked
    pub malformed: usize,
}

impl TaggingSummary {
    // Features that fell back to `Unknown` for lack of a usable geometry
    pub fn degraded(&self) -> usize {
        self.missing + self.empty + self.malformed
    }

    pub fn count(&self, continent: Continent) -> usize {
        self.by_continent.get(&continent).copied().unwrap_or(0)
    }

    fn record(&mut self, continent: Continent, extraction: &Extraction) {
        self.features += 1;
        *self.by_continent.entry(continent).or_insert(0) += 1;
        match extraction {
            Extraction::Point(_) => {}
            Extraction::Missing => self.missing += 1,
            Extraction::Empty => self.empty += 1,
            Extraction::Malformed(_) => self.malformed += 1,
        }
    }
}

// Function to load a whole GeoJSON document from disk
pub fn load_document(path: &Path) -> RegionResult<JsonValue> {
    info!("Loading file: {}", path.display());
    let file = File::open(path).map_err(|source| RegionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| RegionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// Locates, classifies and labels one feature in place.
//
// Any existing `region` value is overwritten; it never feeds into the
// classification. A missing or null `properties` member is created.
pub fn tag_feature(
    feature: &mut Map<String, JsonValue>,
    options: &TaggingOptions,
) -> RegionResult<(Continent, Extraction)> {
    let extraction = extract_json(feature.get("geometry"));

    let slot = feature.entry("properties").or_insert(JsonValue::Null);
    if slot.is_null() {
        *slot = JsonValue::Object(Map::new());
    }
    let properties = slot.as_object_mut().ok_or_else(|| {
        RegionError::InvalidDocument("feature properties are not an object".to_string())
    })?;

    let name = properties
        .get(&options.name_property)
        .and_then(JsonValue::as_str);
    let continent = classify(extraction.point().as_ref(), name);

    properties.insert(
        REGION_PROPERTY.to_string(),
        JsonValue::String(continent.as_str().to_string()),
    );

    Ok((continent, extraction))
}

// Tags every feature of a feature collection document in place.
//
// Fails without having touched later features when the document structure
// itself is unusable; geometry problems only degrade the affected feature.
pub fn tag_document(document: &mut JsonValue, options: &TaggingOptions) -> RegionResult<TaggingSummary> {
    let root = document.as_object_mut().ok_or_else(|| {
        RegionError::InvalidDocument("top-level value is not an object".to_string())
    })?;

    let mut summary = TaggingSummary::default();

    let features = match root.get_mut("features") {
        Some(JsonValue::Array(features)) => features,
        Some(_) => {
            return Err(RegionError::InvalidDocument(
                "\"features\" is not an array".to_string(),
            ))
        }
        None => {
            warn!("Document has no features, nothing to tag");
            return Ok(summary);
        }
    };

    let total_features = features.len();
    info!("Found {} features in file", total_features);

    for (index, feature) in features.iter_mut().enumerate() {
        if (index + 1) % 1000 == 0 {
            debug!("Processing feature {}/{}", index + 1, total_features);
        }

        let feature = feature.as_object_mut().ok_or_else(|| {
            RegionError::InvalidDocument(format!("feature {} is not an object", index))
        })?;

        let (continent, extraction) = tag_feature(feature, options).map_err(|e| match e {
            RegionError::InvalidDocument(msg) => {
                RegionError::InvalidDocument(format!("feature {}: {}", index, msg))
            }
            other => other,
        })?;

        match &extraction {
            Extraction::Point(point) => debug!("Feature {} at {} is {}", index, point, continent),
            Extraction::Missing => debug!("Feature {} has no geometry, tagged {}", index, continent),
            Extraction::Empty => debug!("Feature {} has no coordinates, tagged {}", index, continent),
            Extraction::Malformed(anomaly) => {
                debug!("Feature {} has malformed geometry ({}), tagged {}", index, anomaly, continent)
            }
        }

        summary.record(continent, &extraction);
    }

    Ok(summary)
}

// Function to write the tagged document. The JSON goes to a temporary file
// next to the destination which then replaces it, so a failed write leaves
// the previous document in place.
pub fn write_document(path: &Path, document: &JsonValue) -> RegionResult<()> {
    let bytes = serde_json::to_vec_pretty(document).map_err(RegionError::Serialize)?;

    let write_error = |source: io::Error| RegionError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(&bytes).map_err(write_error)?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    info!("Wrote {}", path.display());
    Ok(())
}

pub fn log_summary(summary: &TaggingSummary) {
    for (continent, count) in &summary.by_continent {
        info!("{}: {} features", continent, count);
    }
    if summary.degraded() > 0 {
        warn!(
            "{} of {} features could not be located and were tagged {} ({} without geometry, {} empty, {} malformed)",
            summary.degraded(),
            summary.features,
            Continent::Unknown,
            summary.missing,
            summary.empty,
            summary.malformed
        );
    }
}
