// Representative point extraction
//
// A feature's geometry is reduced to a single latitude/longitude pair by
// flattening its nested coordinate structure and averaging every vertex.
// The average is unweighted: each vertex counts once, whatever ring or part
// it belongs to, and hole rings are averaged in with the exterior ring.

use std::fmt;

use geo::Point;
use geojson::{Geometry as GeoJsonGeometry, Position, Value as GeoJsonValue};
use serde_json::Value as JsonValue;

// A position in decimal degrees, latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(Point<f64>);

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon(Point::new(lon, lat))
    }

    pub fn lat(&self) -> f64 {
        self.0.y()
    }

    pub fn lon(&self) -> f64 {
        self.0.x()
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat(), self.lon())
    }
}

// Why a geometry's coordinates could not be walked
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    // A position holding something other than exactly two values
    PositionArity(usize),
    // A coordinate that is not a number
    NotNumeric,
    // A coordinate member that is neither a position nor a list of them
    UnexpectedShape,
    // Geometry object without a `coordinates` member
    MissingCoordinates,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::PositionArity(n) => write!(f, "position with {} values, expected 2", n),
            Anomaly::NotNumeric => write!(f, "non-numeric coordinate"),
            Anomaly::UnexpectedShape => write!(f, "unexpected coordinate structure"),
            Anomaly::MissingCoordinates => write!(f, "geometry has no coordinates"),
        }
    }
}

// Outcome of locating one feature
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    // Mean of all vertices
    Point(LatLon),
    // Feature has no geometry
    Missing,
    // Geometry has no vertices
    Empty,
    // Geometry could not be walked
    Malformed(Anomaly),
}

impl Extraction {
    pub fn point(&self) -> Option<LatLon> {
        match self {
            Extraction::Point(point) => Some(*point),
            _ => None,
        }
    }
}

// Nested coordinate structure: a single (lon, lat) position or a sequence
// of sub-structures (rings, polygons, parts).
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateTree {
    Pair { lon: f64, lat: f64 },
    Nested(Vec<CoordinateTree>),
}

impl CoordinateTree {
    fn from_position(position: &[f64]) -> Result<Self, Anomaly> {
        match position {
            [lon, lat] => Ok(CoordinateTree::Pair { lon: *lon, lat: *lat }),
            other => Err(Anomaly::PositionArity(other.len())),
        }
    }

    fn from_positions(positions: &[Position]) -> Result<Self, Anomaly> {
        positions
            .iter()
            .map(|position| Self::from_position(position))
            .collect::<Result<Vec<_>, _>>()
            .map(CoordinateTree::Nested)
    }

    fn from_rings(rings: &[Vec<Position>]) -> Result<Self, Anomaly> {
        rings
            .iter()
            .map(|ring| Self::from_positions(ring))
            .collect::<Result<Vec<_>, _>>()
            .map(CoordinateTree::Nested)
    }

    // Builds the tree for a typed GeoJSON geometry value
    pub fn from_geometry_value(value: &GeoJsonValue) -> Result<Self, Anomaly> {
        match value {
            GeoJsonValue::Point(position) => Self::from_position(position),
            GeoJsonValue::MultiPoint(positions) | GeoJsonValue::LineString(positions) => {
                Self::from_positions(positions)
            }
            GeoJsonValue::MultiLineString(lines) | GeoJsonValue::Polygon(lines) => {
                Self::from_rings(lines)
            }
            GeoJsonValue::MultiPolygon(polygons) => polygons
                .iter()
                .map(|polygon| Self::from_rings(polygon))
                .collect::<Result<Vec<_>, _>>()
                .map(CoordinateTree::Nested),
            GeoJsonValue::GeometryCollection(geometries) => geometries
                .iter()
                .map(|geometry| Self::from_geometry_value(&geometry.value))
                .collect::<Result<Vec<_>, _>>()
                .map(CoordinateTree::Nested),
        }
    }

    // Builds the tree from raw JSON, for geometries the typed parser rejects.
    //
    // An array of exactly two numbers is a position; an array of arrays
    // (including the empty array) is a nesting level.
    pub fn from_json(value: &JsonValue) -> Result<Self, Anomaly> {
        let items = match value {
            JsonValue::Array(items) => items,
            _ => return Err(Anomaly::UnexpectedShape),
        };

        if items.iter().all(JsonValue::is_array) {
            return items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(CoordinateTree::Nested);
        }

        let position = items
            .iter()
            .map(JsonValue::as_f64)
            .collect::<Option<Vec<f64>>>()
            .ok_or(Anomaly::NotNumeric)?;
        Self::from_position(&position)
    }

    // Flattens the tree in encounter order, swapping each stored (lon, lat)
    // position to latitude-first.
    pub fn flatten(&self) -> Vec<LatLon> {
        let mut points = Vec::new();
        self.flatten_into(&mut points);
        points
    }

    fn flatten_into(&self, points: &mut Vec<LatLon>) {
        match self {
            CoordinateTree::Pair { lon, lat } => points.push(LatLon::new(*lat, *lon)),
            CoordinateTree::Nested(children) => {
                for child in children {
                    child.flatten_into(points);
                }
            }
        }
    }
}

// Unweighted mean of the given points, `None` when there are none
pub fn mean_point(points: &[LatLon]) -> Option<LatLon> {
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat(), lon + p.lon()));

    Some(LatLon::new(lat_sum / count, lon_sum / count))
}

fn reduce(tree: Result<CoordinateTree, Anomaly>) -> Extraction {
    match tree {
        Ok(tree) => match mean_point(&tree.flatten()) {
            Some(point) => Extraction::Point(point),
            None => Extraction::Empty,
        },
        Err(anomaly) => Extraction::Malformed(anomaly),
    }
}

// Locates a parsed GeoJSON geometry
pub fn extract(geometry: &GeoJsonGeometry) -> Extraction {
    reduce(CoordinateTree::from_geometry_value(&geometry.value))
}

// Function to locate the raw geometry member of a feature. Geometries the
// geojson parser rejects (unknown type tags, malformed members) fall back
// to walking the raw coordinates array; problems end up as Malformed.
pub fn extract_json(geometry: Option<&JsonValue>) -> Extraction {
    let geometry = match geometry {
        None | Some(JsonValue::Null) => return Extraction::Missing,
        Some(geometry) => geometry,
    };

    match GeoJsonGeometry::from_json_value(geometry.clone()) {
        Ok(parsed) => extract(&parsed),
        Err(_) => match geometry.get("coordinates") {
            Some(coordinates) => reduce(CoordinateTree::from_json(coordinates)),
            None => Extraction::Malformed(Anomaly::MissingCoordinates),
        },
    }
}
