// Continent classification of a representative point
//
// Rules are plain latitude/longitude boxes checked in a fixed order, first
// match wins. The boxes overlap, so the order decides borderline points.
// All bounds are inclusive and nothing is clamped: out-of-range input is
// compared against the same inequalities.

use std::fmt;

use crate::extractor::LatLon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Continent {
    SouthAmerica,
    NorthAmerica,
    Africa,
    Europe,
    Oceania,
    Asia,
    Antarctica,
    Unknown,
}

impl Continent {
    pub const ALL: [Continent; 8] = [
        Continent::SouthAmerica,
        Continent::NorthAmerica,
        Continent::Africa,
        Continent::Europe,
        Continent::Oceania,
        Continent::Asia,
        Continent::Antarctica,
        Continent::Unknown,
    ];

    // Label written to the `region` property
    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::SouthAmerica => "South America",
            Continent::NorthAmerica => "North America",
            Continent::Africa => "Africa",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
            Continent::Asia => "Asia",
            Continent::Antarctica => "Antarctica",
            Continent::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Rule {
    continent: Continent,
    matches: fn(&LatLon) -> bool,
}

fn within(value: f64, min: f64, max: f64) -> bool {
    (min..=max).contains(&value)
}

fn antarctica(p: &LatLon) -> bool {
    p.lat() <= -60.0
}

fn south_america(p: &LatLon) -> bool {
    within(p.lon(), -82.0, -34.0) && within(p.lat(), -56.0, 13.0)
}

// Continental area, Central America and the Caribbean
fn north_america(p: &LatLon) -> bool {
    within(p.lon(), -170.0, -30.0) && p.lat() >= 7.0
}

fn africa(p: &LatLon) -> bool {
    within(p.lon(), -25.0, 60.0) && within(p.lat(), -35.0, 37.0)
}

fn europe(p: &LatLon) -> bool {
    within(p.lon(), -25.0, 40.0) && within(p.lat(), 34.0, 72.0)
}

// Australia, New Zealand and the Pacific on both sides of the antimeridian
fn oceania(p: &LatLon) -> bool {
    (within(p.lon(), 110.0, 180.0) && p.lat() <= 30.0)
        || (within(p.lon(), -180.0, -140.0) && within(p.lat(), -50.0, 30.0))
}

// Evaluation order matters: South America before North America, Africa before Europe.
const RULES: [Rule; 6] = [
    Rule { continent: Continent::Antarctica, matches: antarctica },
    Rule { continent: Continent::SouthAmerica, matches: south_america },
    Rule { continent: Continent::NorthAmerica, matches: north_america },
    Rule { continent: Continent::Africa, matches: africa },
    Rule { continent: Continent::Europe, matches: europe },
    Rule { continent: Continent::Oceania, matches: oceania },
];

// Everything no box claims
const FALLBACK: Continent = Continent::Asia;

// Classifies a located point.
//
// `_name` is the feature's display name. No rule uses it yet; it is
// accepted so name-based overrides can be added without touching callers.
pub fn classify_point(point: &LatLon, _name: Option<&str>) -> Continent {
    RULES
        .iter()
        .find(|rule| (rule.matches)(point))
        .map_or(FALLBACK, |rule| rule.continent)
}

// Classifies an optional point; features that could not be located are `Unknown`.
pub fn classify(point: Option<&LatLon>, name: Option<&str>) -> Continent {
    match point {
        Some(point) => classify_point(point, name),
        None => Continent::Unknown,
    }
}
