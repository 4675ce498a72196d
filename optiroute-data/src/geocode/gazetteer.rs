//! Offline `Geocoder` over a list of known addresses.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use optiroute_core::{GeocodeError, Geocoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A known address and its WGS84 position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    /// Address as users type it.
    pub address: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Either a bare list of entries or a document carrying them under `points`.
#[derive(Deserialize)]
#[serde(untagged)]
enum GazetteerDocument {
    Entries(Vec<GazetteerEntry>),
    Document { points: Vec<GazetteerEntry> },
}

impl GazetteerDocument {
    fn into_entries(self) -> Vec<GazetteerEntry> {
        match self {
            Self::Entries(entries) | Self::Document { points: entries } => entries,
        }
    }
}

/// Errors loading a gazetteer.
#[derive(Debug, Error)]
pub enum GazetteerError {
    /// The gazetteer file could not be read.
    #[error("failed to read gazetteer at {path:?}: {source}")]
    Read {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The gazetteer JSON is malformed.
    #[error("failed to parse gazetteer JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// An entry has an impossible position.
    #[error("gazetteer entry {address:?} has invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate {
        /// Offending address.
        address: String,
        /// Latitude as given.
        lat: f64,
        /// Longitude as given.
        lng: f64,
    },
    /// Two entries name the same address with different positions.
    #[error("gazetteer lists {address:?} more than once with different coordinates")]
    ConflictingEntry {
        /// Address listed twice.
        address: String,
    },
}

/// Resolves addresses from an in-memory table.
///
/// Lookups ignore case and collapse runs of whitespace, so `"250  university
/// ave"` finds `"250 University Ave"`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use optiroute_core::{GeocodeError, Geocoder};
/// use optiroute_data::GazetteerGeocoder;
///
/// let gazetteer = GazetteerGeocoder::from_json_str(
///     r#"[{"address": "Depot", "lat": 37.44, "lng": -122.16}]"#,
/// )?;
/// assert_eq!(gazetteer.resolve(" depot ")?, Coord { x: -122.16, y: 37.44 });
/// assert!(matches!(
///     gazetteer.resolve("elsewhere"),
///     Err(GeocodeError::NotFound { .. })
/// ));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GazetteerGeocoder {
    entries: HashMap<String, Coord<f64>>,
}

impl GazetteerGeocoder {
    /// Build from entries, validating every coordinate.
    ///
    /// Repeating an address with the same position is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError::InvalidCoordinate`] or
    /// [`GazetteerError::ConflictingEntry`].
    pub fn from_entries(
        entries: impl IntoIterator<Item = GazetteerEntry>,
    ) -> Result<Self, GazetteerError> {
        let mut table = HashMap::new();
        for entry in entries {
            let location = checked_coordinate(&entry)?;
            match table.entry(lookup_key(&entry.address)) {
                Entry::Vacant(slot) => {
                    slot.insert(location);
                }
                Entry::Occupied(existing) if *existing.get() == location => {}
                Entry::Occupied(_) => {
                    return Err(GazetteerError::ConflictingEntry {
                        address: entry.address,
                    });
                }
            }
        }
        Ok(Self { entries: table })
    }

    /// Parse a JSON gazetteer: either `[{address, lat, lng}, ...]` or an
    /// object with those entries under `points`.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError::Parse`] for malformed JSON and the
    /// validation errors of [`from_entries`](Self::from_entries).
    pub fn from_json_str(json: &str) -> Result<Self, GazetteerError> {
        let document: GazetteerDocument = serde_json::from_str(json)?;
        Self::from_entries(document.into_entries())
    }

    /// Load a JSON gazetteer from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError::Read`] when the file cannot be read, plus
    /// the errors of [`from_json_str`](Self::from_json_str).
    pub fn load(path: &Utf8Path) -> Result<Self, GazetteerError> {
        let json = optiroute_fs::read_to_string(path).map_err(|source| GazetteerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let gazetteer = Self::from_json_str(&json)?;
        log::debug!("loaded {} gazetteer entries from {path}", gazetteer.len());
        Ok(gazetteer)
    }

    /// Number of distinct addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the gazetteer knows no addresses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for GazetteerGeocoder {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        self.entries
            .get(&lookup_key(query))
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                address: query.to_owned(),
            })
    }
}

fn lookup_key(address: &str) -> String {
    address
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn checked_coordinate(entry: &GazetteerEntry) -> Result<Coord<f64>, GazetteerError> {
    let valid = entry.lat.is_finite()
        && entry.lng.is_finite()
        && (-90.0..=90.0).contains(&entry.lat)
        && (-180.0..=180.0).contains(&entry.lng);
    if valid {
        Ok(Coord {
            x: entry.lng,
            y: entry.lat,
        })
    } else {
        Err(GazetteerError::InvalidCoordinate {
            address: entry.address.clone(),
            lat: entry.lat,
            lng: entry.lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn entry(address: &str, lat: f64, lng: f64) -> GazetteerEntry {
        GazetteerEntry {
            address: address.to_owned(),
            lat,
            lng,
        }
    }

    #[fixture]
    fn gazetteer() -> GazetteerGeocoder {
        GazetteerGeocoder::from_entries([
            entry("250 University Ave, Palo Alto, CA", 37.4466, -122.1612),
            entry("Stanford Shopping Center", 37.4430, -122.1710),
        ])
        .expect("valid entries")
    }

    #[rstest]
    #[case("250 University Ave, Palo Alto, CA")]
    #[case("250  university ave,   palo alto, ca")]
    #[case("\t250 University Ave, Palo Alto, CA\n")]
    fn lookups_ignore_case_and_spacing(gazetteer: GazetteerGeocoder, #[case] query: &str) {
        assert_eq!(
            gazetteer.resolve(query),
            Ok(Coord {
                x: -122.1612,
                y: 37.4466
            })
        );
    }

    #[rstest]
    fn unknown_address_is_not_found(gazetteer: GazetteerGeocoder) {
        assert_eq!(
            gazetteer.resolve("  1 Infinite Loop "),
            Err(GeocodeError::NotFound {
                address: "1 Infinite Loop".to_owned()
            })
        );
    }

    #[rstest]
    fn blank_address_is_rejected(gazetteer: GazetteerGeocoder) {
        assert_eq!(gazetteer.resolve("   "), Err(GeocodeError::EmptyAddress));
    }

    #[rstest]
    fn accepts_bare_lists_and_point_documents() {
        let list = GazetteerGeocoder::from_json_str(
            r#"[{"address": "a", "lat": 1.0, "lng": 2.0}, {"address": "b", "lat": 3.0, "lng": 4.0}]"#,
        )
        .expect("bare list");
        let document = GazetteerGeocoder::from_json_str(
            r#"{"name": "trip", "points": [{"address": "a", "lat": 1.0, "lng": 2.0}]}"#,
        )
        .expect("document");

        assert_eq!(list.len(), 2);
        assert_eq!(document.len(), 1);
        assert_eq!(document.resolve("A"), Ok(Coord { x: 2.0, y: 1.0 }));
    }

    #[rstest]
    #[case(91.0, 0.0)]
    #[case(0.0, -180.5)]
    #[case(f64::NAN, 0.0)]
    fn rejects_invalid_coordinates(#[case] lat: f64, #[case] lng: f64) {
        let err = GazetteerGeocoder::from_entries([entry("somewhere", lat, lng)])
            .expect_err("invalid coordinate");

        assert!(matches!(err, GazetteerError::InvalidCoordinate { .. }));
    }

    #[rstest]
    fn duplicates_must_agree() {
        let same = GazetteerGeocoder::from_entries([
            entry("Depot", 1.0, 2.0),
            entry("depot", 1.0, 2.0),
        ])
        .expect("identical duplicates are fine");
        assert_eq!(same.len(), 1);

        let err = GazetteerGeocoder::from_entries([
            entry("Depot", 1.0, 2.0),
            entry("DEPOT", 1.5, 2.0),
        ])
        .expect_err("conflicting duplicates");
        assert!(matches!(err, GazetteerError::ConflictingEntry { .. }));
    }

    #[rstest]
    fn loads_from_disk() {
        let tmp = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("places.json")).expect("utf-8");
        std::fs::write(&path, r#"[{"address": "Depot", "lat": 37.44, "lng": -122.16}]"#)
            .expect("write gazetteer");

        let gazetteer = GazetteerGeocoder::load(&path).expect("loads");

        assert!(!gazetteer.is_empty());
        assert_eq!(gazetteer.resolve("depot"), Ok(Coord { x: -122.16, y: 37.44 }));
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let tmp = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("absent.json")).expect("utf-8");

        let err = GazetteerGeocoder::load(&path).expect_err("missing file");

        assert!(matches!(err, GazetteerError::Read { .. }));
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        let err = GazetteerGeocoder::from_json_str("{ not json").expect_err("malformed");

        assert!(matches!(err, GazetteerError::Parse(_)));
    }
}
