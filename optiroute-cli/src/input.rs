//! Parse stop lists: one address or `lat, lng` pair per line.

use geo::Coord;

/// One line of a stop list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Stop {
    /// Text to geocode.
    Address(String),
    /// A raw coordinate, added without geocoding.
    Location(Coord<f64>),
}

/// A stop and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumberedStop {
    pub(crate) line: usize,
    pub(crate) stop: Stop,
}

/// Parse every non-blank line of `text`.
///
/// Lines holding two comma-separated numbers, optionally in parentheses
/// (`37.44, -122.16` or `(37.44, -122.16)`), are latitude/longitude pairs;
/// anything else is an address.
pub(crate) fn parse_stops(text: &str) -> Vec<NumberedStop> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }
            let stop = parse_lat_lng(line)
                .map_or_else(|| Stop::Address(line.to_owned()), Stop::Location);
            Some(NumberedStop {
                line: index.saturating_add(1),
                stop,
            })
        })
        .collect()
}

fn parse_lat_lng(line: &str) -> Option<Coord<f64>> {
    let inner = line
        .strip_prefix('(')
        .map_or(line, |rest| rest.strip_suffix(')').unwrap_or(rest));
    let (lat_text, lng_text) = inner.split_once(',')?;
    let lat = lat_text.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let lng = lng_text.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(Coord { x: lng, y: lat })
}
