//! Places selected on the map and the tags they are matched by.

use geo::Coord;

/// A location the user selected on the map.
///
/// Only [`Place::tags`] participates in matching; the remaining fields are
/// carried for display.
///
/// # Examples
/// ```
/// use perkmatch_core::Place;
///
/// let place = Place::new("p1", "Starbucks Gangnam", 37.4979, 127.0276)
///     .with_tags(["cafe", "starbucks"]);
/// assert_eq!(place.location().x, 127.0276);
/// assert_eq!(place.tags.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Provider category label.
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub kind: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Category and brand tags used as the join key against benefits.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl Place {
    /// Construct an untagged place.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: String::new(),
            lat,
            lng,
            tags: Vec::new(),
        }
    }

    /// Replace the place tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// WGS84 position with `x = longitude` and `y = latitude`.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}
