//! Network locations.

use std::fmt;

use super::LocationCode;

/// A node in the connection network, e.g. an airport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Unique code.
    pub code: LocationCode,
    /// Full name, e.g. "Dane County Regional".
    pub name: String,
    /// City the location serves.
    pub city: String,
    /// State or region.
    pub region: String,
}

impl Location {
    /// Create a new location.
    pub fn new(
        code: LocationCode,
        name: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            city: city.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, {})",
            self.code, self.name, self.city, self.region
        )
    }
}
