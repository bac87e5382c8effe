//! Scheduled connections between locations.

use std::fmt;

use chrono::Duration;

use super::{ClockTime, LocationCode, TimeError};

/// Identifier of a connection within a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u32);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed, scheduled edge between two locations, e.g. a flight.
///
/// Departure and arrival times are kept as supplied by the data source and
/// parsed when the connection is used, so a corrupt time only fails the
/// searches that actually reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    origin: LocationCode,
    destination: LocationCode,
    duration_mins: u32,
    departure: String,
    arrival: String,
}

impl Connection {
    /// Create a new connection.
    pub fn new(
        id: ConnectionId,
        origin: LocationCode,
        destination: LocationCode,
        duration_mins: u32,
        departure: impl Into<String>,
        arrival: impl Into<String>,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            duration_mins,
            departure: departure.into(),
            arrival: arrival.into(),
        }
    }

    /// Sequential id assigned at load time.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Where the connection departs from.
    pub fn origin(&self) -> &LocationCode {
        &self.origin
    }

    /// Where the connection arrives.
    pub fn destination(&self) -> &LocationCode {
        &self.destination
    }

    /// In-transit time.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_mins))
    }

    /// In-transit time in whole minutes.
    pub fn duration_mins(&self) -> u32 {
        self.duration_mins
    }

    /// Departure time exactly as supplied.
    pub fn departure_str(&self) -> &str {
        &self.departure
    }

    /// Arrival time exactly as supplied.
    pub fn arrival_str(&self) -> &str {
        &self.arrival
    }

    /// Parsed departure time of day.
    pub fn departure_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse_hhmm(&self.departure)
    }

    /// Parsed arrival time of day.
    pub fn arrival_time(&self) -> Result<ClockTime, TimeError> {
        ClockTime::parse_hhmm(&self.arrival)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Connection {}: {} {} -> {} {} ({} min)",
            self.id, self.origin, self.departure, self.destination, self.arrival, self.duration_mins
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    #[test]
    fn accessors() {
        let c = Connection::new(ConnectionId(1001), code("MSN"), code("ORD"), 55, "08:00", "08:55");

        assert_eq!(c.id(), ConnectionId(1001));
        assert_eq!(c.origin(), &code("MSN"));
        assert_eq!(c.destination(), &code("ORD"));
        assert_eq!(c.duration(), Duration::minutes(55));
        assert_eq!(c.departure_time().unwrap().to_string(), "08:00");
        assert_eq!(c.arrival_time().unwrap().to_string(), "08:55");
    }

    #[test]
    fn malformed_time_fails_lazily() {
        let c = Connection::new(ConnectionId(1), code("MSN"), code("ORD"), 55, "8am", "08:55");

        assert_eq!(c.departure_str(), "8am");
        assert!(c.departure_time().is_err());
        assert!(c.arrival_time().is_ok());
    }

    #[test]
    fn display() {
        let c = Connection::new(ConnectionId(1001), code("MSN"), code("ORD"), 55, "08:00", "08:55");
        assert_eq!(c.to_string(), "Connection 1001: MSN 08:00 -> ORD 08:55 (55 min)");
    }
}
