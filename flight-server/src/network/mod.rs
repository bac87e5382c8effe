//! In-memory connection network.
//!
//! A `Network` holds every location and the connections leaving each one.
//! It is built once, through [`NetworkBuilder`] or [`load`], and is
//! read-only afterwards, so it can be shared across concurrent searches.

pub mod load;

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Connection, ConnectionId, Location, LocationCode};
use crate::planner::Registry;

/// Errors from assembling a network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A location with this code was already added
    #[error("duplicate location {0}")]
    DuplicateLocation(LocationCode),

    /// A connection refers to a location that was never added
    #[error("connection {id} refers to unknown location {code}")]
    UnknownLocation { id: ConnectionId, code: LocationCode },
}

/// A read-only network of locations and scheduled connections.
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Locations in insertion order.
    locations: Vec<Location>,
    /// Map from code to position in `locations`.
    index: HashMap<LocationCode, usize>,
    /// All connections in insertion order.
    connections: Vec<Arc<Connection>>,
    /// Outbound connections per location, in insertion order.
    departures: HashMap<LocationCode, Vec<Arc<Connection>>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a location by code.
    pub fn location(&self, code: &LocationCode) -> Option<&Location> {
        self.index.get(code).map(|&i| &self.locations[i])
    }

    /// All locations, in the order they were added.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All connections, in the order they were added.
    pub fn connections(&self) -> &[Arc<Connection>] {
        &self.connections
    }

    /// Connections leaving `code`.
    pub fn departures_from(&self, code: &LocationCode) -> &[Arc<Connection>] {
        self.departures.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Connections arriving at `code`.
    pub fn arrivals_to(&self, code: &LocationCode) -> Vec<Arc<Connection>> {
        self.connections
            .iter()
            .filter(|c| c.destination() == code)
            .cloned()
            .collect()
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if there are no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Registry for Network {
    fn lookup(&self, code: &LocationCode) -> Option<&Location> {
        self.location(code)
    }

    fn outbound(&self, location: &Location) -> Vec<Arc<Connection>> {
        self.departures_from(&location.code).to_vec()
    }
}

/// Builder for assembling a network.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Network,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location. Codes must be unique.
    pub fn add_location(&mut self, location: Location) -> Result<&mut Self, NetworkError> {
        if self.inner.index.contains_key(&location.code) {
            return Err(NetworkError::DuplicateLocation(location.code));
        }
        self.inner
            .index
            .insert(location.code.clone(), self.inner.locations.len());
        self.inner.locations.push(location);
        Ok(self)
    }

    /// Add a connection between two previously added locations.
    pub fn add_connection(&mut self, connection: Connection) -> Result<&mut Self, NetworkError> {
        for code in [connection.origin(), connection.destination()] {
            if !self.inner.index.contains_key(code) {
                return Err(NetworkError::UnknownLocation {
                    id: connection.id(),
                    code: code.clone(),
                });
            }
        }

        let connection = Arc::new(connection);
        self.inner
            .departures
            .entry(connection.origin().clone())
            .or_default()
            .push(Arc::clone(&connection));
        self.inner.connections.push(connection);
        Ok(self)
    }

    /// Returns true if a location with this code has been added.
    pub fn contains(&self, code: &LocationCode) -> bool {
        self.inner.index.contains_key(code)
    }

    /// Build the network.
    pub fn build(self) -> Network {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    fn loc(s: &str) -> Location {
        Location::new(code(s), format!("{s} Airport"), "City", "ST")
    }

    fn conn(id: u32, from: &str, to: &str) -> Connection {
        Connection::new(ConnectionId(id), code(from), code(to), 60, "08:00", "09:00")
    }

    fn sample() -> Network {
        let mut builder = NetworkBuilder::new();
        for s in ["MSN", "ORD", "DTW"] {
            builder.add_location(loc(s)).unwrap();
        }
        builder
            .add_connection(conn(1, "MSN", "ORD"))
            .unwrap()
            .add_connection(conn(2, "MSN", "DTW"))
            .unwrap()
            .add_connection(conn(3, "ORD", "DTW"))
            .unwrap();
        builder.build()
    }

    #[test]
    fn empty_network() {
        let network = Network::new();
        assert!(network.is_empty());
        assert_eq!(network.len(), 0);
        assert_eq!(network.connection_count(), 0);
        assert!(network.location(&code("MSN")).is_none());
        assert!(network.departures_from(&code("MSN")).is_empty());
    }

    #[test]
    fn lookup_and_listing() {
        let network = sample();

        assert_eq!(network.len(), 3);
        assert_eq!(network.connection_count(), 3);
        assert_eq!(network.location(&code("ORD")).unwrap().name, "ORD Airport");

        let codes: Vec<_> = network.locations().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["MSN", "ORD", "DTW"]);
    }

    #[test]
    fn departures_and_arrivals_keep_order() {
        let network = sample();

        let ids: Vec<_> = network
            .departures_from(&code("MSN"))
            .iter()
            .map(|c| c.id().0)
            .collect();
        assert_eq!(ids, [1, 2]);

        let ids: Vec<_> = network
            .arrivals_to(&code("DTW"))
            .iter()
            .map(|c| c.id().0)
            .collect();
        assert_eq!(ids, [2, 3]);

        assert!(network.departures_from(&code("DTW")).is_empty());
        assert!(network.arrivals_to(&code("MSN")).is_empty());
    }

    #[test]
    fn registry_impl() {
        let network = sample();
        let msn = network.lookup(&code("MSN")).unwrap();
        assert_eq!(network.outbound(msn).len(), 2);
        assert!(network.lookup(&code("XXX")).is_none());
    }

    #[test]
    fn duplicate_location_rejected() {
        let mut builder = NetworkBuilder::new();
        builder.add_location(loc("MSN")).unwrap();
        assert_eq!(
            builder.add_location(loc("MSN")).unwrap_err(),
            NetworkError::DuplicateLocation(code("MSN"))
        );
    }

    #[test]
    fn connection_to_unknown_location_rejected() {
        let mut builder = NetworkBuilder::new();
        builder.add_location(loc("MSN")).unwrap();

        let err = builder.add_connection(conn(7, "MSN", "ORD")).unwrap_err();
        assert_eq!(
            err,
            NetworkError::UnknownLocation {
                id: ConnectionId(7),
                code: code("ORD"),
            }
        );
        assert_eq!(
            err.to_string(),
            "connection 7 refers to unknown location ORD"
        );
    }
}
