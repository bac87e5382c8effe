//! Itinerary types.
//!
//! An `Itinerary` is a feasible chain of connections from an origin to a
//! destination, together with its cumulative duration. Itineraries are
//! values: extending one produces a new itinerary and leaves the original
//! untouched, so many candidates can share a prefix during search.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use super::{ClockTime, Connection, ItineraryError, LocationCode, TimeError, layover_minutes};

/// Why a connection cannot extend an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Infeasible {
    /// The connection does not leave from where the itinerary ends.
    #[error("itinerary ends at {at} but connection departs from {next_origin}")]
    Disconnected {
        at: LocationCode,
        next_origin: LocationCode,
    },

    /// The connection departs at or before the itinerary's arrival.
    #[error("layover of {layover_mins} minutes is not positive")]
    LayoverNotPositive { layover_mins: i64 },
}

/// Outcome of trying to extend an itinerary by one connection.
#[derive(Debug, Clone)]
pub enum Extension {
    /// The extended itinerary.
    Feasible(Itinerary),
    /// The connection cannot follow this itinerary.
    Infeasible(Infeasible),
}

impl Extension {
    /// Returns the extended itinerary, if feasible.
    pub fn feasible(self) -> Option<Itinerary> {
        match self {
            Extension::Feasible(itinerary) => Some(itinerary),
            Extension::Infeasible(_) => None,
        }
    }
}

/// An ordered, feasible chain of connections.
///
/// # Invariants
///
/// - At least one connection
/// - Consecutive connections meet (destination of one = origin of next)
/// - Every layover between consecutive connections is strictly positive
/// - `total_time` = sum of connection durations + sum of layovers
#[derive(Debug, Clone)]
pub struct Itinerary {
    connections: Vec<Arc<Connection>>,
    first: Arc<Connection>,
    last: Arc<Connection>,
    layovers: Vec<i64>,
    total: Duration,
    start_time: ClockTime,
    end_time: ClockTime,
}

impl Itinerary {
    /// Start an itinerary from a single connection.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the connection's departure or arrival time is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use flight_server::domain::{Connection, ConnectionId, Itinerary, LocationCode};
    ///
    /// let a = LocationCode::parse("A").unwrap();
    /// let b = LocationCode::parse("B").unwrap();
    /// let seed = Arc::new(Connection::new(ConnectionId(1), a, b, 60, "08:00", "09:00"));
    ///
    /// let itinerary = Itinerary::new(seed).unwrap();
    /// assert_eq!(itinerary.total_minutes(), 60);
    /// assert_eq!(itinerary.start_time().to_string(), "08:00");
    /// assert_eq!(itinerary.end_time().to_string(), "09:00");
    /// ```
    pub fn new(seed: Arc<Connection>) -> Result<Self, TimeError> {
        let start_time = seed.departure_time()?;
        let end_time = seed.arrival_time()?;

        Ok(Self {
            total: seed.duration(),
            connections: vec![Arc::clone(&seed)],
            first: Arc::clone(&seed),
            last: seed,
            layovers: Vec::new(),
            start_time,
            end_time,
        })
    }

    /// Build an itinerary from a full chain of connections, checking every
    /// link.
    pub fn from_connections(connections: Vec<Arc<Connection>>) -> Result<Self, ItineraryError> {
        let mut iter = connections.into_iter();
        let seed = iter.next().ok_or(ItineraryError::Empty)?;
        let mut itinerary = Itinerary::new(seed)?;

        for next in iter {
            itinerary = match itinerary.extend(&next)? {
                Extension::Feasible(extended) => extended,
                Extension::Infeasible(Infeasible::Disconnected { at, next_origin }) => {
                    return Err(ItineraryError::Disconnected(at, next_origin));
                }
                Extension::Infeasible(Infeasible::LayoverNotPositive { layover_mins }) => {
                    return Err(ItineraryError::LayoverNotPositive {
                        at: next.origin().clone(),
                        layover_mins,
                    });
                }
            };
        }

        Ok(itinerary)
    }

    /// Try to append `next` to this itinerary.
    ///
    /// Feasible only when `next` departs from this itinerary's destination
    /// strictly after it arrives there. The new itinerary's total adds the
    /// connection's duration and the layover; this itinerary is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for malformed time data on `next`. An impossible
    /// link is reported as [`Extension::Infeasible`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use flight_server::domain::{Connection, ConnectionId, Itinerary, LocationCode};
    ///
    /// let code = |s| LocationCode::parse(s).unwrap();
    /// let ab = Arc::new(Connection::new(ConnectionId(1), code("A"), code("B"), 60, "08:00", "09:00"));
    /// let bc = Arc::new(Connection::new(ConnectionId(2), code("B"), code("C"), 90, "10:00", "11:30"));
    ///
    /// let first = Itinerary::new(ab).unwrap();
    /// let both = first.extend(&bc).unwrap().feasible().unwrap();
    ///
    /// assert_eq!(both.total_minutes(), 60 + 60 + 90);
    /// assert_eq!(first.leg_count(), 1);
    /// ```
    pub fn extend(&self, next: &Arc<Connection>) -> Result<Extension, TimeError> {
        if next.origin() != self.destination() {
            return Ok(Extension::Infeasible(Infeasible::Disconnected {
                at: self.destination().clone(),
                next_origin: next.origin().clone(),
            }));
        }

        let departure = next.departure_time()?;
        let arrival = next.arrival_time()?;

        let layover = layover_minutes(self.end_time, departure);
        if layover <= 0 {
            return Ok(Extension::Infeasible(Infeasible::LayoverNotPositive {
                layover_mins: layover,
            }));
        }

        let mut connections = Vec::with_capacity(self.connections.len() + 1);
        connections.extend(self.connections.iter().cloned());
        connections.push(Arc::clone(next));

        let mut layovers = self.layovers.clone();
        layovers.push(layover);

        Ok(Extension::Feasible(Itinerary {
            connections,
            first: Arc::clone(&self.first),
            last: Arc::clone(next),
            layovers,
            total: self.total + next.duration() + Duration::minutes(layover),
            start_time: self.start_time,
            end_time: arrival,
        }))
    }

    /// Returns all connections in order.
    pub fn connections(&self) -> &[Arc<Connection>] {
        &self.connections
    }

    /// The first connection.
    pub fn first(&self) -> &Arc<Connection> {
        &self.first
    }

    /// The last connection.
    pub fn last(&self) -> &Arc<Connection> {
        &self.last
    }

    /// Where the itinerary starts.
    pub fn origin(&self) -> &LocationCode {
        self.first.origin()
    }

    /// Where the itinerary ends.
    pub fn destination(&self) -> &LocationCode {
        self.last.destination()
    }

    /// Departure time of the first connection.
    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    /// Arrival time of the last connection.
    pub fn end_time(&self) -> ClockTime {
        self.end_time
    }

    /// Time in the air plus time on the ground between connections.
    pub fn total_time(&self) -> Duration {
        self.total
    }

    /// [`total_time`](Self::total_time) in whole minutes.
    pub fn total_minutes(&self) -> i64 {
        self.total.num_minutes()
    }

    /// Number of connections.
    pub fn leg_count(&self) -> usize {
        self.connections.len()
    }

    /// Layover before each connection after the first, in minutes.
    pub fn layovers(&self) -> &[i64] {
        &self.layovers
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for connection in &self.connections {
            writeln!(f, "{connection}")?;
        }
        let minutes = self.total_minutes();
        writeln!(
            f,
            "Total time traveling: {} hours and {} minutes.",
            minutes / 60,
            minutes % 60
        )
    }
}
