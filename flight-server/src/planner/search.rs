//! Shortest-itinerary search.
//!
//! A label-setting search ordered by total itinerary time. Starting from
//! the origin, the search repeatedly settles the unsettled location reached
//! by the cheapest candidate itinerary, then extends every candidate ending
//! there by every feasible connection leaving it. Because feasibility
//! depends on each candidate's arrival time rather than only its total,
//! all candidates ending at a location are kept and extended, not just the
//! cheapest one.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{Connection, Extension, Itinerary, Location, LocationCode, TimeError};

use super::frontier::Frontier;

/// Error from itinerary search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// A traversed connection has a time that is not HH:MM
    #[error("malformed connection data: {0}")]
    MalformedTime(#[from] TimeError),
}

/// Read-only access to a network of locations and connections.
///
/// This abstraction allows the planner to be tested with mock data.
pub trait Registry {
    /// Find a location by code.
    fn lookup(&self, code: &LocationCode) -> Option<&Location>;

    /// Connections leaving `location`. A stable order gives deterministic
    /// results on ties.
    fn outbound(&self, location: &Location) -> Vec<Arc<Connection>>;
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The shortest itinerary found, if any.
    pub itinerary: Option<Itinerary>,

    /// Number of locations settled, origin included.
    pub settled: usize,

    /// Number of candidate itineraries built.
    pub candidates: usize,
}

impl SearchOutcome {
    /// An outcome with no itinerary and no work done.
    pub fn none() -> Self {
        Self {
            itinerary: None,
            settled: 0,
            candidates: 0,
        }
    }
}

/// Find the minimum-duration itinerary from `origin` to `destination`.
///
/// Returns `Ok(None)` when the endpoints are equal, either code is unknown,
/// or no feasible itinerary exists.
///
/// # Errors
///
/// Returns `Err` if a connection reached by the search has a malformed time.
pub fn find_shortest_itinerary<R: Registry>(
    origin: &LocationCode,
    destination: &LocationCode,
    registry: &R,
) -> Result<Option<Itinerary>, SearchError> {
    Ok(Planner::new(registry).search(origin, destination)?.itinerary)
}

/// Itinerary planner over a registry.
pub struct Planner<'a, R: Registry> {
    registry: &'a R,
}

impl<'a, R: Registry> Planner<'a, R> {
    /// Create a new planner.
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Search for the shortest itinerary between two locations.
    pub fn search(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Result<SearchOutcome, SearchError> {
        if origin == destination {
            debug!(%origin, "Origin equals destination, no itinerary");
            return Ok(SearchOutcome::none());
        }

        let (Some(start), Some(_)) = (
            self.registry.lookup(origin),
            self.registry.lookup(destination),
        ) else {
            debug!(%origin, %destination, "Unknown location, no itinerary");
            return Ok(SearchOutcome::none());
        };

        let mut frontier = Frontier::new();
        let mut settled: HashSet<LocationCode> = HashSet::from([origin.clone()]);
        let mut discovered: HashSet<LocationCode> = HashSet::new();
        let mut current: &Location = start;

        'search: loop {
            let departures = self.registry.outbound(current);
            let is_origin = &current.code == origin;

            trace!(
                location = %current.code,
                departures = departures.len(),
                candidates = frontier.len(),
                "Expanding location"
            );

            // Extensions are collected first and merged after the scan.
            let mut derived = Vec::new();

            for connection in &departures {
                if is_origin {
                    frontier.push(Itinerary::new(Arc::clone(connection))?);
                }

                if settled.contains(connection.destination()) {
                    continue;
                }
                discovered.insert(connection.destination().clone());

                for candidate in frontier.ending_at(&current.code) {
                    match candidate.extend(connection)? {
                        Extension::Feasible(extended) => derived.push(extended),
                        Extension::Infeasible(reason) => {
                            trace!(
                                connection = %connection.id(),
                                %reason,
                                "Connection cannot extend candidate"
                            );
                        }
                    }
                }
            }

            for itinerary in derived {
                frontier.push(itinerary);
            }

            current = loop {
                let Some(next) = frontier.pop_unsettled(&settled) else {
                    break 'search;
                };
                let code = next.destination().clone();
                settled.insert(code.clone());
                discovered.remove(&code);

                match self.registry.lookup(&code) {
                    Some(location) => break location,
                    None => trace!(location = %code, "Settled location missing from registry"),
                }
            };
        }

        let itinerary = frontier.best_between(origin, destination).cloned();

        debug!(
            %origin,
            %destination,
            found = itinerary.is_some(),
            total_mins = itinerary.as_ref().map(Itinerary::total_minutes),
            settled = settled.len(),
            unreached = discovered.len(),
            candidates = frontier.len(),
            "Search complete"
        );

        Ok(SearchOutcome {
            itinerary,
            settled: settled.len(),
            candidates: frontier.len(),
        })
    }
}
