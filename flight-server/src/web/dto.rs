//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Connection, Itinerary, Location};

/// Request to find an itinerary.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    /// Origin location code
    pub from: String,

    /// Destination location code
    pub to: String,
}

/// A location in listings.
#[derive(Debug, Serialize)]
pub struct LocationResult {
    pub code: String,
    pub name: String,
    pub city: String,
    pub region: String,
}

impl LocationResult {
    /// Convert from a domain Location.
    pub fn from_location(location: &Location) -> Self {
        Self {
            code: location.code.to_string(),
            name: location.name.clone(),
            city: location.city.clone(),
            region: location.region.clone(),
        }
    }
}

/// Response listing locations.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationResult>,
}

/// A connection in listings and itineraries.
#[derive(Debug, Serialize)]
pub struct ConnectionResult {
    /// Connection id
    pub id: u32,

    /// Origin location code
    pub origin: String,

    /// Destination location code
    pub destination: String,

    /// Departure time as recorded, HH:MM
    pub departure: String,

    /// Arrival time as recorded, HH:MM
    pub arrival: String,

    /// Flight duration in minutes
    pub duration_mins: u32,
}

impl ConnectionResult {
    /// Convert from a domain Connection.
    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            id: connection.id().0,
            origin: connection.origin().to_string(),
            destination: connection.destination().to_string(),
            departure: connection.departure_str().to_string(),
            arrival: connection.arrival_str().to_string(),
            duration_mins: connection.duration_mins(),
        }
    }
}

/// Response listing connections.
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<ConnectionResult>,
}

/// An itinerary in search results.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub origin: String,
    pub destination: String,

    /// Departure of the first leg, HH:MM
    pub start_time: String,

    /// Arrival of the last leg, HH:MM
    pub end_time: String,

    /// Flight time plus layovers
    pub total_minutes: i64,

    /// Legs in travel order
    pub legs: Vec<ConnectionResult>,

    /// Layover before each leg after the first, in minutes
    pub layovers: Vec<i64>,

    /// Human-readable summary
    pub summary: String,
}

impl ItineraryResult {
    /// Convert from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin: itinerary.origin().to_string(),
            destination: itinerary.destination().to_string(),
            start_time: itinerary.start_time().to_string(),
            end_time: itinerary.end_time().to_string(),
            total_minutes: itinerary.total_minutes(),
            legs: itinerary
                .connections()
                .iter()
                .map(|c| ConnectionResult::from_connection(c))
                .collect(),
            layovers: itinerary.layovers().to_vec(),
            summary: itinerary.to_string(),
        }
    }
}

/// Response to an itinerary request.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    /// Whether an itinerary exists
    pub found: bool,

    /// The shortest itinerary, if any
    pub itinerary: Option<ItineraryResult>,
}

impl ItineraryResponse {
    pub fn from_option(itinerary: Option<&Itinerary>) -> Self {
        Self {
            found: itinerary.is_some(),
            itinerary: itinerary.map(ItineraryResult::from_itinerary),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
