//! Domain types for the itinerary planner.
//!
//! This module contains the value types that describe a connection
//! network and the itineraries built from it. Types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod clock;
mod code;
mod connection;
mod error;
mod itinerary;
mod location;

pub use clock::{ClockTime, TimeError, layover_minutes};
pub use code::{InvalidLocationCode, LocationCode};
pub use connection::{Connection, ConnectionId};
pub use error::ItineraryError;
pub use itinerary::{Extension, Infeasible, Itinerary};
pub use location::Location;
