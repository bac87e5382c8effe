//! Web layer for the itinerary planner.
//!
//! Provides read-only HTTP endpoints for browsing the network and finding
//! itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
