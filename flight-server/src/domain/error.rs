//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from ingestion and HTTP errors.

use super::{LocationCode, TimeError};

/// Errors from validating a complete itinerary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ItineraryError {
    /// Itinerary has no connections
    #[error("itinerary must have at least one connection")]
    Empty,

    /// Consecutive connections don't meet at the same location
    #[error("connection arriving at {0} is followed by one departing {1}")]
    Disconnected(LocationCode, LocationCode),

    /// Next connection leaves before (or as) the previous one arrives
    #[error("layover at {at} is {layover_mins} minutes; must be positive")]
    LayoverNotPositive { at: LocationCode, layover_mins: i64 },

    /// A connection carries a malformed time
    #[error(transparent)]
    Time(#[from] TimeError),
}
