//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;

/// Shared application state.
///
/// The network is read-only once loaded, so every request can search it
/// concurrently with its own planner state.
#[derive(Clone)]
pub struct AppState {
    /// The loaded connection network
    pub network: Arc<Network>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network) -> Self {
        Self {
            network: Arc::new(network),
        }
    }
}
