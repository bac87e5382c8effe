//! Itinerary planner.
//!
//! This module implements the search that answers: "what is the quickest
//! chain of connections from this location to that one?"
//!
//! The search is a priority-ordered, label-setting traversal keyed on total
//! itinerary time, where a connection may only follow another if it
//! departs strictly after the previous arrival.

mod frontier;
mod search;


pub use search::{Planner, Registry, SearchError, SearchOutcome, find_shortest_itinerary};
