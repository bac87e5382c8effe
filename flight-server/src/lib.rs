//! Flight itinerary planner server.
//!
//! Loads a network of airports and scheduled daily flights, and answers:
//! "what is the quickest way to get from here to there?"

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
