//! Charging-station map server.
//!
//! Syncs charging-station records from the Open Charge Map registry,
//! serves them over a JSON API, and ranks stations by approximate
//! distance from the user's live position.

pub mod cache;
pub mod directory;
pub mod domain;
pub mod geo;
pub mod ocm;
pub mod proximity;
pub mod tracker;
pub mod web;
