//! Web layer for the charger map server.
//!
//! Provides the JSON endpoints the map frontend consumes: listing,
//! proximity ranking, geolocation reporting and manual sync.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
