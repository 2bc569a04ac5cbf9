//! Open Charge Map (OCM) registry client.
//!
//! This module provides an HTTP client for the Open Charge Map POI API,
//! the community-maintained registry the station directory is synced from.
//!
//! Key characteristics of OCM:
//! - Authentication is a `key` query parameter, not a header
//! - Queries are per-country (`countrycode=RS`), capped by `maxresults`
//! - Records are sparse: any field may be missing, including coordinates
//! - `StatusType.IsOperational` is the only status signal

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{OcmClient, OcmConfig};
pub use convert::{convert_poi, convert_pois, normalize_town};
pub use error::OcmError;
pub use mock::MockOcmClient;
pub use types::{AddressInfo, Poi, StatusType};
