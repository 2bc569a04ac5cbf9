//! Domain types for the charging-station directory.
//!
//! This module contains the core domain model types that represent
//! validated charger data. Types that carry an invariant (identifiers,
//! country codes) enforce it at construction time, so code that receives
//! these types can trust their validity.

mod charger;
mod country;
mod position;

pub use charger::{ChargerId, ChargerStatus, InvalidChargerId, Station};
pub use country::{CountryCode, InvalidCountryCode};
pub use position::{Coordinates, UserPosition};
