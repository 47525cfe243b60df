//! Domain types shared by the stores, the query engine and the transport.

pub mod airport;
pub mod coordinate;
pub mod measurement;
pub mod snapshot;

pub use airport::{validate_iata, Airport, DaylightSavings};
pub use coordinate::{is_valid_latitude, is_valid_longitude, Coordinate};
pub use measurement::{DataPoint, MeasurementKind, MeasurementRange};
pub use snapshot::AtmosphericSnapshot;
