//! # aerowx
//!
//! An in-memory, concurrent store of per-airport weather observations served
//! over HTTP.
//!
//! ## Key Features
//!
//! - **Airport registry**: validated airport records keyed by IATA code
//! - **Lock-free updates**: copy-on-write snapshots installed with compare-and-swap,
//!   so concurrent writes of different measurement kinds never clobber each other
//! - **Nearby queries**: great-circle search for weather around an airport
//! - **Usage statistics**: exact atomic request counters feeding a health report
//!
//! ## Architecture
//!
//! - **Model**: coordinates, airports, measurement kinds and snapshots
//! - **Stores**: [`registry`], [`repository`] and [`tracker`], wired together in [`state`]
//! - **Queries**: [`nearby`] and [`health`]
//! - **API Layer**: [`handlers`] exposes collector and query endpoints

pub mod airport_loader;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod model;
pub mod nearby;
pub mod registry;
pub mod repository;
pub mod state;
pub mod tracker;

pub use config::Config;
pub use error::{Result, WeatherError};
pub use health::HealthReport;
pub use logging::{generate_request_id, init_tracing, log_error};
pub use model::{Airport, AtmosphericSnapshot, Coordinate, DataPoint, MeasurementKind};
pub use state::AppState;
