//! Realtime Trains (RTT) API client.
//!
//! This module provides an HTTP client for the RTT JSON API, which serves
//! working-timetable and realtime data for UK rail services.
//!
//! Key characteristics of RTT:
//! - Service UIDs are **stable** for a run date, so a service can be looked
//!   up again later
//! - Times are bare "HHMM" or "HHMMSS" strings with no date; overnight
//!   services are corrected after parsing
//! - Authentication is HTTP basic with per-account credentials

mod client;
mod convert;
mod error;
mod types;
mod url;

pub use client::{RttClient, RttConfig};
pub use convert::{
    CANCELLED_MARKERS, ConversionError, convert_location, convert_search, convert_service,
};
pub use error::RttError;
pub use types::{
    LocationRecord, LocationSummary, SearchFilter, SearchResponse, ServiceResponse,
    ServiceSummary,
};
pub use url::{DEFAULT_BASE_URL, QueryBuilder};
