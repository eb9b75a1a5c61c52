//! RTT API response DTOs.
//!
//! These types map directly to the RTT JSON API responses. RTT omits
//! fields rather than sending nulls for most optional data, but sends
//! explicit nulls for lateness, so everything optional is an `Option`.
//! Unknown fields are ignored.

use serde::Deserialize;

/// Response from a `search` request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The station searched from.
    pub location: Option<LocationSummary>,

    /// The station searched to, if filtered.
    pub filter: Option<SearchFilter>,

    /// Matching services. `null` when nothing matches.
    pub services: Option<Vec<ServiceSummary>>,
}

/// Station identity in a search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub name: Option<String>,
    pub crs: Option<String>,
    pub tiploc: Option<String>,
}

/// Destination filter echoed back in a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchFilter {
    pub destination: Option<LocationSummary>,
}

/// One service in a search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    /// RTT service UID.
    pub service_uid: Option<String>,

    /// Run date as `YYYY-MM-DD`.
    pub run_date: Option<String>,

    /// Headcode, e.g. `"1A23"`.
    pub train_identity: Option<String>,

    /// Operator ATOC code.
    pub atoc_code: Option<String>,

    /// Operator name.
    pub atoc_name: Option<String>,

    /// `"train"`, `"bus"` or `"ship"`.
    pub service_type: Option<String>,

    /// Whether this is a passenger service.
    pub is_passenger: Option<bool>,
}

/// Response from a `service` request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub service_uid: Option<String>,

    pub run_date: Option<String>,

    pub train_identity: Option<String>,

    pub atoc_code: Option<String>,

    pub atoc_name: Option<String>,

    /// Schedule type: P, O, N or C.
    pub stp_indicator: Option<String>,

    /// Trailing load in tonnes (freight endpoint only).
    pub trailing_load: Option<u32>,

    /// Present and `true` when realtime tracking is active.
    pub realtime_activated: Option<bool>,

    /// Calling pattern in route order.
    pub locations: Option<Vec<LocationRecord>>,
}

/// A single location in a service's calling pattern.
///
/// Times are `"HHMM"` or `"HHMMSS"` strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Location display name.
    pub description: String,

    /// TIPLOC code.
    pub tiploc: String,

    /// CRS code (only for public stations).
    pub crs: Option<String>,

    pub wtt_booked_arrival: Option<String>,
    pub wtt_booked_departure: Option<String>,
    pub wtt_booked_pass: Option<String>,

    pub realtime_arrival: Option<String>,
    pub realtime_departure: Option<String>,
    pub realtime_pass: Option<String>,

    /// Lateness in minutes against the working timetable.
    pub realtime_wtt_arrival_lateness: Option<i32>,
    pub realtime_wtt_departure_lateness: Option<i32>,

    /// Lateness in minutes against the public timetable.
    pub realtime_gbtt_arrival_lateness: Option<i32>,
    pub realtime_gbtt_departure_lateness: Option<i32>,

    pub realtime_lateness: Option<i32>,

    /// Display hint, e.g. `"CALL"`, `"PASS"`, `"CANCELLED_CALL"`.
    pub display_as: Option<String>,

    /// Realtime display hint; same values as `display_as`.
    pub realtime_display_as: Option<String>,

    /// Platform, if known.
    pub platform: Option<String>,
}
