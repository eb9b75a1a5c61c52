//! Conversion from RTT DTOs to domain types.
//!
//! Turns one service document into an ordered calling pattern with
//! resolved datetimes and midnight rollover fixed up.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use tracing::trace;

use crate::domain::{
    CallingPoint, PopulatedService, Service, ServiceUid, TimeError, parse_rtt_time,
};

use super::types::{LocationRecord, SearchResponse, ServiceResponse};

/// A realtime time this far from its booked time has crossed midnight
/// relative to it.
const ROLLOVER_THRESHOLD_HOURS: i64 = 6;

/// `displayAs` values that mark a cancelled location.
pub const CANCELLED_MARKERS: [&str; 2] = ["CANCELLED_CALL", "CANCELLED_PASS"];

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// No locations, so no origin or destination
    #[error("service has no locations")]
    EmptyLocations,

    /// A time field could not be parsed
    #[error("invalid {field} at {tiploc}: {source}")]
    InvalidTime {
        field: &'static str,
        tiploc: String,
        #[source]
        source: TimeError,
    },

    /// A required field was absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Lateness fields, in priority order. The first non-null value wins.
fn lateness_fields(loc: &LocationRecord) -> [Option<i32>; 5] {
    [
        loc.realtime_wtt_arrival_lateness,
        loc.realtime_wtt_departure_lateness,
        loc.realtime_gbtt_arrival_lateness,
        loc.realtime_gbtt_departure_lateness,
        loc.realtime_lateness,
    ]
}

/// Build unpopulated services from a station search response.
///
/// Each service takes its own `runDate` when present, else `search_date`.
/// A missing `services` list means no matches.
pub fn convert_search(
    response: &SearchResponse,
    search_date: NaiveDate,
) -> Result<Vec<Service>, ConversionError> {
    let summaries = response.services.as_deref().unwrap_or(&[]);

    summaries
        .iter()
        .map(|summary| -> Result<Service, ConversionError> {
            let uid = summary
                .service_uid
                .as_deref()
                .and_then(|s| ServiceUid::parse(s).ok())
                .ok_or(ConversionError::MissingField("serviceUid"))?;
            let date = summary
                .run_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .unwrap_or(search_date);
            Ok(Service::new(uid, Some(date)))
        })
        .collect()
}

/// Normalize a service document.
///
/// `date` is the service's nominal run date; every time is first anchored
/// to it, then locations that fall before the origin's booked departure
/// are moved to the following day.
pub fn convert_service(
    response: &ServiceResponse,
    date: NaiveDate,
) -> Result<PopulatedService, ConversionError> {
    let records = response.locations.as_deref().unwrap_or(&[]);

    let mut locations = records
        .iter()
        .map(|record| convert_location(record, date))
        .collect::<Result<Vec<_>, _>>()?;

    let destination = locations.pop().ok_or(ConversionError::EmptyLocations)?;
    let (origin, calling_points) = if locations.is_empty() {
        (destination.clone(), Vec::new())
    } else {
        let origin = locations.remove(0);
        (origin, locations)
    };

    let mut service = PopulatedService {
        origin,
        destination,
        calling_points,
        running: response.realtime_activated == Some(true),
        stp_indicator: response.stp_indicator.clone(),
        trailing_load: response.trailing_load,
    };

    correct_rollover(&mut service);

    Ok(service)
}

/// Convert a single location record, anchoring every time to `date`.
pub fn convert_location(
    record: &LocationRecord,
    date: NaiveDate,
) -> Result<CallingPoint, ConversionError> {
    let parse = |field: &'static str,
                 value: Option<&str>|
     -> Result<Option<NaiveDateTime>, ConversionError> {
        value
            .map(|s| {
                parse_rtt_time(s, date).map_err(|source| ConversionError::InvalidTime {
                    field,
                    tiploc: record.tiploc.clone(),
                    source,
                })
            })
            .transpose()
    };

    let mut cp = CallingPoint::new(&record.description, record.tiploc.clone());
    cp.crs = record.crs.clone();
    cp.platform = record.platform.clone();

    cp.booked_arrival = parse("wttBookedArrival", record.wtt_booked_arrival.as_deref())?;
    cp.booked_departure = match record.wtt_booked_departure.as_deref() {
        Some(dep) => parse("wttBookedDeparture", Some(dep))?,
        None => parse("wttBookedPass", record.wtt_booked_pass.as_deref())?,
    };

    cp.realtime_arrival = parse("realtimeArrival", record.realtime_arrival.as_deref())?;
    cp.realtime_departure = match record.realtime_departure.as_deref() {
        Some(dep) => parse("realtimeDeparture", Some(dep))?,
        None => parse("realtimePass", record.realtime_pass.as_deref())?,
    };

    cp.delay = lateness_fields(record).into_iter().flatten().next().unwrap_or(0);
    cp.cancelled = is_cancelled(record);

    Ok(cp)
}

fn is_cancelled(record: &LocationRecord) -> bool {
    [&record.display_as, &record.realtime_display_as]
        .into_iter()
        .flatten()
        .any(|marker| CANCELLED_MARKERS.contains(&marker.as_str()))
}

/// Move locations that sort before the origin's booked departure onto
/// the next day, then line each realtime time up with its booked time.
///
/// Calling points are judged by booked departure, the destination by
/// booked arrival. Without an origin departure no location is moved, but
/// realtime times are still aligned.
fn correct_rollover(service: &mut PopulatedService) {
    if let Some(day_zero) = service.origin.booked_departure {
        for cp in &mut service.calling_points {
            if cp.booked_departure.is_some_and(|dep| dep < day_zero) {
                trace!(tiploc = %cp.tiploc, "calling point after midnight");
                cp.shift_days(1);
            }
        }

        let destination = &mut service.destination;
        if destination.booked_arrival.is_some_and(|arr| arr < day_zero) {
            trace!(tiploc = %destination.tiploc, "destination after midnight");
            destination.shift_days(1);
        }
    }

    align_realtime(&mut service.origin);
    service.calling_points.iter_mut().for_each(align_realtime);
    align_realtime(&mut service.destination);
}

/// Realtime times are compared with the booked time of the same event,
/// falling back to the location's other booked time.
fn align_realtime(cp: &mut CallingPoint) {
    let arrival_ref = cp.booked_arrival.or(cp.booked_departure);
    let departure_ref = cp.booked_departure.or(cp.booked_arrival);
    align_to(&mut cp.realtime_arrival, arrival_ref, &cp.tiploc);
    align_to(&mut cp.realtime_departure, departure_ref, &cp.tiploc);
}

/// Move `live` by a day when it sits more than the threshold away from
/// `booked`: a late train past midnight, or an early one before it.
fn align_to(live: &mut Option<NaiveDateTime>, booked: Option<NaiveDateTime>, tiploc: &str) {
    let (Some(time), Some(booked)) = (live.as_mut(), booked) else {
        return;
    };
    let threshold = Duration::hours(ROLLOVER_THRESHOLD_HOURS);

    let shifted = if *time < booked - threshold {
        time.checked_add_days(Days::new(1))
    } else if *time > booked + threshold {
        time.checked_sub_days(Days::new(1))
    } else {
        None
    };

    if let Some(shifted) = shifted {
        trace!(tiploc, from = %time, to = %shifted, "realtime crossed midnight");
        *time = shifted;
    }
}
