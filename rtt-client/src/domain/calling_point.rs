//! Calling point type.
//!
//! A `CallingPoint` is one location on a service's route, either a stop or
//! a passing point, carrying working-timetable ("booked") and realtime
//! times independently.

use std::fmt;

use chrono::{Days, NaiveDateTime};

/// A location a service calls at or passes.
///
/// # Time Semantics
///
/// - Origins have no arrival times; termini have no departure times
/// - For passing points the pass time fills the departure role
/// - `arrival()` / `departure()` prefer realtime over booked and are
///   recomputed from the stored fields on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallingPoint {
    /// Location display name
    pub name: String,
    /// TIPLOC (operational location code)
    pub tiploc: String,
    /// Public 3-letter station code, if the location has one
    pub crs: Option<String>,
    /// Platform number/letter (if known)
    pub platform: Option<String>,
    /// Working-timetable arrival
    pub booked_arrival: Option<NaiveDateTime>,
    /// Working-timetable departure or pass
    pub booked_departure: Option<NaiveDateTime>,
    /// Realtime (estimated or actual) arrival
    pub realtime_arrival: Option<NaiveDateTime>,
    /// Realtime (estimated or actual) departure or pass
    pub realtime_departure: Option<NaiveDateTime>,
    /// Lateness in minutes; negative when early
    pub delay: i32,
    /// Whether this call or pass is cancelled
    pub cancelled: bool,
}

impl CallingPoint {
    /// Creates a calling point with no times. The name is trimmed.
    pub fn new(name: &str, tiploc: impl Into<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            tiploc: tiploc.into(),
            crs: None,
            platform: None,
            booked_arrival: None,
            booked_departure: None,
            realtime_arrival: None,
            realtime_departure: None,
            delay: 0,
            cancelled: false,
        }
    }

    /// Effective arrival: realtime if known, else booked.
    ///
    /// # Examples
    ///
    /// ```
    /// use rtt_client::domain::{CallingPoint, parse_rtt_time};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let mut cp = CallingPoint::new("Reading", "RDNGSTN");
    /// cp.booked_arrival = Some(parse_rtt_time("0900", date).unwrap());
    /// assert_eq!(cp.arrival(), cp.booked_arrival);
    ///
    /// cp.realtime_arrival = Some(parse_rtt_time("0905", date).unwrap());
    /// assert_eq!(cp.arrival(), cp.realtime_arrival);
    /// ```
    pub fn arrival(&self) -> Option<NaiveDateTime> {
        self.realtime_arrival.or(self.booked_arrival)
    }

    /// Effective departure: realtime if known, else booked.
    pub fn departure(&self) -> Option<NaiveDateTime> {
        self.realtime_departure.or(self.booked_departure)
    }

    /// Returns true if the location is a passing point with no booked stop.
    pub fn is_pass(&self) -> bool {
        self.booked_arrival.is_none() && self.booked_departure.is_some()
    }

    /// Move every present time forward by `days`.
    ///
    /// Times that would overflow the calendar are left unchanged.
    pub fn shift_days(&mut self, days: u64) {
        for time in [
            &mut self.booked_arrival,
            &mut self.booked_departure,
            &mut self.realtime_arrival,
            &mut self.realtime_departure,
        ]
        .into_iter()
        .flatten()
        {
            if let Some(shifted) = time.checked_add_days(Days::new(days)) {
                *time = shifted;
            }
        }
    }
}

impl fmt::Display for CallingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        if let Some(arr) = self.arrival() {
            write!(f, " arriving {}", arr.format("%H:%M:%S"))?;
        }
        if let Some(dep) = self.departure() {
            write!(f, " departing {}", dep.format("%H:%M:%S"))?;
        }
        Ok(())
    }
}
