//! Train service type.
//!
//! A `Service` is one train on one run date. It starts out empty (just its
//! identity) and is filled in by [`RttClient::populate`], which replaces
//! all timetable data in one step.
//!
//! [`RttClient::populate`]: crate::rtt::RttClient::populate

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

use super::time::{DATE_FORMAT, today};
use super::{CallingPoint, ServiceUid};

/// Timetable data produced by normalizing one service document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedService {
    pub origin: CallingPoint,
    pub destination: CallingPoint,
    pub calling_points: Vec<CallingPoint>,
    pub running: bool,
    pub stp_indicator: Option<String>,
    pub trailing_load: Option<u32>,
}

/// A train service on a specific date.
///
/// Equality and hashing use only `(uid, date)`, the service's natural key;
/// two copies of the same train compare equal whether or not either has
/// been populated.
#[derive(Debug, Clone)]
pub struct Service {
    uid: ServiceUid,
    date: NaiveDate,
    /// First location in the calling pattern
    pub origin: Option<CallingPoint>,
    /// Last location in the calling pattern
    pub destination: Option<CallingPoint>,
    /// Locations between origin and destination, in route order
    pub calling_points: Vec<CallingPoint>,
    /// Whether realtime tracking is active for this run
    pub running: bool,
    /// Schedule type (P = permanent, O = overlay, N = STP new, C = cancelled)
    pub stp_indicator: Option<String>,
    /// Trailing load in tonnes (freight only)
    pub trailing_load: Option<u32>,
}

impl Service {
    /// Create an empty service. A `None` date means today.
    pub fn new(uid: ServiceUid, date: Option<NaiveDate>) -> Self {
        Self {
            uid,
            date: date.unwrap_or_else(today),
            origin: None,
            destination: None,
            calling_points: Vec::new(),
            running: false,
            stp_indicator: None,
            trailing_load: None,
        }
    }

    pub fn uid(&self) -> &ServiceUid {
        &self.uid
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns true once timetable data has been loaded.
    pub fn is_populated(&self) -> bool {
        self.origin.is_some()
    }

    /// Replace all timetable data with freshly normalized data.
    pub fn apply(&mut self, data: PopulatedService) {
        self.origin = Some(data.origin);
        self.destination = Some(data.destination);
        self.calling_points = data.calling_points;
        self.running = data.running;
        self.stp_indicator = data.stp_indicator;
        self.trailing_load = data.trailing_load;
    }

    /// All locations in route order: origin, calling points, destination.
    pub fn locations(&self) -> impl Iterator<Item = &CallingPoint> {
        self.origin
            .iter()
            .chain(self.calling_points.iter())
            .chain(self.destination.iter())
    }

    /// Returns true if any location on the route is cancelled.
    pub fn has_cancellations(&self) -> bool {
        self.locations().any(|cp| cp.cancelled)
    }

    /// Short human-readable description, e.g. `Train W72814 from Leeds to York`.
    pub fn summary(&self) -> String {
        match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => format!(
                "Train {} from {} to {}",
                self.uid, origin.name, destination.name
            ),
            _ => format!("Train {}", self.uid),
        }
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid && self.date == other.date
    }
}

impl Eq for Service {}

impl Hash for Service {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uid.hash(state);
        self.date.hash(state);
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "train {} on {}", self.uid, self.date.format(DATE_FORMAT))
    }
}
