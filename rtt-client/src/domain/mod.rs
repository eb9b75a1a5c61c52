//! Domain types for RTT timetable data.
//!
//! These types are independent of the HTTP layer: a `Service` knows
//! nothing about the client that filled it in.

mod calling_point;
mod service;
mod service_uid;
mod time;

pub use calling_point::CallingPoint;
pub use service::{PopulatedService, Service};
pub use service_uid::{InvalidServiceUid, ServiceUid};
pub use time::{DATE_FORMAT, TIME_FORMAT, TimeError, parse_rtt_time, today};
