//! Client library for the Realtime Trains API.
//!
//! Builds station-search and service-lookup requests, and turns service
//! documents into `Service` values with ordered, date-resolved calling
//! points.
//!
//! ```no_run
//! use rtt_client::rtt::{RttClient, RttConfig};
//!
//! # async fn run() -> Result<(), rtt_client::rtt::RttError> {
//! let client = RttClient::new(RttConfig::from_env()?)?;
//! for service in client.search("KGX", None, Some("LDS"), None, true).await? {
//!     println!("{}", service.summary());
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod rtt;
