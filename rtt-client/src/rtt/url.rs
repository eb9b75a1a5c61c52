//! RTT request path construction.
//!
//! Paths are pure strings; nothing here touches the network or checks
//! station codes, which the API validates itself.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{DATE_FORMAT, ServiceUid, TIME_FORMAT, today};

/// Default base URL for the RTT JSON API.
pub const DEFAULT_BASE_URL: &str = "https://api.rtt.io/api/v1/json";

/// Builds request URLs for a base URL and endpoint tag.
///
/// The endpoint tag selects the API flavour (`"v1"` for passenger data,
/// `"v2"` for freight where enabled) and is appended to each search kind,
/// e.g. `searchv1` and `servicev1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    base_url: String,
    endpoint: String,
}

impl QueryBuilder {
    /// Create a builder. The endpoint is trimmed and lowercased; a trailing
    /// `/` on the base URL is dropped.
    pub fn new(base_url: &str, endpoint: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: endpoint.trim().to_lowercase(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Path for services calling at `station`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rtt_client::rtt::{DEFAULT_BASE_URL, QueryBuilder};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let q = QueryBuilder::new(DEFAULT_BASE_URL, "v1");
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15);
    ///
    /// assert_eq!(
    ///     q.station_search_path("KGX", date, None, None),
    ///     "https://api.rtt.io/api/v1/json/searchv1/KGX/2024/03/15"
    /// );
    /// assert_eq!(
    ///     q.station_search_path("KGX", date, Some("LDS"), NaiveTime::from_hms_opt(9, 5, 0)),
    ///     "https://api.rtt.io/api/v1/json/searchv1/KGX/to/LDS/2024/03/15/0905"
    /// );
    /// ```
    pub fn station_search_path(
        &self,
        station: &str,
        date: Option<NaiveDate>,
        to_station: Option<&str>,
        at_time: Option<NaiveTime>,
    ) -> String {
        let date = date.unwrap_or_else(today);
        let search = format!("search{}", self.endpoint);
        let url_date = date.format(DATE_FORMAT).to_string();

        let mut parts = vec![self.base_url.as_str(), search.as_str(), station];
        if let Some(to) = to_station {
            parts.extend(["to", to]);
        }
        parts.push(&url_date);
        let mut url = parts.join("/");

        if let Some(time) = at_time {
            url.push('/');
            url.push_str(&time.format(TIME_FORMAT).to_string());
        }

        url
    }

    /// Path for a single service's full calling pattern.
    pub fn service_lookup_path(&self, uid: &ServiceUid, date: Option<NaiveDate>) -> String {
        let date = date.unwrap_or_else(today);
        format!(
            "{}/service{}/{}/{}",
            self.base_url,
            self.endpoint,
            uid.as_str(),
            date.format(DATE_FORMAT)
        )
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, "v1")
    }
}
