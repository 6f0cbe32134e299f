use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One scraped flight result row. Immutable once written; persisted as a
/// single CSV row. Field order matches the on-disk header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    pub origin: String,
    pub destination: String,
    pub airline: String,
    pub price: f64,
    /// Departure time as shown on the results page, usually "HH:MM".
    pub departure_time: String,
    pub arrival_time: String,
    /// RFC 3339 UTC capture timestamp.
    pub scraped_at: String,
}

impl FlightRecord {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        airline: impl Into<String>,
        price: f64,
        departure_time: impl Into<String>,
        arrival_time: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            airline: airline.into(),
            price,
            departure_time: departure_time.into(),
            arrival_time: arrival_time.into(),
            scraped_at: Utc::now().to_rfc3339(),
        }
    }

    /// Dataset invariant: non-empty route and airline, parseable
    /// non-negative price. Rows failing this are dropped before writing.
    pub fn is_valid(&self) -> bool {
        !self.origin.trim().is_empty()
            && !self.destination.trim().is_empty()
            && !self.airline.trim().is_empty()
            && self.price.is_finite()
            && self.price >= 0.0
    }
}
