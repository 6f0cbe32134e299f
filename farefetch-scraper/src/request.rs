use chrono::NaiveDate;

use crate::error::{Result, ScrapeError};

/// One flight search, built from CLI input and consumed by the scraper.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub origin_slug: Option<String>,
    pub destination_slug: Option<String>,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub headless: bool,
}

impl SearchRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            origin_slug: None,
            destination_slug: None,
            departure_date,
            return_date: None,
            headless: false,
        }
    }

    pub fn with_slugs(
        mut self,
        origin_slug: Option<String>,
        destination_slug: Option<String>,
    ) -> Self {
        self.origin_slug = origin_slug;
        self.destination_slug = destination_slug;
        self
    }

    pub fn with_return_date(mut self, return_date: Option<NaiveDate>) -> Self {
        self.return_date = return_date;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

/// Parse a user-supplied ISO date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ScrapeError::InvalidDate(value.to_string()))
}
