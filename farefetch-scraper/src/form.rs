//! Primary-path form driving.
//!
//! Every lookup walks a candidate selector list so minor DOM changes do
//! not break the flow outright. Any failure here is a
//! [`ScrapeError::FormInteraction`], which the search flow recovers from
//! by switching to direct URL navigation.

use std::fmt::Display;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use fantoccini::elements::Element;
use fantoccini::key::Key;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::request::SearchRequest;
use crate::session::BrowserSession;

const SUGGESTION_SELECTORS: [&str; 3] = [
    "li[data-testid*='suggestion']",
    "li[role='option']",
    "ul[role='listbox'] li",
];

const SUBMIT_SELECTORS: [&str; 4] = [
    "button[data-testid*='search-button']",
    "button[type='submit']",
    "button[class*='search']",
    "form button",
];

const DATE_TRIGGER_SELECTORS: [&str; 5] = [
    "[data-testid*='departure-date']",
    "[data-testid*='datepicker-trigger']",
    "button[id*='departure']",
    "button[data-testid*='flight-date']",
    "[data-testid*='date-input'] button",
];

const DATE_INPUT_SELECTORS: [&str; 5] = [
    "input[data-testid*='departure-date']",
    "[data-testid*='departure-date'] input",
    "input[name*='departure']",
    "input[id*='departure']",
    "input[placeholder*='Gidiş']",
];

#[derive(Debug, Clone, Copy)]
enum LocationRole {
    Origin,
    Destination,
}

impl LocationRole {
    fn key(self) -> &'static str {
        match self {
            LocationRole::Origin => "origin",
            LocationRole::Destination => "destination",
        }
    }

    /// Placeholder/label words used for fuzzy input matching, Turkish
    /// first since that is what the site serves.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            LocationRole::Origin => &["nereden", "origin", "kalkış", "from"],
            LocationRole::Destination => &["nereye", "destination", "varış", "to"],
        }
    }
}

/// Drive the whole search form: both location inputs, the departure (and
/// optional return) date, then submission.
pub async fn fill_search_form(session: &BrowserSession, request: &SearchRequest) -> Result<()> {
    set_location(session, &request.origin, LocationRole::Origin).await?;
    set_location(session, &request.destination, LocationRole::Destination).await?;
    set_dates(session, request.departure_date, request.return_date).await?;
    submit_search(session).await
}

async fn set_location(session: &BrowserSession, value: &str, role: LocationRole) -> Result<()> {
    let key = role.key();
    let preferred = [
        format!("input[data-testid*='{key}']"),
        format!("input[id*='{key}']"),
        format!("input[name*='{key}']"),
        format!("[data-testid*='{key}'] input"),
    ];
    let preferred_refs: Vec<&str> = preferred.iter().map(String::as_str).collect();

    let input = match session
        .wait_for_any(&preferred_refs, Duration::from_secs(5))
        .await
    {
        Some(input) => input,
        None => fuzzy_find_input(session, role)
            .await
            .ok_or_else(|| form_err(key, "unable to locate the search form input"))?,
    };

    input.click().await.map_err(|e| form_err(key, e))?;
    input.clear().await.map_err(|e| form_err(key, e))?;
    input.send_keys(value).await.map_err(|e| form_err(key, e))?;
    debug!("typed {} into the {} input", value, key);

    // Pick the first suggestion; fall back to Enter when the dropdown
    // never shows.
    match session
        .wait_for_any(&SUGGESTION_SELECTORS, Duration::from_secs(5))
        .await
    {
        Some(suggestion) => suggestion.click().await.map_err(|e| form_err(key, e))?,
        None => press_enter(&input).await.map_err(|e| form_err(key, e))?,
    }
    Ok(())
}

/// Fuzzy fallback: scan every visible input for role keywords in its
/// placeholder, aria-label or data-testid.
async fn fuzzy_find_input(session: &BrowserSession, role: LocationRole) -> Option<Element> {
    for input in session.find_all("input").await {
        for attr in ["placeholder", "aria-label", "data-testid"] {
            if let Ok(Some(value)) = input.attr(attr).await {
                let value = value.to_lowercase();
                if role.keywords().iter().any(|kw| value.contains(kw)) {
                    return Some(input);
                }
            }
        }
    }
    None
}

async fn set_dates(
    session: &BrowserSession,
    departure: NaiveDate,
    return_date: Option<NaiveDate>,
) -> Result<()> {
    if let Some(trigger) = session
        .wait_for_any(&DATE_TRIGGER_SELECTORS, Duration::from_secs(5))
        .await
    {
        // Opening the calendar may fail on an already-open picker.
        if let Err(err) = trigger.click().await {
            debug!("date trigger click failed: {}", err);
        }
    }

    apply_date_selection(session, departure).await?;
    if let Some(return_date) = return_date {
        apply_date_selection(session, return_date).await?;
    }
    Ok(())
}

/// Choose a date in the calendar; when no day button can be located,
/// populate the underlying input directly.
async fn apply_date_selection(session: &BrowserSession, date: NaiveDate) -> Result<()> {
    let day_buttons = [
        format!(
            "button[data-day='{}'][data-month='{}']",
            date.day(),
            date.month()
        ),
        format!("button[aria-label*='{}']", date.format("%Y-%m-%d")),
    ];
    let day_button_refs: Vec<&str> = day_buttons.iter().map(String::as_str).collect();

    if let Some(button) = session
        .wait_for_any(&day_button_refs, Duration::from_secs(5))
        .await
    {
        return button
            .click()
            .await
            .map_err(|e| form_err("departure-date", e));
    }

    let input = session
        .find_first(&DATE_INPUT_SELECTORS)
        .await
        .ok_or_else(|| form_err("departure-date", "unable to locate the date input"))?;

    let formatted = date.format("%d.%m.%Y").to_string();
    input
        .click()
        .await
        .map_err(|e| form_err("departure-date", e))?;
    input
        .clear()
        .await
        .map_err(|e| form_err("departure-date", e))?;
    input
        .send_keys(&formatted)
        .await
        .map_err(|e| form_err("departure-date", e))?;
    press_enter(&input)
        .await
        .map_err(|e| form_err("departure-date", e))
}

async fn submit_search(session: &BrowserSession) -> Result<()> {
    let button = session
        .wait_for_any(&SUBMIT_SELECTORS, Duration::from_secs(5))
        .await
        .ok_or_else(|| form_err("submit", "unable to locate the search button"))?;
    button.click().await.map_err(|e| form_err("submit", e))?;
    debug!("search form submitted");
    Ok(())
}

async fn press_enter(element: &Element) -> std::result::Result<(), fantoccini::error::CmdError> {
    element
        .send_keys(&char::from(Key::Enter).to_string())
        .await
}

fn form_err(step: &str, err: impl Display) -> ScrapeError {
    ScrapeError::FormInteraction(format!("{step}: {err}"))
}
