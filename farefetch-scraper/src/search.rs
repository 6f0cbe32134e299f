//! The search flow: form attempt, URL fallback, extraction.
//!
//! The two ways of reaching the results page are modelled as explicit
//! phases rather than nested error branches, so each phase's entry and
//! exit conditions stay independently testable.

use std::time::Duration;

use tracing::{info, warn};

use farefetch_core::FlightRecord;

use crate::error::{Result, ScrapeError};
use crate::extract;
use crate::form;
use crate::request::SearchRequest;
use crate::session::BrowserSession;
use crate::slug::SlugTable;

pub const BASE_URL: &str = "https://www.enuygun.com/ucak-bileti/";

const RESULT_CARD_SELECTORS: [&str; 5] = [
    "[data-testid*='flight-card']",
    "[data-testid*='result-card']",
    "article[data-testid*='result']",
    "article[data-testid*='flight']",
    "main article",
];

/// Which path produced the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    FormAttempt,
    UrlFallback,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub phase: SearchPhase,
    pub results_url: String,
    pub records: Vec<FlightRecord>,
}

/// Build the deep-linked results URL for the fallback phase. Explicit
/// slugs take precedence over derived ones; the output is a pure
/// function of the request and the slug table.
pub fn build_results_url(request: &SearchRequest, slugs: &SlugTable) -> String {
    let origin = request
        .origin_slug
        .clone()
        .unwrap_or_else(|| slugs.resolve(&request.origin));
    let destination = request
        .destination_slug
        .clone()
        .unwrap_or_else(|| slugs.resolve(&request.destination));

    let mut url = format!(
        "{BASE_URL}{origin}-{destination}/?gidis={}",
        request.departure_date.format("%Y-%m-%d")
    );
    if let Some(return_date) = request.return_date {
        url.push_str(&format!("&donus={}", return_date.format("%Y-%m-%d")));
    }
    url
}

/// Run one complete search against an established browser session and
/// return the extracted rows together with the phase that produced them.
pub async fn run_search(
    session: &BrowserSession,
    request: &SearchRequest,
    slugs: &SlugTable,
) -> Result<SearchOutcome> {
    session.goto(BASE_URL).await?;
    session.dismiss_cookie_banner().await;

    let mut phase = SearchPhase::FormAttempt;
    match form::fill_search_form(session, request).await {
        Ok(()) => {
            info!("search form submitted, waiting for results");
            // Let the page kick off its results request before polling.
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Err(err @ ScrapeError::FormInteraction(_)) => {
            warn!("form path failed ({}), falling back to direct URL", err);
            phase = SearchPhase::UrlFallback;
            let fallback_url = build_results_url(request, slugs);
            info!("navigating to {}", fallback_url);
            session.goto(&fallback_url).await?;
            session.dismiss_cookie_banner().await;
        }
        Err(other) => return Err(other),
    }

    wait_for_results(session).await?;

    let html = session.page_source().await?;
    let records = extract::extract_records(&html, &request.origin, &request.destination);
    if records.is_empty() {
        return Err(ScrapeError::Extraction);
    }

    let results_url = session.current_url().await.unwrap_or_default();
    info!("extracted {} flight rows via {:?}", records.len(), phase);
    Ok(SearchOutcome {
        phase,
        results_url,
        records,
    })
}

async fn wait_for_results(session: &BrowserSession) -> Result<()> {
    let budget = session.max_wait().max(Duration::from_secs(1));
    session
        .wait_for_any(&RESULT_CARD_SELECTORS, budget)
        .await
        .map(|_| ())
        .ok_or_else(|| {
            ScrapeError::Navigation(format!(
                "results page did not render any flight cards within {}s",
                budget.as_secs()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use url::Url;

    fn request() -> SearchRequest {
        SearchRequest::new(
            "İstanbul",
            "Lefkoşa",
            NaiveDate::from_ymd_opt(2026, 8, 21).unwrap(),
        )
    }

    #[test]
    fn explicit_slugs_take_precedence_over_derivation() {
        let request = request().with_slugs(Some("istanbul-saw".into()), Some("ercan".into()));
        let url = build_results_url(&request, &SlugTable::builtin());
        assert_eq!(
            url,
            "https://www.enuygun.com/ucak-bileti/istanbul-saw-ercan/?gidis=2026-08-21"
        );
    }

    #[test]
    fn derived_slugs_fill_in_when_none_are_given() {
        let url = build_results_url(&request(), &SlugTable::builtin());
        assert_eq!(
            url,
            "https://www.enuygun.com/ucak-bileti/istanbul-lefkosa/?gidis=2026-08-21"
        );
    }

    #[test]
    fn url_building_is_deterministic() {
        let slugs = SlugTable::builtin();
        let first = build_results_url(&request(), &slugs);
        let second = build_results_url(&request(), &slugs);
        assert_eq!(first, second);
    }

    #[test]
    fn return_date_appends_the_second_query_parameter() {
        let request =
            request().with_return_date(Some(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()));
        let url = build_results_url(&request, &SlugTable::builtin());
        assert!(url.ends_with("?gidis=2026-08-21&donus=2026-08-28"));
    }

    #[test]
    fn built_urls_are_well_formed() {
        let url = build_results_url(&request(), &SlugTable::builtin());
        let parsed = Url::parse(&url).expect("valid URL");
        assert_eq!(parsed.host_str(), Some("www.enuygun.com"));
        assert!(parsed.path().starts_with("/ucak-bileti/"));
    }
}
