//! Flight-card extraction from rendered results HTML.
//!
//! The browser session hands over the page source; everything here is
//! pure HTML parsing, resilient against minor DOM changes through
//! candidate selector lists.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use farefetch_core::FlightRecord;

const CARD_SELECTORS: [&str; 6] = [
    "[data-testid='flight-card']",
    "[data-testid^='flight-card-']",
    "[data-testid*='result-card']",
    "article[data-testid*='flight']",
    "article[data-testid*='result']",
    "div[data-testid*='flight-card']",
];

const DEPARTURE_SELECTORS: [&str; 3] = [
    "[data-testid*='departure-time']",
    "[class*='departure'] [class*='time']",
    "time[data-testid*='departure']",
];

const ARRIVAL_SELECTORS: [&str; 3] = [
    "[data-testid*='arrival-time']",
    "[class*='arrival'] [class*='time']",
    "time[data-testid*='arrival']",
];

const AIRLINE_SELECTORS: [&str; 3] = [
    "[data-testid*='airline-name']",
    "[class*='airline'] span",
    "[class*='carrier'] span",
];

const PRICE_SELECTORS: [&str; 3] = [
    "[data-testid*='price']",
    "[class*='price'] span",
    "[class*='price'] strong",
];

/// Carriers recognised in free text when no airline element matches.
const KNOWN_AIRLINES: [&str; 4] = ["Pegasus", "Turkish Airlines", "AnadoluJet", "SunExpress"];

/// Extract one [`FlightRecord`] per flight card found in `html`. Cards
/// without a parseable price are skipped.
pub fn extract_records(html: &str, origin: &str, destination: &str) -> Vec<FlightRecord> {
    let document = Html::parse_document(html);
    let cards = collect_cards(&document);
    debug!("found {} candidate flight cards", cards.len());

    let mut records = Vec::new();
    for card in cards {
        if let Some(record) = extract_record(card, origin, destination) {
            records.push(record);
        }
    }
    records
}

fn collect_cards<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();
    for selector in CARD_SELECTORS {
        let selector = Selector::parse(selector).unwrap();
        for element in document.select(&selector) {
            if seen.insert(element.id()) {
                cards.push(element);
            }
        }
    }

    if cards.is_empty() {
        let article = Selector::parse("article").unwrap();
        cards = document.select(&article).collect();
    }
    cards
}

fn extract_record(card: ElementRef<'_>, origin: &str, destination: &str) -> Option<FlightRecord> {
    let departure_time = first_match_text(card, &DEPARTURE_SELECTORS);
    let arrival_time = first_match_text(card, &ARRIVAL_SELECTORS);

    let mut airline = first_match_text(card, &AIRLINE_SELECTORS);
    if airline.is_empty() {
        airline = known_airline_in_text(card).unwrap_or_default();
    }

    let mut price_text = first_match_text(card, &PRICE_SELECTORS);
    if price_text.is_empty() {
        price_text = card_text(card);
    }
    let price = parse_price(&price_text)?;

    Some(FlightRecord::new(
        origin,
        destination,
        if airline.is_empty() { "Unknown".to_string() } else { airline },
        price,
        departure_time,
        arrival_time,
    ))
}

/// First non-empty text content among the candidate selectors.
fn first_match_text(card: ElementRef<'_>, selectors: &[&str]) -> String {
    for selector in selectors {
        let selector = Selector::parse(selector).unwrap();
        for element in card.select(&selector) {
            let text: String = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

fn card_text(card: ElementRef<'_>) -> String {
    card.text().collect::<Vec<_>>().join(" ")
}

fn known_airline_in_text(card: ElementRef<'_>) -> Option<String> {
    let text = card_text(card).to_lowercase();
    KNOWN_AIRLINES
        .iter()
        .find(|name| text.contains(&name.to_lowercase()))
        .map(|name| name.to_string())
}

/// Normalize a displayed price to a numeric value.
///
/// Handles Turkish formatting (`"1.250,00 TL"`, `"₺1.250"`) as well as
/// already-numeric text, and is idempotent: re-normalizing the rendering
/// of a previous result yields the same value.
pub fn parse_price(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    if kept.chars().all(|c| !c.is_ascii_digit()) {
        return None;
    }

    let dot = kept.contains('.');
    let comma = kept.contains(',');

    let normalized = if dot && comma {
        // The rightmost separator is the decimal point.
        let last_dot = kept.rfind('.').unwrap_or(0);
        let last_comma = kept.rfind(',').unwrap_or(0);
        if last_comma > last_dot {
            kept.replace('.', "").replace(',', ".")
        } else {
            kept.replace(',', "")
        }
    } else if comma {
        // A lone comma is decimal when at most two digits follow it.
        let tail = kept.rsplit(',').next().unwrap_or("");
        if kept.matches(',').count() == 1 && tail.len() <= 2 {
            kept.replace(',', ".")
        } else {
            kept.replace(',', "")
        }
    } else if dot {
        // A lone dot followed by exactly three digits is a thousands
        // separator in the site's locale; anything else is decimal.
        let tail = kept.rsplit('.').next().unwrap_or("");
        if kept.matches('.').count() > 1 || tail.len() == 3 {
            kept.replace('.', "")
        } else {
            kept.clone()
        }
    } else {
        kept.clone()
    };

    let value: f64 = normalized.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body><main>
          <article data-testid="flight-card-0">
            <div class="airline-row"><span>Pegasus</span></div>
            <span data-testid="departure-time">08:30</span>
            <span data-testid="arrival-time">10:05</span>
            <div class="price-box"><strong data-testid="price-amount">1.250,00 TL</strong></div>
          </article>
          <article data-testid="flight-card-1">
            <div class="airline-row"><span>Turkish Airlines</span></div>
            <span data-testid="departure-time">11:15</span>
            <span data-testid="arrival-time">12:50</span>
            <div class="price-box"><strong data-testid="price-amount">₺2.449,99</strong></div>
          </article>
          <article data-testid="flight-card-2">
            <div class="airline-row"><span>SunExpress</span></div>
            <span data-testid="departure-time">21:40</span>
            <span data-testid="arrival-time">23:15</span>
            <div class="price-box"><strong data-testid="price-amount">Sold out</strong></div>
          </article>
        </main></body></html>
    "#;

    #[test]
    fn extracts_one_record_per_priced_card() {
        let records = extract_records(RESULTS_PAGE, "İstanbul", "Lefkoşa");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].airline, "Pegasus");
        assert!((records[0].price - 1250.0).abs() < 1e-9);
        assert_eq!(records[0].departure_time, "08:30");
        assert_eq!(records[0].arrival_time, "10:05");
        assert_eq!(records[0].origin, "İstanbul");

        assert_eq!(records[1].airline, "Turkish Airlines");
        assert!((records[1].price - 2449.99).abs() < 1e-9);
    }

    #[test]
    fn airline_falls_back_to_known_names_in_card_text() {
        let html = r#"
            <article data-testid="flight-card-0">
              <p>Operated by AnadoluJet, non-stop</p>
              <span data-testid="departure-time">06:10</span>
              <span data-testid="price-amount">990 TL</span>
            </article>
        "#;
        let records = extract_records(html, "İstanbul", "Lefkoşa");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].airline, "AnadoluJet");
    }

    #[test]
    fn pages_without_cards_yield_nothing() {
        let records = extract_records("<html><body><p>no flights</p></body></html>", "A", "B");
        assert!(records.is_empty());
    }

    #[test]
    fn turkish_price_format_normalizes() {
        assert_eq!(parse_price("₺1.250,00"), Some(1250.0));
        assert_eq!(parse_price("1.250,00 TL"), Some(1250.0));
        assert_eq!(parse_price("2.449,99 TL"), Some(2449.99));
        assert_eq!(parse_price("1.250"), Some(1250.0));
        assert_eq!(parse_price("990 TL"), Some(990.0));
        assert_eq!(parse_price("1250,5"), Some(1250.5));
    }

    #[test]
    fn price_normalization_is_idempotent() {
        for text in ["₺1.250,00", "1250.00", "990", "2449.99"] {
            let first = parse_price(text).unwrap();
            let second = parse_price(&format!("{first:.2}")).unwrap();
            assert!(
                (first - second).abs() < 1e-9,
                "{text}: {first} != {second}"
            );
        }
    }

    #[test]
    fn garbage_prices_are_rejected() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("Sold out"), None);
        assert_eq!(parse_price("TL"), None);
    }
}
