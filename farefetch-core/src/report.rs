// Textual report over the flight dataset

use crate::record::FlightRecord;
use crate::stats::{self, AirlineStats, PriceSummary};

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Build the full statistics report as one printable string.
pub fn generate_text_report(records: &[FlightRecord], top_n: usize) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("\n                     FAREFETCH FLIGHT PRICE REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    let routes: Vec<String> = {
        let mut routes: Vec<String> = records
            .iter()
            .map(|r| format!("{} → {}", r.origin, r.destination))
            .collect();
        routes.sort();
        routes.dedup();
        routes
    };
    report.push_str(&format!("Rows analysed: {}\n", records.len()));
    report.push_str(&format!("Routes:        {}\n", routes.join(", ")));

    if let Some(overall) = stats::overall_summary(records) {
        report.push_str("\nOverall prices (TRY):\n");
        report.push_str(&format!(
            "  mean {:>10}   min {:>10}   max {:>10}\n",
            format_price(overall.mean),
            format_price(overall.min),
            format_price(overall.max)
        ));
    }

    let by_airline = stats::stats_by_airline(records);
    if !by_airline.is_empty() {
        report.push('\n');
        report.push_str(RULE);
        report.push_str("\nPRICES BY AIRLINE\n");
        report.push_str(RULE);
        report.push_str("\n\n");
        report.push_str(&airline_table(&by_airline));
    }

    let by_slot = stats::stats_by_slot(records);
    if !by_slot.is_empty() {
        report.push('\n');
        report.push_str(RULE);
        report.push_str("\nPRICES BY DEPARTURE TIME SLOT\n");
        report.push_str(RULE);
        report.push_str("\n\n");
        report.push_str(&slot_table(&by_slot));
    }

    if let Some(best) = stats::cheapest(records) {
        report.push('\n');
        report.push_str(RULE);
        report.push_str("\nMOST COST-EFFECTIVE FLIGHT\n");
        report.push_str(RULE);
        report.push_str("\n\n");
        report.push_str(&format!(
            "  {} at {} ({} → {}), {} TRY\n",
            best.airline,
            display_or_dash(&best.departure_time),
            best.origin,
            best.destination,
            format_price(best.price)
        ));

        let cheapest = stats::cheapest_n(records, top_n);
        if cheapest.len() > 1 {
            report.push_str(&format!("\nCheapest {} rows:\n", cheapest.len()));
            for (idx, row) in cheapest.iter().enumerate() {
                report.push_str(&format!(
                    "  {}. {:<24} {:>5} → {:>5}  {:>10} TRY\n",
                    idx + 1,
                    row.airline,
                    display_or_dash(&row.departure_time),
                    display_or_dash(&row.arrival_time),
                    format_price(row.price)
                ));
            }
        }
    }

    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
    report
}

fn airline_table(stats: &[AirlineStats]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:<24} {:>6} {:>12} {:>12} {:>12}\n",
        "Airline", "Rows", "Mean", "Min", "Max"
    ));
    for entry in stats {
        out.push_str(&format!(
            "  {:<24} {:>6} {:>12} {:>12} {:>12}\n",
            entry.airline,
            entry.summary.count,
            format_price(entry.summary.mean),
            format_price(entry.summary.min),
            format_price(entry.summary.max)
        ));
    }
    out
}

fn slot_table(stats: &[(&'static str, PriceSummary)]) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:<14} {:>6} {:>12}\n", "Slot", "Rows", "Mean"));
    for (slot, summary) in stats {
        out.push_str(&format!(
            "  {:<14} {:>6} {:>12}\n",
            slot,
            summary.count,
            format_price(summary.mean)
        ));
    }
    out
}

pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

fn display_or_dash(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() { "—" } else { trimmed }
}
