//! Descriptive statistics over the flight dataset.

use std::collections::BTreeMap;

use crate::record::FlightRecord;

/// Six 4-hour departure slots, in display order.
pub const TIME_SLOTS: [&str; 6] = [
    "00:00-03:59",
    "04:00-07:59",
    "08:00-11:59",
    "12:00-15:59",
    "16:00-19:59",
    "20:00-23:59",
];

/// Bucket for rows whose departure time cannot be parsed.
pub const UNKNOWN_SLOT: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl PriceSummary {
    fn from_prices(prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }
        let sum: f64 = prices.iter().sum();
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            count: prices.len(),
            mean: sum / prices.len() as f64,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AirlineStats {
    pub airline: String,
    pub summary: PriceSummary,
}

/// Mean-price matrix across (time slot × airline), the heatmap input.
/// `cells[row][col]` pairs `slots[row]` with `airlines[col]`; `None`
/// marks combinations with no observations.
#[derive(Debug, Clone)]
pub struct HeatmapData {
    pub airlines: Vec<String>,
    pub slots: Vec<&'static str>,
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Parse an "HH:MM" string into minutes since midnight.
pub fn parse_time_to_minutes(time: &str) -> Option<u32> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Map minutes since midnight onto one of the [`TIME_SLOTS`].
pub fn time_slot(minutes: Option<u32>) -> &'static str {
    match minutes {
        Some(m) if m < 24 * 60 => TIME_SLOTS[(m / 240) as usize],
        _ => UNKNOWN_SLOT,
    }
}

pub fn slot_for_record(record: &FlightRecord) -> &'static str {
    time_slot(parse_time_to_minutes(&record.departure_time))
}

pub fn overall_summary(records: &[FlightRecord]) -> Option<PriceSummary> {
    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    PriceSummary::from_prices(&prices)
}

/// Per-airline price summaries, sorted by ascending mean price.
pub fn stats_by_airline(records: &[FlightRecord]) -> Vec<AirlineStats> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.airline.as_str())
            .or_default()
            .push(record.price);
    }

    let mut stats: Vec<AirlineStats> = grouped
        .into_iter()
        .filter_map(|(airline, prices)| {
            PriceSummary::from_prices(&prices).map(|summary| AirlineStats {
                airline: airline.to_string(),
                summary,
            })
        })
        .collect();
    stats.sort_by(|a, b| a.summary.mean.total_cmp(&b.summary.mean));
    stats
}

/// Mean price per departure slot, in slot display order. Slots with no
/// observations are omitted; `Unknown` comes last when present.
pub fn stats_by_slot(records: &[FlightRecord]) -> Vec<(&'static str, PriceSummary)> {
    let mut grouped: BTreeMap<&'static str, Vec<f64>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(slot_for_record(record))
            .or_default()
            .push(record.price);
    }

    let mut out = Vec::new();
    for slot in TIME_SLOTS.iter().chain(std::iter::once(&UNKNOWN_SLOT)) {
        if let Some(prices) = grouped.get(slot)
            && let Some(summary) = PriceSummary::from_prices(prices)
        {
            out.push((*slot, summary));
        }
    }
    out
}

/// Build the (slot × airline) mean-price matrix. Airlines are ordered
/// alphabetically; slot rows follow display order, with `Unknown`
/// included only when some row needs it.
pub fn heatmap_data(records: &[FlightRecord]) -> HeatmapData {
    let mut airlines: Vec<String> = records.iter().map(|r| r.airline.clone()).collect();
    airlines.sort();
    airlines.dedup();

    let has_unknown = records
        .iter()
        .any(|r| slot_for_record(r) == UNKNOWN_SLOT);
    let mut slots: Vec<&'static str> = TIME_SLOTS.to_vec();
    if has_unknown {
        slots.push(UNKNOWN_SLOT);
    }

    let mut sums = vec![vec![0.0f64; airlines.len()]; slots.len()];
    let mut counts = vec![vec![0usize; airlines.len()]; slots.len()];
    for record in records {
        let slot = slot_for_record(record);
        let row = slots.iter().position(|s| *s == slot);
        let col = airlines.iter().position(|a| *a == record.airline);
        if let (Some(row), Some(col)) = (row, col) {
            sums[row][col] += record.price;
            counts[row][col] += 1;
        }
    }

    let cells = sums
        .into_iter()
        .zip(counts)
        .map(|(row_sums, row_counts)| {
            row_sums
                .into_iter()
                .zip(row_counts)
                .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                .collect()
        })
        .collect();

    HeatmapData { airlines, slots, cells }
}

/// The single cheapest row, the "most cost-effective" highlight.
pub fn cheapest(records: &[FlightRecord]) -> Option<&FlightRecord> {
    records.iter().min_by(|a, b| a.price.total_cmp(&b.price))
}

/// The `n` cheapest rows, ascending by price.
pub fn cheapest_n(records: &[FlightRecord], n: usize) -> Vec<&FlightRecord> {
    let mut sorted: Vec<&FlightRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(airline: &str, price: f64, departure: &str) -> FlightRecord {
        FlightRecord::new("İstanbul", "Lefkoşa", airline, price, departure, "12:00")
    }

    #[test]
    fn parses_well_formed_times() {
        assert_eq!(parse_time_to_minutes("00:00"), Some(0));
        assert_eq!(parse_time_to_minutes("08:30"), Some(510));
        assert_eq!(parse_time_to_minutes("23:59"), Some(1439));
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(parse_time_to_minutes(""), None);
        assert_eq!(parse_time_to_minutes("25:00"), None);
        assert_eq!(parse_time_to_minutes("08:65"), None);
        assert_eq!(parse_time_to_minutes("soon"), None);
    }

    #[test]
    fn buckets_cover_the_day() {
        assert_eq!(time_slot(Some(0)), "00:00-03:59");
        assert_eq!(time_slot(Some(239)), "00:00-03:59");
        assert_eq!(time_slot(Some(240)), "04:00-07:59");
        assert_eq!(time_slot(Some(720)), "12:00-15:59");
        assert_eq!(time_slot(Some(1439)), "20:00-23:59");
        assert_eq!(time_slot(None), UNKNOWN_SLOT);
    }

    #[test]
    fn airline_means_match_hand_computed_values() {
        let records = vec![
            record("Pegasus", 100.0, "06:10"),
            record("Pegasus", 200.0, "09:40"),
            record("Turkish Airlines", 150.0, "06:20"),
            record("Turkish Airlines", 250.0, "18:00"),
            record("SunExpress", 300.0, "21:30"),
            record("SunExpress", 100.0, "23:10"),
        ];

        let stats = stats_by_airline(&records);
        assert_eq!(stats.len(), 3);

        // Sorted by ascending mean: Pegasus 150, then the two at 200.
        assert_eq!(stats[0].airline, "Pegasus");
        assert!((stats[0].summary.mean - 150.0).abs() < 1e-9);
        assert!((stats[1].summary.mean - 200.0).abs() < 1e-9);
        assert!((stats[2].summary.mean - 200.0).abs() < 1e-9);

        let sun = stats
            .iter()
            .find(|s| s.airline == "SunExpress")
            .expect("SunExpress stats");
        assert!((sun.summary.min - 100.0).abs() < 1e-9);
        assert!((sun.summary.max - 300.0).abs() < 1e-9);
        assert_eq!(sun.summary.count, 2);
    }

    #[test]
    fn overall_summary_spans_all_rows() {
        let records = vec![record("A", 100.0, "08:00"), record("B", 300.0, "09:00")];
        let summary = overall_summary(&records).expect("summary");
        assert!((summary.mean - 200.0).abs() < 1e-9);
        assert!((summary.min - 100.0).abs() < 1e-9);
        assert!((summary.max - 300.0).abs() < 1e-9);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn overall_summary_of_empty_dataset_is_none() {
        assert!(overall_summary(&[]).is_none());
    }

    #[test]
    fn slot_stats_follow_display_order() {
        let records = vec![
            record("A", 100.0, "21:00"),
            record("A", 200.0, "06:00"),
            record("B", 300.0, "garbled"),
        ];
        let slots = stats_by_slot(&records);
        let labels: Vec<&str> = slots.iter().map(|(slot, _)| *slot).collect();
        assert_eq!(labels, vec!["04:00-07:59", "20:00-23:59", UNKNOWN_SLOT]);
    }

    #[test]
    fn heatmap_cells_hold_per_combination_means() {
        let records = vec![
            record("Pegasus", 100.0, "06:00"),
            record("Pegasus", 300.0, "06:30"),
            record("Turkish Airlines", 400.0, "13:00"),
        ];
        let data = heatmap_data(&records);
        assert_eq!(data.airlines, vec!["Pegasus", "Turkish Airlines"]);
        assert_eq!(data.slots.len(), TIME_SLOTS.len());

        let morning = data.slots.iter().position(|s| *s == "04:00-07:59").unwrap();
        let midday = data.slots.iter().position(|s| *s == "12:00-15:59").unwrap();
        assert!((data.cells[morning][0].unwrap() - 200.0).abs() < 1e-9);
        assert!((data.cells[midday][1].unwrap() - 400.0).abs() < 1e-9);
        assert!(data.cells[morning][1].is_none());
    }

    #[test]
    fn cheapest_picks_the_lowest_price() {
        let records = vec![
            record("A", 220.0, "08:00"),
            record("B", 180.0, "10:00"),
            record("C", 400.0, "12:00"),
        ];
        assert_eq!(cheapest(&records).unwrap().airline, "B");
        let top2 = cheapest_n(&records, 2);
        assert_eq!(top2.len(), 2);
        assert_eq!(top2[0].airline, "B");
        assert_eq!(top2[1].airline, "A");
    }
}
