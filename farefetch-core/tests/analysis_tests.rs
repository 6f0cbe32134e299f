// End-to-end analyzer path: CSV in, report text and chart files out

use farefetch_core::record::FlightRecord;
use farefetch_core::{chart, report, stats, store};

fn fixture_rows() -> Vec<FlightRecord> {
    vec![
        FlightRecord::new("İstanbul", "Lefkoşa", "Pegasus", 1250.0, "08:30", "10:05"),
        FlightRecord::new("İstanbul", "Lefkoşa", "Pegasus", 1350.0, "21:40", "23:15"),
        FlightRecord::new("İstanbul", "Lefkoşa", "Turkish Airlines", 1900.0, "11:15", "12:50"),
        FlightRecord::new("İstanbul", "Lefkoşa", "Turkish Airlines", 2100.0, "06:05", "07:40"),
        FlightRecord::new("İstanbul", "Lefkoşa", "SunExpress", 990.0, "13:20", "14:55"),
        FlightRecord::new("İstanbul", "Lefkoşa", "SunExpress", 1010.0, "18:45", "20:20"),
    ]
}

#[test]
fn csv_round_trip_feeds_the_full_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("analysis").join("flight_data.csv");
    let reports_dir = dir.path().join("analysis").join("reports");

    store::append_records(&csv_path, &fixture_rows()).unwrap();
    let records = store::load_records(&csv_path).unwrap();
    assert_eq!(records.len(), 6);

    // Three airlines, two rows each; means are hand-computed.
    let by_airline = stats::stats_by_airline(&records);
    assert_eq!(by_airline.len(), 3);
    assert_eq!(by_airline[0].airline, "SunExpress");
    assert!((by_airline[0].summary.mean - 1000.0).abs() < 1e-9);
    assert_eq!(by_airline[1].airline, "Pegasus");
    assert!((by_airline[1].summary.mean - 1300.0).abs() < 1e-9);
    assert_eq!(by_airline[2].airline, "Turkish Airlines");
    assert!((by_airline[2].summary.mean - 2000.0).abs() < 1e-9);

    let text = report::generate_text_report(&records, 5);
    assert!(text.contains("Rows analysed: 6"));
    assert!(text.contains("SunExpress"));
    assert!(text.contains("990.00")); // cheapest row highlight

    std::fs::create_dir_all(&reports_dir).unwrap();
    let bar_path = reports_dir.join("price_by_airline.png");
    chart::render_airline_bar_chart(&by_airline, &bar_path).unwrap();

    let heatmap = stats::heatmap_data(&records);
    let heatmap_path = reports_dir.join("price_heatmap.png");
    chart::render_price_heatmap(&heatmap, &heatmap_path).unwrap();

    assert!(bar_path.exists());
    assert!(heatmap_path.exists());
}

#[test]
fn empty_dataset_stops_before_any_chart_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("flight_data.csv");
    std::fs::write(
        &csv_path,
        "origin,destination,airline,price,departure_time,arrival_time,scraped_at\n\
         İstanbul,Lefkoşa,Pegasus,not-a-price,08:30,10:05,2026-08-01T10:00:00Z\n",
    )
    .unwrap();

    assert!(store::load_records(&csv_path).is_err());
    // The analyzer never reaches chart rendering in this case; the
    // reports directory stays untouched.
    assert!(!dir.path().join("reports").exists());
}
