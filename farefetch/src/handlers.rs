// Subcommand handlers

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use url::Url;

use farefetch_core::{DataError, chart, report, stats, store};
use farefetch_scraper::request::parse_iso_date;
use farefetch_scraper::{BrowserSession, SearchPhase, SearchRequest, SlugTable, run_search};

/// Expand `~` in user-supplied paths.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub async fn handle_scrape(args: &ArgMatches) -> anyhow::Result<()> {
    let origin = args.get_one::<String>("origin").unwrap();
    let destination = args.get_one::<String>("destination").unwrap();
    let departure_date = parse_iso_date(args.get_one::<String>("departure-date").unwrap())?;
    let return_date = args
        .get_one::<String>("return-date")
        .map(|raw| parse_iso_date(raw))
        .transpose()?;
    let headless = args.get_flag("headless");

    let request = SearchRequest::new(origin, destination, departure_date)
        .with_slugs(
            args.get_one::<String>("origin-slug").cloned(),
            args.get_one::<String>("destination-slug").cloned(),
        )
        .with_return_date(return_date)
        .with_headless(headless);

    let slugs = match args.get_one::<String>("slug-map") {
        Some(path) => SlugTable::with_overrides_file(&expand_path(path))?,
        None => SlugTable::builtin(),
    };

    let output = expand_path(args.get_one::<String>("output").unwrap());
    let webdriver_url = args.get_one::<String>("webdriver-url").unwrap();
    Url::parse(webdriver_url).context("invalid --webdriver-url")?;
    let max_wait = Duration::from_secs(*args.get_one::<u64>("max-wait").unwrap());

    println!(
        "\n🛫 Searching {} → {} on {}\n",
        request.origin, request.destination, request.departure_date
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Driving the flight search...");

    let session = BrowserSession::connect(webdriver_url, headless, max_wait).await?;
    let outcome = run_search(&session, &request, &slugs).await;
    session.close().await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    let written = store::append_records(&output, &outcome.records)?;
    if written == 0 {
        anyhow::bail!("all extracted rows failed validation; nothing was appended");
    }

    match outcome.phase {
        SearchPhase::FormAttempt => println!("✓ Results reached via the search form"),
        SearchPhase::UrlFallback => println!("✓ Results reached via direct URL fallback"),
    }
    println!("✓ Appended {} rows to {}", written, output.display());
    println!("  Results page: {}", outcome.results_url);
    Ok(())
}

pub fn handle_analyze(args: &ArgMatches) -> anyhow::Result<()> {
    let input = expand_path(args.get_one::<String>("input").unwrap());
    let reports_dir = expand_path(args.get_one::<String>("reports-dir").unwrap());
    let top_n = *args.get_one::<usize>("top-n").unwrap();

    let records = store::load_records(&input)?;
    print!("{}", report::generate_text_report(&records, top_n));

    std::fs::create_dir_all(&reports_dir)?;

    let by_airline = stats::stats_by_airline(&records);
    let bar_path = reports_dir.join("price_by_airline.png");
    match chart::render_airline_bar_chart(&by_airline, &bar_path) {
        Ok(()) => println!("✓ Bar chart saved to {}", bar_path.display()),
        Err(DataError::InsufficientPlotData(name)) => {
            warn!("no data to plot for {}", name);
            eprintln!("⚠ Skipping {name}: no data to plot");
        }
        Err(err) => return Err(err.into()),
    }

    let heatmap = stats::heatmap_data(&records);
    let heatmap_path = reports_dir.join("price_heatmap.png");
    match chart::render_price_heatmap(&heatmap, &heatmap_path) {
        Ok(()) => println!("✓ Heatmap saved to {}", heatmap_path.display()),
        Err(DataError::InsufficientPlotData(name)) => {
            warn!("no data to plot for {}", name);
            eprintln!("⚠ Skipping {name}: no data to plot");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
