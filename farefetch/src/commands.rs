use crate::CLAP_STYLING;
use clap::{arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("farefetch")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("farefetch")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scrape")
                .about(
                    "Drive a browser flight search and append the extracted results to the \
                CSV dataset.",
                )
                .arg(
                    arg!(--"origin" <CITY>)
                        .required(true)
                        .help("Origin city or airport name"),
                )
                .arg(
                    arg!(--"destination" <CITY>)
                        .required(true)
                        .help("Destination city or airport name"),
                )
                .arg(
                    arg!(--"origin-slug" <SLUG>)
                        .required(false)
                        .help("Slug override for the origin when falling back to direct URL navigation"),
                )
                .arg(
                    arg!(--"destination-slug" <SLUG>)
                        .required(false)
                        .help("Slug override for the destination when falling back to direct URL navigation"),
                )
                .arg(
                    arg!(--"departure-date" <DATE>)
                        .required(true)
                        .help("Departure date in YYYY-MM-DD format"),
                )
                .arg(
                    arg!(--"return-date" <DATE>)
                        .required(false)
                        .help("Return date in YYYY-MM-DD format"),
                )
                .arg(arg!(--"headless" "Run the browser in headless mode").required(false))
                .arg(
                    arg!(--"output" <PATH>)
                        .required(false)
                        .default_value("analysis/flight_data.csv")
                        .help("Output CSV file path"),
                )
                .arg(
                    arg!(--"webdriver-url" <URL>)
                        .required(false)
                        .default_value("http://localhost:9515")
                        .help("WebDriver server to attach the browser session to"),
                )
                .arg(
                    arg!(--"slug-map" <PATH>)
                        .required(false)
                        .help("JSON file of extra slug overrides, merged over the built-in table"),
                )
                .arg(
                    arg!(--"max-wait" <SECS>)
                        .required(false)
                        .value_parser(clap::value_parser!(u64))
                        .default_value("45")
                        .help("Maximum wait time for dynamic elements (seconds)"),
                ),
        )
        .subcommand(
            command!("analyze")
                .about(
                    "Compute price statistics over the scraped CSV dataset and render the \
                report charts.",
                )
                .arg(
                    arg!(--"input" <PATH>)
                        .required(false)
                        .default_value("analysis/flight_data.csv")
                        .help("Path to the scraped flight data CSV"),
                )
                .arg(
                    arg!(--"reports-dir" <DIR>)
                        .required(false)
                        .default_value("analysis/reports")
                        .help("Directory to store generated charts"),
                )
                .arg(
                    arg!(--"top-n" <N>)
                        .required(false)
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5")
                        .help("Number of cheapest rows to display"),
                ),
        )
}
