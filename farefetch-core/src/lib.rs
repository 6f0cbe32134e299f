pub mod chart;
pub mod error;
pub mod record;
pub mod report;
pub mod stats;
pub mod store;

pub use error::DataError;
pub use record::FlightRecord;

use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        r#"
   __                __     _       _
  / _| __ _ _ __ ___ / _| ___| |_ ___| |__
 | |_ / _` | '__/ _ \ |_ / _ \ __/ __| '_ \
 |  _| (_| | | |  __/  _|  __/ || (__| | | |
 |_|  \__,_|_|  \___|_|  \___|\__\___|_| |_|
"#
        .cyan()
    );
    println!(
        "  farefetch v{} — flight fare scraping and analysis\n",
        env!("CARGO_PKG_VERSION")
    );
}
