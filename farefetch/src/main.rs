use colored::Colorize;
use farefetch::commands::command_argument_builder;
use farefetch::handlers;
use farefetch_core::print_banner;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("scrape", sub_matches)) => handlers::handle_scrape(sub_matches).await,
        Some(("analyze", sub_matches)) => handlers::handle_analyze(sub_matches),
        None => return, // no subcommand provided, just show the banner
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(err) = result {
        eprintln!("{} {err:#}", "✗".red());
        std::process::exit(1);
    }
}
