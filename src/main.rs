//! Recipebox CLI: recipes, favorites, and weekly meal planning.

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "recipebox",
    version,
    about = "Recipes, favorites, and a drag-and-drop weekly meal planner"
)]
struct Cli {
    #[command(flatten)]
    opts: recipebox::cli::GlobalOpts,

    /// Log filter (e.g. "debug", "recipebox=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: recipebox::cli::Commands,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = recipebox::cli::dispatch(cli.command, &cli.opts) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
