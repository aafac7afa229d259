//! Stream Checker CLI
//!
//! A command-line tool that checks which streaming services carry a movie or TV show, using TMDB.

use clap::Parser;
use colored::Colorize;
use stream_checker::cli::args::Cli;
use stream_checker::cli::commands::{interactive, lookup, providers};
use stream_checker::models::config::Config;
use stream_checker::models::media::SearchScope;
use stream_checker::preflight;
use stream_checker::services::tmdb::TmdbClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Missing credentials are fatal before anything is prompted
    let mut config = Config::from_env()?;
    if let Some(ref region) = cli.region {
        config = config.with_region(region);
    }
    tracing::debug!(
        "Region {}, {} allowed providers, offer types {:?}",
        config.region,
        config.allowed_providers.len(),
        config.offer_types
    );

    let scope: SearchScope = cli.media.parse()?;
    let client = TmdbClient::new(&config)?;

    if cli.check {
        return run_preflight_checks(&client, &config).await;
    }

    if cli.list_providers {
        providers::list_providers(&client, &config, scope, &cli.format).await?;
        return Ok(());
    }

    if cli.is_interactive() {
        interactive::run(&client, &config, scope, &cli.format).await?;
        return Ok(());
    }

    let outcome = match (cli.title.as_deref(), cli.id) {
        (Some(title), _) => lookup::lookup_title(&client, &config, title, scope, &cli.format).await,
        (None, Some(id)) => lookup::lookup_id(&client, &config, id, scope, &cli.format).await,
        (None, None) => Ok(()),
    };

    if let Err(e) = outcome {
        eprintln!("{}", lookup::error_message(&e).red());
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("stream_checker=debug")
    } else {
        EnvFilter::new("stream_checker=info")
    };

    // Logs go to stderr so they never interleave with rendered results
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Run preflight checks and exit non-zero if any fail.
async fn run_preflight_checks(client: &TmdbClient, config: &Config) -> anyhow::Result<()> {
    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(client, config).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    println!("{}", "All checks passed.".green());
    Ok(())
}
