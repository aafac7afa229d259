//! One-shot lookups and result rendering.

use crate::core::finder;
use crate::error::ErrorKind;
use crate::models::config::Config;
use crate::models::media::{QueryResult, SearchScope};
use crate::services::tmdb::TmdbClient;
use crate::{Error, Result};
use colored::Colorize;
use std::io::Write;

/// Look up a title by name and print its streaming options.
pub async fn lookup_title(
    client: &TmdbClient,
    config: &Config,
    query: &str,
    scope: SearchScope,
    format: &str,
) -> Result<()> {
    let result = finder::find_streaming_options(client, config, query, scope).await?;
    let mut stdout = std::io::stdout().lock();
    write_result(&mut stdout, &result, format)
}

/// Look up a title by TMDB ID and print its streaming options.
pub async fn lookup_id(
    client: &TmdbClient,
    config: &Config,
    id: u64,
    scope: SearchScope,
    format: &str,
) -> Result<()> {
    let media_type = scope.media_type().ok_or_else(|| {
        Error::InvalidArgument("--id needs --media movie or --media tv".to_string())
    })?;

    let result = finder::find_by_id(client, config, id, media_type).await?;
    let mut stdout = std::io::stdout().lock();
    write_result(&mut stdout, &result, format)
}

/// Render a query result in the requested format.
pub fn write_result<W: Write>(out: &mut W, result: &QueryResult, format: &str) -> Result<()> {
    match format {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(result)?)?,
        "simple" => write_simple(out, result)?,
        _ => write_table(out, result)?,
    }
    Ok(())
}

fn write_simple<W: Write>(out: &mut W, result: &QueryResult) -> std::io::Result<()> {
    if result.is_empty() {
        return writeln!(out, "{}", no_options_message(result));
    }

    for name in result.provider_names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, result: &QueryResult) -> std::io::Result<()> {
    if result.is_empty() {
        return writeln!(out, "{}", no_options_message(result).yellow());
    }

    writeln!(
        out,
        "{}",
        format!("{} is available in {} on:", result.title, result.region)
            .bold()
            .cyan()
    )?;

    for (i, offer) in result.offers.iter().enumerate() {
        writeln!(
            out,
            " {:>3}. {} ({})",
            i + 1,
            offer.provider_name.green(),
            offer.offer_type
        )?;
    }

    if let Some(ref link) = result.link {
        writeln!(out, "  {} {}", "->".yellow(), link)?;
    }
    Ok(())
}

fn no_options_message(result: &QueryResult) -> String {
    format!(
        "No eligible streaming options for {} in {}.",
        result.title, result.region
    )
}

/// User-facing message for a failed query.
pub fn error_message(error: &Error) -> String {
    match error.kind() {
        ErrorKind::Auth => format!(
            "Authentication failed: {}. Check TMDB_API_KEY and TMDB_API_TOKEN.",
            error
        ),
        ErrorKind::NotFound => format!("Not found: {}", error),
        ErrorKind::Transient => format!("{}. Please try again.", error),
        ErrorKind::Config | ErrorKind::Other => format!("Error: {}", error),
    }
}

/// Render a failed query.
pub fn write_error<W: Write>(out: &mut W, error: &Error) -> std::io::Result<()> {
    let message = error_message(error);
    match error.kind() {
        ErrorKind::NotFound => writeln!(out, "{}", message.yellow()),
        _ => writeln!(out, "{}", message.red()),
    }
}
