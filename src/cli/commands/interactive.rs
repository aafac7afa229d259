//! Interactive prompt loop.
//!
//! Reads one title per line until a blank line, `q`, `quit`, `exit` or EOF.
//! A failed query is reported and the loop moves on to the next prompt.

use super::lookup::{write_error, write_result};
use crate::core::finder;
use crate::models::config::Config;
use crate::models::media::SearchScope;
use crate::services::tmdb::TmdbClient;
use crate::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

const PROMPT: &str = "Query a title (blank to quit): ";
const QUIT_WORDS: &[&str] = &["q", "quit", "exit"];

/// Run the prompt loop against stdin/stdout.
pub async fn run(
    client: &TmdbClient,
    config: &Config,
    scope: SearchScope,
    format: &str,
) -> Result<()> {
    println!(
        "{}",
        format!(
            "Checking {} in {}",
            config
                .allowed_providers
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            config.region
        )
        .bold()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_loop(client, config, scope, format, stdin.lock(), &mut stdout).await
}

/// Run the prompt loop over arbitrary input and output.
pub async fn run_loop<R: BufRead, W: Write>(
    client: &TmdbClient,
    config: &Config,
    scope: SearchScope,
    format: &str,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    let mut line = String::new();
    let mut queries = 0usize;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let query = line.trim();
        if is_quit(query) {
            break;
        }

        queries += 1;
        match finder::find_streaming_options(client, config, query, scope).await {
            Ok(result) => write_result(out, &result, format)?,
            Err(e) => {
                tracing::warn!("Query \"{}\" failed: {}", query, e);
                write_error(out, &e)?;
            }
        }
        writeln!(out)?;
    }

    tracing::debug!("Interactive session ended after {} queries", queries);
    Ok(())
}

fn is_quit(input: &str) -> bool {
    input.is_empty() || QUIT_WORDS.contains(&input.to_lowercase().as_str())
}
