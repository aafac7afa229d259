//! Provider catalogue listing.

use crate::models::config::Config;
use crate::models::media::{MediaType, SearchScope};
use crate::services::tmdb::TmdbClient;
use crate::Result;
use colored::Colorize;

/// Print every provider TMDB tracks in the configured region, marking allow-listed ones.
pub async fn list_providers(
    client: &TmdbClient,
    config: &Config,
    scope: SearchScope,
    format: &str,
) -> Result<()> {
    let media_type = scope.media_type().unwrap_or(MediaType::Movie);
    let names = client.region_providers(media_type, &config.region).await?;

    match format {
        "json" => {
            #[derive(serde::Serialize)]
            struct ProviderJson<'a> {
                name: &'a str,
                allowed: bool,
            }

            let output: Vec<_> = names
                .iter()
                .map(|name| ProviderJson {
                    name,
                    allowed: config.allows(name),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "simple" => {
            for name in &names {
                println!("{}", name);
            }
        }
        _ => {
            println!(
                "{}",
                format!(
                    "{} {} providers in {}:",
                    names.len(),
                    media_type,
                    config.region
                )
                .bold()
                .cyan()
            );
            for name in &names {
                if config.allows(name) {
                    println!("  {} {}", "*".green(), name.green());
                } else {
                    println!("    {}", name);
                }
            }
            println!();
            println!("{}", "* on your allow-list (TMDB_PROVIDERS)".dimmed());
        }
    }

    Ok(())
}
