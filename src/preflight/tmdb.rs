//! TMDB preflight checks.

use super::CheckResult;
use crate::models::config::Config;
use crate::models::media::MediaType;
use crate::services::tmdb::TmdbClient;

/// Check if TMDB accepts the configured credentials.
pub async fn check_credentials(client: &TmdbClient) -> CheckResult {
    match client.verify_credentials().await {
        Ok(true) => CheckResult::ok("TMDB API", "connected"),
        Ok(false) => CheckResult::fail(
            "TMDB API",
            "credentials rejected",
            "Check your TMDB_API_KEY and TMDB_API_TOKEN environment variables",
        ),
        Err(e) => CheckResult::fail(
            "TMDB API",
            &format!("connection failed ({})", e),
            "Check your network connection",
        ),
    }
}

/// Check every allow-listed provider name exists in the region's catalogue.
pub async fn check_allow_list(client: &TmdbClient, config: &Config) -> CheckResult {
    let known = match client.region_providers(MediaType::Movie, &config.region).await {
        Ok(names) => names,
        Err(e) => {
            return CheckResult::fail(
                "Providers",
                &format!("could not list providers for {} ({})", config.region, e),
                "Check TMDB_REGION is a valid region code",
            )
        }
    };

    let unknown = unknown_providers(config, &known);
    if unknown.is_empty() {
        CheckResult::ok(
            "Providers",
            &format!(
                "all {} allowed providers are listed in {}",
                config.allowed_providers.len(),
                config.region
            ),
        )
    } else {
        CheckResult::fail(
            "Providers",
            &format!("not listed in {}: {}", config.region, unknown.join(", ")),
            "Names must match TMDB exactly; run with --list-providers to see them",
        )
    }
}

/// Allow-listed names TMDB does not know, in allow-list order.
fn unknown_providers<'a>(config: &'a Config, known: &[String]) -> Vec<&'a str> {
    config
        .allowed_providers
        .iter()
        .filter(|name| !known.contains(name))
        .map(String::as_str)
        .collect()
}
