//! Preflight checks module.

mod tmdb;

use crate::models::config::Config;
use crate::services::tmdb::TmdbClient;
use colored::Colorize;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Run all preflight checks.
///
/// The allow-list is only checked once the credentials are known to work.
pub async fn run_preflight_checks(client: &TmdbClient, config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    // Check credentials
    let credentials = tmdb::check_credentials(client).await;
    let authenticated = credentials.success;
    results.push(credentials);

    // Check allow-list spelling against TMDB's catalogue
    if authenticated {
        results.push(tmdb::check_allow_list(client, config).await);
    }

    results
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if result.success {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}
