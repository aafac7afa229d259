//! Configuration model.
//!
//! Everything is read from the environment once at startup:
//! - `TMDB_API_KEY`: v3 API key (required)
//! - `TMDB_API_TOKEN`: v4 read access token, sent as a Bearer credential (required)
//! - `TMDB_REGION`: region code for availability (default: US)
//! - `TMDB_PROVIDERS`: comma-separated allow-list (default: Netflix,Hulu,Peacock,Paramount Plus,Max)
//! - `TMDB_OFFER_TYPES`: comma-separated offer categories to report (default: flatrate)
//! - `TMDB_LANGUAGE`: response language (default: en-US)
//! - `TMDB_BASE_URL`: API root (default: https://api.themoviedb.org/3)
//! - `TMDB_TIMEOUT`: request timeout in seconds (default: 30)

use crate::models::media::OfferType;
use crate::{Error, Result};
use std::collections::BTreeSet;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_REGION: &str = "US";
pub const DEFAULT_PROVIDERS: &[&str] = &["Netflix", "Hulu", "Peacock", "Paramount Plus", "Max"];
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TMDB API key.
    pub api_key: String,
    /// TMDB Bearer token.
    pub api_token: String,
    /// Region code used for watch provider lookups.
    pub region: String,
    /// Provider names to report on, matched exactly.
    pub allowed_providers: BTreeSet<String>,
    /// Offer categories to report on.
    pub offer_types: Vec<OfferType>,
    /// Language for responses.
    pub language: String,
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = var("TMDB_API_KEY").ok_or(Error::MissingCredential("TMDB_API_KEY"))?;
        let api_token =
            var("TMDB_API_TOKEN").ok_or(Error::MissingCredential("TMDB_API_TOKEN"))?;

        let region = var("TMDB_REGION")
            .map(|r| r.to_uppercase())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let allowed_providers = var("TMDB_PROVIDERS")
            .map(|v| parse_list(&v))
            .filter(|set| !set.is_empty())
            .unwrap_or_else(default_providers);

        let offer_types = match var("TMDB_OFFER_TYPES") {
            Some(v) => parse_offer_types(&v)?,
            None => vec![OfferType::Subscription],
        };

        let language = var("TMDB_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let base_url = var("TMDB_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match var("TMDB_TIMEOUT") {
            Some(v) => v.parse().map_err(|_| Error::InvalidConfig {
                name: "TMDB_TIMEOUT",
                reason: format!("'{}' is not a number of seconds", v),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_token,
            region,
            allowed_providers,
            offer_types,
            language,
            base_url,
            timeout_secs,
        })
    }

    /// Copy of this configuration scoped to another region.
    pub fn with_region(&self, region: &str) -> Self {
        let region = region.trim();
        Self {
            region: if region.is_empty() {
                DEFAULT_REGION.to_string()
            } else {
                region.to_uppercase()
            },
            ..self.clone()
        }
    }

    /// Whether a provider name is on the allow-list.
    pub fn allows(&self, provider_name: &str) -> bool {
        self.allowed_providers.contains(provider_name)
    }
}

/// The built-in provider allow-list.
pub fn default_providers() -> BTreeSet<String> {
    DEFAULT_PROVIDERS.iter().map(|p| p.to_string()).collect()
}

/// Split a comma-separated list, trimming entries and dropping blanks.
fn parse_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_offer_types(value: &str) -> Result<Vec<OfferType>> {
    let mut types = Vec::new();
    for entry in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let offer_type = entry.parse::<OfferType>().map_err(|reason| Error::InvalidConfig {
            name: "TMDB_OFFER_TYPES",
            reason,
        })?;
        if !types.contains(&offer_type) {
            types.push(offer_type);
        }
    }

    if types.is_empty() {
        types.push(OfferType::Subscription);
    }
    Ok(types)
}
