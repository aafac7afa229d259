//! TMDB API client.
//!
//! Every request carries both credentials TMDB accepts: the v3 `api_key`
//! query parameter and the v4 read token as a Bearer header.
//! API docs: https://developer.themoviedb.org/docs

use crate::models::config::Config;
use crate::models::media::{
    MediaType, OfferType, ProviderOffer, RegionAvailability, SearchScope, TitleMatch,
};
use crate::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// TMDB API client.
pub struct TmdbClient {
    api_key: String,
    api_token: String,
    language: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            api_token: config.api_token.clone(),
            language: config.language.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build URL with the api_key and language parameters plus any extras.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?api_key={}&language={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        );
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Accept", "application/json")
    }

    /// GET a TMDB path and decode the JSON body, mapping HTTP failures onto [`Error`].
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.build_url(path, params);
        // The full URL carries the api key, so only the path is logged.
        tracing::debug!("GET /{} {:?}", path, params);

        let response = self.build_request(&url).send().await?;
        let status = response.status();

        match status {
            s if s.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| Error::InvalidResponse(format!("/{}: {}", path, e)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Error::AuthRejected(status.as_u16()))
            }
            StatusCode::NOT_FOUND => Err(Error::ResourceNotFound(format!("/{}", path))),
            StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
            s if s.is_server_error() => Err(Error::ServerError(s.as_u16())),
            s => Err(Error::ApiError(s.as_u16())),
        }
    }

    /// Verify the credentials are accepted.
    ///
    /// Returns `Ok(false)` when TMDB rejects them; network failures are errors.
    pub async fn verify_credentials(&self) -> Result<bool> {
        match self.get_json::<AuthenticationResponse>("authentication", &[]).await {
            Ok(resp) => Ok(resp.success),
            Err(Error::AuthRejected(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Search for titles. Results keep TMDB's relevance order.
    pub async fn search(&self, query: &str, scope: SearchScope) -> Result<Vec<TitleMatch>> {
        let resp: SearchResponse = self
            .get_json(scope.as_path(), &[("query", query), ("page", "1")])
            .await?;

        let fallback = scope.media_type();
        Ok(resp
            .results
            .into_iter()
            .filter_map(|item| item.into_title_match(fallback))
            .collect())
    }

    /// Get a title by TMDB ID.
    pub async fn title_details(&self, id: u64, media_type: MediaType) -> Result<TitleMatch> {
        let path = format!("{}/{}", media_type.as_path(), id);
        let item: TitleItemRaw = self.get_json(&path, &[]).await?;
        item.into_title_match(Some(media_type))
            .ok_or_else(|| Error::InvalidResponse(format!("/{}: missing title", path)))
    }

    /// Get the watch providers for a title in one region.
    ///
    /// A region TMDB has no data for yields an empty availability.
    pub async fn watch_providers(
        &self,
        title: &TitleMatch,
        region: &str,
    ) -> Result<RegionAvailability> {
        let path = format!("{}/{}/watch/providers", title.media_type.as_path(), title.id);
        let mut resp: WatchProvidersResponse = self.get_json(&path, &[]).await?;

        Ok(resp
            .results
            .remove(region)
            .map(RegionEntryRaw::into_availability)
            .unwrap_or_default())
    }

    /// List every provider name TMDB tracks for a media type in a region.
    pub async fn region_providers(&self, media_type: MediaType, region: &str) -> Result<Vec<String>> {
        let path = format!("watch/providers/{}", media_type.as_path());
        let resp: ProviderListResponse = self
            .get_json(&path, &[("watch_region", region)])
            .await?;

        let mut providers = resp.results;
        providers.sort_by_key(|p| p.display_priority.unwrap_or(i64::MAX));
        Ok(providers.into_iter().map(|p| p.provider_name).collect())
    }
}

// ========== RESPONSE STRUCTURES ==========

#[derive(Debug, Deserialize)]
struct AuthenticationResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TitleItemRaw>,
}

/// Search hit or details payload. Movies use `title`/`release_date`, TV uses `name`/`first_air_date`.
#[derive(Debug, Deserialize)]
struct TitleItemRaw {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
}

impl TitleItemRaw {
    fn into_title_match(self, fallback: Option<MediaType>) -> Option<TitleMatch> {
        let media_type = match self.media_type.as_deref() {
            Some("movie") => MediaType::Movie,
            Some("tv") => MediaType::Tv,
            // Multi-search also returns people
            Some(_) => return None,
            None => fallback?,
        };

        let title = match media_type {
            MediaType::Movie => self.title.or(self.name),
            MediaType::Tv => self.name.or(self.title),
        }?;

        let date = match media_type {
            MediaType::Movie => self.release_date,
            MediaType::Tv => self.first_air_date,
        };

        Some(TitleMatch {
            id: self.id,
            title,
            media_type,
            year: date.as_deref().and_then(extract_year),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WatchProvidersResponse {
    #[serde(default)]
    results: HashMap<String, RegionEntryRaw>,
}

#[derive(Debug, Default, Deserialize)]
struct RegionEntryRaw {
    link: Option<String>,
    #[serde(default)]
    flatrate: Vec<ProviderRaw>,
    #[serde(default)]
    free: Vec<ProviderRaw>,
    #[serde(default)]
    ads: Vec<ProviderRaw>,
    #[serde(default)]
    rent: Vec<ProviderRaw>,
    #[serde(default)]
    buy: Vec<ProviderRaw>,
}

impl RegionEntryRaw {
    fn into_availability(self) -> RegionAvailability {
        let categories = [
            (OfferType::Subscription, self.flatrate),
            (OfferType::Free, self.free),
            (OfferType::Ads, self.ads),
            (OfferType::Rent, self.rent),
            (OfferType::Buy, self.buy),
        ];

        let offers = categories
            .into_iter()
            .flat_map(|(offer_type, providers)| {
                providers.into_iter().map(move |p| ProviderOffer {
                    provider_id: p.provider_id,
                    provider_name: p.provider_name,
                    offer_type,
                })
            })
            .collect();

        RegionAvailability {
            link: self.link,
            offers,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderRaw {
    provider_id: u64,
    provider_name: String,
    display_priority: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ProviderListResponse {
    #[serde(default)]
    results: Vec<ProviderRaw>,
}

/// Extract year from a date string like "1999-03-30".
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}
