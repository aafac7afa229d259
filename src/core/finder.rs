//! Resolve a title and report where it can be streamed.
//!
//! A query is at most two TMDB round-trips: search, then watch providers.
//! The first search hit wins; TMDB's relevance order is the only tie-break.

use crate::models::config::Config;
use crate::models::media::{MediaType, ProviderOffer, QueryResult, SearchScope, TitleMatch};
use crate::services::tmdb::TmdbClient;
use crate::{Error, Result};

/// Find the allowed streaming options for a free-text title query.
pub async fn find_streaming_options(
    client: &TmdbClient,
    config: &Config,
    query: &str,
    scope: SearchScope,
) -> Result<QueryResult> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let title = client
        .search(query, scope)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::TitleNotFound(query.to_string()))?;

    tracing::debug!("Resolved \"{}\" to {} {} ({})", query, title.media_type, title.id, title);

    streaming_options_for(client, config, title).await
}

/// Find the allowed streaming options for a TMDB ID.
pub async fn find_by_id(
    client: &TmdbClient,
    config: &Config,
    id: u64,
    media_type: MediaType,
) -> Result<QueryResult> {
    let title = client.title_details(id, media_type).await?;
    streaming_options_for(client, config, title).await
}

/// Look up and filter the watch providers of an already resolved title.
pub async fn streaming_options_for(
    client: &TmdbClient,
    config: &Config,
    title: TitleMatch,
) -> Result<QueryResult> {
    let availability = client.watch_providers(&title, &config.region).await?;
    let total = availability.offers.len();
    let offers = filter_offers(availability.offers, config);

    tracing::debug!(
        "{}: {} of {} offers in {} are on the allow-list",
        title,
        offers.len(),
        total,
        config.region
    );

    Ok(QueryResult {
        title,
        region: config.region.clone(),
        link: availability.link,
        offers,
    })
}

/// Keep offers of a configured type from an allowed provider, in their original order.
///
/// Provider names are compared exactly as TMDB spells them.
pub fn filter_offers(offers: Vec<ProviderOffer>, config: &Config) -> Vec<ProviderOffer> {
    offers
        .into_iter()
        .filter(|offer| config.offer_types.contains(&offer.offer_type))
        .filter(|offer| config.allows(&offer.provider_name))
        .collect()
}
