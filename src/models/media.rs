//! Title and streaming availability models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Media type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment TMDB uses for this media type.
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Tv => write!(f, "tv"),
        }
    }
}

/// Which TMDB search endpoint a title query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Movie,
    Tv,
    /// Movies and TV shows together; person hits are dropped.
    Multi,
}

impl SearchScope {
    pub fn as_path(&self) -> &'static str {
        match self {
            SearchScope::Movie => "search/movie",
            SearchScope::Tv => "search/tv",
            SearchScope::Multi => "search/multi",
        }
    }

    /// The single media type this scope searches, if any.
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            SearchScope::Movie => Some(MediaType::Movie),
            SearchScope::Tv => Some(MediaType::Tv),
            SearchScope::Multi => None,
        }
    }
}

impl FromStr for SearchScope {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(SearchScope::Movie),
            "tv" | "show" | "shows" | "tvshows" => Ok(SearchScope::Tv),
            "multi" | "all" => Ok(SearchScope::Multi),
            other => Err(crate::Error::InvalidArgument(format!(
                "unknown media type '{}', expected movie, tv or multi",
                other
            ))),
        }
    }
}

/// A title resolved from TMDB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMatch {
    /// TMDB ID.
    pub id: u64,
    /// Display title (movie title or TV show name).
    pub title: String,
    pub media_type: MediaType,
    /// Release or first-air year.
    pub year: Option<u16>,
}

impl std::fmt::Display for TitleMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{}", self.title),
        }
    }
}

/// TMDB availability category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// Included in a subscription (`flatrate`).
    Subscription,
    Free,
    /// Free with ads.
    Ads,
    Rent,
    Buy,
}

impl OfferType {
    /// Category order within a TMDB watch providers entry.
    pub const ALL: [OfferType; 5] = [
        OfferType::Subscription,
        OfferType::Free,
        OfferType::Ads,
        OfferType::Rent,
        OfferType::Buy,
    ];

    /// Key TMDB uses for this category.
    pub fn tmdb_key(&self) -> &'static str {
        match self {
            OfferType::Subscription => "flatrate",
            OfferType::Free => "free",
            OfferType::Ads => "ads",
            OfferType::Rent => "rent",
            OfferType::Buy => "buy",
        }
    }
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferType::Subscription => write!(f, "subscription"),
            OfferType::Free => write!(f, "free"),
            OfferType::Ads => write!(f, "free with ads"),
            OfferType::Rent => write!(f, "rent"),
            OfferType::Buy => write!(f, "buy"),
        }
    }
}

impl FromStr for OfferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flatrate" | "subscription" | "stream" => Ok(OfferType::Subscription),
            "free" => Ok(OfferType::Free),
            "ads" => Ok(OfferType::Ads),
            "rent" => Ok(OfferType::Rent),
            "buy" => Ok(OfferType::Buy),
            other => Err(format!("unknown offer type '{}'", other)),
        }
    }
}

/// One provider's availability for a title in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOffer {
    pub provider_id: u64,
    /// Provider name exactly as TMDB returns it.
    pub provider_name: String,
    pub offer_type: OfferType,
}

/// Unfiltered watch providers for one title in one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionAvailability {
    /// TMDB watch page for the title in this region.
    pub link: Option<String>,
    /// Offers in TMDB order, grouped by category.
    pub offers: Vec<ProviderOffer>,
}

/// Streaming options for a title after applying the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub title: TitleMatch,
    pub region: String,
    pub link: Option<String>,
    /// Allowed offers, in TMDB order. Empty when nothing matched.
    pub offers: Vec<ProviderOffer>,
}

impl QueryResult {
    /// True when the title exists but has no eligible offer in the region.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Provider names in display order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.offers.iter().map(|o| o.provider_name.as_str()).collect()
    }
}
