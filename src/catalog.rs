use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::{ProviderError, Result};

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3/";

/// Record returned by a direct fetch-by-id. Only the catalog's own id is
/// of interest; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: u64,
}

/// One free-text search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieCandidate {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    /// Release date as reported by the catalog. TMDB emits an empty string
    /// for undated entries; that deserializes to `None` here.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub release_date: Option<String>,
}

/// Search results in upstream relevance order. A missing `results` array
/// is an empty list, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieCandidate>,
}

/// Optional server-side constraints on a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Constrain results to this primary release year.
    pub year: Option<u32>,
    /// Locale tag scoping the search.
    pub language: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Read-only access to the upstream movie catalog.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fetch a single record by catalog id (or a cross-reference id the
    /// catalog accepts in the same position).
    async fn fetch_by_id(&self, id: &str) -> Result<MovieRecord>;

    /// Free-text movie search constrained by the given filters.
    async fn search(&self, query: &str, filters: &SearchFilters) -> Result<SearchResponse>;
}

/// TMDB-backed catalog client.
pub struct TmdbCatalog {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for TmdbCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbCatalog")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TmdbCatalog {
    /// Build a client reading the API key from the `TMDB_API_KEY`
    /// environment variable.
    pub fn new() -> Self {
        let api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| String::new());
        Self::with_api_key(api_key)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            // The constant is a valid URL.
            base_url: Url::parse(TMDB_API_BASE).unwrap(),
        }
    }

    /// Point the client at a different API root. The URL must end with a
    /// trailing slash for relative endpoint paths to resolve under it.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    fn movie_url(&self, id: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("movie/{id}"))
            .map_err(|e| ProviderError::ApiError(e.to_string()))?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }

    fn search_url(&self, query: &str, filters: &SearchFilters) -> Result<Url> {
        let mut url = self
            .base_url
            .join("search/movie")
            .map_err(|e| ProviderError::ApiError(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            pairs.append_pair("query", query);
            if let Some(year) = filters.year {
                pairs.append_pair("primary_release_year", &year.to_string());
            }
            if let Some(language) = &filters.language {
                pairs.append_pair("language", language);
            }
        }
        Ok(url)
    }

    fn check_status(status: StatusCode) -> Result<()> {
        match status {
            StatusCode::UNAUTHORIZED => Err(ProviderError::InvalidApiKey),
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            s if !s.is_success() => Err(ProviderError::ApiError(format!("HTTP {s}"))),
            _ => Ok(()),
        }
    }
}

impl Default for TmdbCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn fetch_by_id(&self, id: &str) -> Result<MovieRecord> {
        let url = self.movie_url(id)?;
        let response = self.client.get(url).send().await?;
        Self::check_status(response.status())?;
        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    async fn search(&self, query: &str, filters: &SearchFilters) -> Result<SearchResponse> {
        let url = self.search_url(query, filters)?;
        let response = self.client.get(url).send().await?;
        Self::check_status(response.status())?;
        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}
