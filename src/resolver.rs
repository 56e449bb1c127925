use tracing::debug;

use crate::catalog::{MovieCandidate, MovieCatalog, SearchFilters};
use crate::query::MovieQuery;
use crate::title::titles_match;

/// Multi-strategy movie id resolver.
///
/// Strategies run sequentially in a fixed priority order, each one only
/// when the id is still unresolved and its required inputs are present:
///
/// 1. direct fetch by external id
/// 2. exact title constrained to the given year
/// 3. the same search retried with year + 1 (theatrical vs. catalog
///    release years commonly differ by one)
/// 4. title cross-referenced against the original title via two searches
/// 5. title alone (only when no original title was given)
///
/// Every strategy is total: transport failures, malformed payloads and
/// empty result lists all collapse into "no match" and the chain moves
/// on. The resolver itself never returns an error; `0` means unresolved.
#[derive(Debug)]
pub struct Resolver<C> {
    catalog: C,
}

impl<C: MovieCatalog> Resolver<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Resolve a catalog id for the query, returning `0` when no strategy
    /// produces a confident match. A query with no usable fields performs
    /// no network calls.
    pub async fn extract_id(&self, query: &MovieQuery) -> u64 {
        let language = query.language.as_deref();
        let mut id = 0;

        if let Some(external_id) = query.external_id.as_deref() {
            id = self.by_external_id(external_id).await.unwrap_or(0);
        }

        if id == 0 {
            if let (Some(title), Some(year)) = (query.title.as_deref(), query.year) {
                id = self
                    .by_title_and_year(title, year, language)
                    .await
                    .unwrap_or(0);
                if id == 0 {
                    id = self
                        .by_title_and_year(title, year + 1, language)
                        .await
                        .unwrap_or(0);
                }
            }
        }

        if id == 0 {
            match (query.title.as_deref(), query.original_title.as_deref()) {
                (Some(title), Some(original_title)) => {
                    id = self
                        .by_title_and_original_title(title, original_title, language)
                        .await
                        .unwrap_or(0);
                }
                (Some(title), None) => {
                    id = self.by_title_only(title, language).await.unwrap_or(0);
                }
                _ => {}
            }
        }

        debug!(id, "resolution finished");
        id
    }

    /// Direct lookup with a cross-reference id from another catalog.
    async fn by_external_id(&self, external_id: &str) -> Option<u64> {
        match self.catalog.fetch_by_id(external_id).await {
            Ok(record) if record.id != 0 => Some(record.id),
            Ok(_) => None,
            Err(error) => {
                debug!(external_id, %error, "fetch by external id failed");
                None
            }
        }
    }

    /// Exact title match within a single primary release year.
    ///
    /// The year filter already constrains the server-side results; a
    /// candidate with no release date at all is accepted regardless.
    async fn by_title_and_year(
        &self,
        title: &str,
        year: u32,
        language: Option<&str>,
    ) -> Option<u64> {
        let filters = SearchFilters {
            year: Some(year),
            language: language.map(str::to_owned),
        };
        let response = match self.catalog.search(title, &filters).await {
            Ok(response) => response,
            Err(error) => {
                debug!(title, year, %error, "title and year search failed");
                return None;
            }
        };
        response
            .results
            .iter()
            .find(|candidate| {
                titles_match(candidate, title)
                    && (year != 0 || candidate.release_date.is_none())
            })
            .map(|candidate| candidate.id)
    }

    /// Double-confirmed match: the title search and the original-title
    /// search must agree on the same candidate id. The rarer original
    /// title disambiguates a common title shared with unrelated works.
    async fn by_title_and_original_title(
        &self,
        title: &str,
        original_title: &str,
        language: Option<&str>,
    ) -> Option<u64> {
        let filters = SearchFilters {
            year: None,
            language: language.map(str::to_owned),
        };
        // The two searches are independent; issue them together.
        let (by_title, by_original_title) = tokio::join!(
            self.catalog.search(title, &filters),
            self.catalog.search(original_title, &filters),
        );
        let by_title = match by_title {
            Ok(response) => response,
            Err(error) => {
                debug!(title, %error, "title search failed");
                return None;
            }
        };
        let by_original_title = match by_original_title {
            Ok(response) => response,
            Err(error) => {
                debug!(original_title, %error, "original title search failed");
                return None;
            }
        };
        let confirms = |candidate: &MovieCandidate| {
            by_original_title
                .results
                .iter()
                .any(|other| other.id == candidate.id && titles_match(other, original_title))
        };
        by_title
            .results
            .iter()
            .find(|candidate| titles_match(candidate, title) && confirms(candidate))
            .map(|candidate| candidate.id)
    }

    /// Last resort: first exact title match with no other constraints.
    async fn by_title_only(&self, title: &str, language: Option<&str>) -> Option<u64> {
        let filters = SearchFilters {
            year: None,
            language: language.map(str::to_owned),
        };
        let response = match self.catalog.search(title, &filters).await {
            Ok(response) => response,
            Err(error) => {
                debug!(title, %error, "title search failed");
                return None;
            }
        };
        response
            .results
            .iter()
            .find(|candidate| titles_match(candidate, title))
            .map(|candidate| candidate.id)
    }
}
