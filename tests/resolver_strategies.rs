//! Exercises the strategy chain against a mocked catalog: priority order,
//! skipped strategies, swallowed failures and the unresolved sentinel.

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use tmdb_resolve::{
    MovieCandidate, MovieCatalog, MovieQuery, MovieRecord, ProviderError, Resolver, Result,
    SearchFilters, SearchResponse,
};

mock! {
    Catalog {}

    #[async_trait]
    impl MovieCatalog for Catalog {
        async fn fetch_by_id(&self, id: &str) -> Result<MovieRecord>;
        async fn search(&self, query: &str, filters: &SearchFilters) -> Result<SearchResponse>;
    }
}

fn candidate(id: u64, title: Option<&str>, original_title: Option<&str>) -> MovieCandidate {
    MovieCandidate {
        id,
        title: title.map(str::to_owned),
        original_title: original_title.map(str::to_owned),
        release_date: None,
    }
}

fn response(results: Vec<MovieCandidate>) -> SearchResponse {
    SearchResponse { results }
}

fn year_filters(year: u32) -> SearchFilters {
    SearchFilters {
        year: Some(year),
        language: None,
    }
}

#[tokio::test]
async fn test_external_id_short_circuits_search() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch_by_id()
        .with(eq("tt0848228"))
        .times(1)
        .returning(|_| Ok(MovieRecord { id: 42 }));
    // No search expectations: any search call fails the test.

    let query = MovieQuery::new()
        .with_external_id("tt0848228")
        .with_title("The Avengers")
        .with_year(2012);
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 42);
}

#[tokio::test]
async fn test_failed_external_id_falls_through() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch_by_id()
        .times(1)
        .returning(|_| Err(ProviderError::NotFound));
    catalog
        .expect_search()
        .with(eq("Foo"), eq(SearchFilters::default()))
        .times(1)
        .returning(|_, _| Ok(response(vec![candidate(9, Some("Foo"), None)])));

    let query = MovieQuery::new().with_external_id("bogus").with_title("Foo");
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 9);
}

#[tokio::test]
async fn test_zero_id_record_is_no_match() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_fetch_by_id()
        .times(1)
        .returning(|_| Ok(MovieRecord { id: 0 }));
    catalog
        .expect_search()
        .times(1)
        .returning(|_, _| Ok(response(vec![candidate(9, Some("Foo"), None)])));

    let query = MovieQuery::new().with_external_id("tt0").with_title("Foo");
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 9);
}

#[tokio::test]
async fn test_year_plus_one_retry() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .with(eq("Foo"), eq(year_filters(2020)))
        .times(1)
        .returning(|_, _| Ok(response(vec![])));
    catalog
        .expect_search()
        .with(eq("Foo"), eq(year_filters(2021)))
        .times(1)
        .returning(|_, _| {
            let mut hit = candidate(7, Some("Foo"), None);
            hit.release_date = Some("2021-02-14".to_string());
            Ok(response(vec![hit]))
        });

    let query = MovieQuery::new().with_title("Foo").with_year(2020);
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 7);
}

#[tokio::test]
async fn test_year_search_skips_inexact_titles() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .with(eq("Foo"), eq(year_filters(2020)))
        .times(1)
        .returning(|_, _| {
            Ok(response(vec![
                candidate(1, Some("Foo Returns"), None),
                candidate(2, Some("FOO"), Some("Le Foo")),
            ]))
        });

    let query = MovieQuery::new().with_title("Foo").with_year(2020);
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 2);
}

#[tokio::test]
async fn test_cross_reference_confirms_shared_id() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .with(eq("Foo"), eq(SearchFilters::default()))
        .times(1)
        .returning(|_, _| {
            Ok(response(vec![
                candidate(4, Some("Foo"), None),
                candidate(5, Some("Foo"), Some("Bar")),
            ]))
        });
    catalog
        .expect_search()
        .with(eq("Bar"), eq(SearchFilters::default()))
        .times(1)
        .returning(|_, _| Ok(response(vec![candidate(5, Some("Foo"), Some("Bar"))])));

    let query = MovieQuery::new().with_title("Foo").with_original_title("Bar");
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 5);
}

#[tokio::test]
async fn test_cross_reference_id_mismatch_resolves_nothing() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .with(eq("Foo"), eq(SearchFilters::default()))
        .times(1)
        .returning(|_, _| Ok(response(vec![candidate(5, Some("Foo"), None)])));
    catalog
        .expect_search()
        .with(eq("Bar"), eq(SearchFilters::default()))
        .times(1)
        .returning(|_, _| Ok(response(vec![candidate(6, None, Some("Bar"))])));

    // With an original title present there is no title-only fallback;
    // a failed cross-reference is the end of the chain.
    let query = MovieQuery::new().with_title("Foo").with_original_title("Bar");
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 0);
}

#[tokio::test]
async fn test_title_only_resolution() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .with(
            eq("Foo"),
            eq(SearchFilters {
                year: None,
                language: Some("pt-BR".to_string()),
            }),
        )
        .times(1)
        .returning(|_, _| {
            Ok(response(vec![
                candidate(8, Some("Foo II"), None),
                candidate(9, Some("Foo"), None),
            ]))
        });

    let query = MovieQuery::new().with_title("Foo").with_language("pt-BR");
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 9);
}

#[tokio::test]
async fn test_exhausted_chain_returns_zero() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search()
        .with(eq("Foo"), eq(year_filters(2020)))
        .times(1)
        .returning(|_, _| Ok(response(vec![])));
    catalog
        .expect_search()
        .with(eq("Foo"), eq(year_filters(2021)))
        .times(1)
        .returning(|_, _| Err(ProviderError::RateLimited));
    catalog
        .expect_search()
        .with(eq("Foo"), eq(SearchFilters::default()))
        .times(1)
        .returning(|_, _| Ok(response(vec![candidate(3, Some("Other"), None)])));

    let query = MovieQuery::new().with_title("Foo").with_year(2020);
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&query).await, 0);
}

#[tokio::test]
async fn test_empty_query_makes_no_calls() {
    let catalog = MockCatalog::new();
    let resolver = Resolver::new(catalog);
    assert_eq!(resolver.extract_id(&MovieQuery::new()).await, 0);
}
