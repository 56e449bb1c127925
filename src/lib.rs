//! # tmdb-resolve
//!
//! Best-effort resolution of a TMDB movie id from partial, possibly
//! unreliable identifying information: an external cross-reference id, a
//! title, an original-language title, a release year and a preferred
//! language.
//!
//! The crate is a lookup utility, not a systems component. It holds no
//! state between calls; each resolution is a pure function of its query
//! plus the live catalog. A chain of matching strategies runs in fixed
//! priority order and the first confident hit wins; `0` means unresolved.
//! Transport failures never escape a strategy — partial and ambiguous
//! data is common upstream, so missing evidence is an outcome, not an
//! error.
//!
//! ## Example
//!
//! ```no_run
//! use tmdb_resolve::{MovieQuery, Resolver, TmdbCatalog};
//!
//! async fn lookup() -> u64 {
//!     let resolver = Resolver::new(TmdbCatalog::new());
//!     let query = MovieQuery::new()
//!         .with_title("Spider-Man: Homecoming")
//!         .with_year(2017)
//!         .with_language("en-US");
//!     resolver.extract_id(&query).await
//! }
//! ```

/// Catalog access trait, wire types and the TMDB client
pub mod catalog;
/// Transport error taxonomy
pub mod error;
/// Immutable resolution query
pub mod query;
/// The strategy chain
pub mod resolver;
/// Title normalization and the exact-match predicate
pub mod title;

pub use catalog::{
    MovieCandidate, MovieCatalog, MovieRecord, SearchFilters, SearchResponse, TmdbCatalog,
};
pub use error::{ProviderError, Result};
pub use query::MovieQuery;
pub use resolver::Resolver;
pub use title::{normalize_title, titles_match};
