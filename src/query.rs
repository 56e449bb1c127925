/// Partial identifying information for one movie.
///
/// Every field is optional; each resolution strategy declares which fields
/// it needs and is skipped entirely when they are absent. The query is not
/// mutated during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    /// Cross-reference id from another catalog (e.g. an IMDB id), usable
    /// as a direct lookup key.
    pub external_id: Option<String>,
    /// Display title in the preferred language.
    pub title: Option<String>,
    /// Title in the original production language.
    pub original_title: Option<String>,
    /// Theatrical release year.
    pub year: Option<u32>,
    /// Locale tag forwarded to the catalog search (e.g. "en-US").
    pub language: Option<String>,
}

impl MovieQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_original_title(mut self, original_title: impl Into<String>) -> Self {
        self.original_title = Some(original_title.into());
        self
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
