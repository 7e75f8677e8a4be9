use crate::catalog::{Language, MediaKind};

/// One search the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub query: String,
    pub kind: MediaKind,
    pub language: Language,
}

/// Composite key used to suppress identical consecutive searches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    query: String,
    kind: MediaKind,
    locale: &'static str,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, kind: MediaKind, language: Language) -> Self {
        Self {
            query: query.into(),
            kind,
            language,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Upstream locale for this request
    #[must_use]
    pub const fn locale(&self) -> &'static str {
        self.language.api_locale()
    }

    #[must_use]
    pub fn key(&self) -> SearchKey {
        SearchKey {
            query: self.query.trim().to_string(),
            kind: self.kind,
            locale: self.locale(),
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// URL query reflecting this request: `q=..&type=..&lang=..`
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!(
            "q={}&type={}&lang={}",
            urlencoding::encode(self.query.trim()),
            self.kind,
            self.locale()
        )
    }

    /// Parse a URL query produced by [`Self::to_query_string`] or typed by hand.
    ///
    /// Returns `None` without a non-blank `q`. Unknown `type` values fall back
    /// to movie, an unknown `lang` to `fallback`.
    #[must_use]
    pub fn from_query_string(query_string: &str, fallback: Language) -> Option<Self> {
        let mut query = None;
        let mut kind = MediaKind::Movie;
        let mut language = fallback;

        for pair in query_string.trim_start_matches('?').split('&') {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.replace('+', " ");
            let value = urlencoding::decode(&value).map_or(value.clone(), |v| v.into_owned());

            match name {
                "q" => query = Some(value),
                "type" => kind = value.parse().unwrap_or_default(),
                "lang" => language = Language::from_locale(&value).unwrap_or(fallback),
                _ => {}
            }
        }

        query
            .filter(|q| !q.trim().is_empty())
            .map(|q| Self::new(q, kind, language))
    }
}
