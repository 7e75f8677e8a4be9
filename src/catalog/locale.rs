use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `xx-YY` language-region tag, also accepting a 3-letter language or UN M.49 region
static LOCALE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z]{2,3})-([a-z]{2}|[0-9]{3})$").expect("valid regex"));

/// Fallback values applied when a caller omits or mangles the locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleDefaults {
    /// Locale sent upstream when the request carries none (e.g. `it-IT`)
    pub default_locale: String,
    /// Region used to pick a watch-provider bucket when none can be derived
    pub default_region: String,
}

impl Default for LocaleDefaults {
    fn default() -> Self {
        Self {
            default_locale: "it-IT".to_string(),
            default_region: "IT".to_string(),
        }
    }
}

/// Region subtag of a locale code: the part after the first hyphen.
///
/// Falls back to `default_region` when there is no hyphen or the subtag is empty.
#[must_use]
pub fn region_of(locale: &str, default_region: &str) -> String {
    locale
        .split_once('-')
        .map(|(_, region)| region.trim())
        .filter(|region| !region.is_empty())
        .map_or_else(|| default_region.to_string(), str::to_uppercase)
}

/// A validated locale code sent to the upstream catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    code: String,
    region: String,
}

impl Locale {
    /// Resolve the optional `lang` parameter of a request.
    ///
    /// Anything that is not an `xx-YY` tag is replaced by the configured
    /// default locale, and the region then comes from the configured default
    /// region rather than from that fallback code.
    #[must_use]
    pub fn resolve(raw: Option<&str>, defaults: &LocaleDefaults) -> Self {
        match raw.map(str::trim).and_then(Self::normalize) {
            Some(code) => Self {
                region: region_of(&code, &defaults.default_region),
                code,
            },
            None => Self {
                code: defaults.default_locale.clone(),
                region: defaults.default_region.clone(),
            },
        }
    }

    fn normalize(raw: &str) -> Option<String> {
        let caps = LOCALE_PATTERN.captures(raw)?;
        Some(format!(
            "{}-{}",
            caps[1].to_lowercase(),
            caps[2].to_uppercase()
        ))
    }

    /// Locale code, e.g. `it-IT`
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Region token used to select watch-provider availability
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Interface language a user can pick; persisted client side as its short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    It,
    En,
    Es,
    Fr,
    De,
}

impl Language {
    pub const ALL: [Self; 5] = [Self::It, Self::En, Self::Es, Self::Fr, Self::De];

    /// Short code stored in the preference store
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::It => "it",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Locale code sent upstream for this language
    #[must_use]
    pub const fn api_locale(self) -> &'static str {
        match self {
            Self::It => "it-IT",
            Self::En => "en-US",
            Self::Es => "es-ES",
            Self::Fr => "fr-FR",
            Self::De => "de-DE",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::It => "Italiano",
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::De => "Deutsch",
        }
    }

    /// Parse a short code; unknown codes yield `None`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Language of a locale code, taken from the part before the first hyphen
    #[must_use]
    pub fn from_locale(locale: &str) -> Option<Self> {
        let prefix = locale.split('-').next().unwrap_or_default();
        Self::from_code(prefix)
    }

    /// Map a short code to its upstream locale, or the configured fallback when unmapped
    #[must_use]
    pub fn api_locale_for(code: &str, defaults: &LocaleDefaults) -> String {
        Self::from_code(code).map_or_else(
            || defaults.default_locale.clone(),
            |lang| lang.api_locale().to_string(),
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
