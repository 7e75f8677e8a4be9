use crate::catalog::Language;

/// User-facing strings the search controller can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    SearchFailed,
    RateLimited,
    NoResults,
}

#[must_use]
pub const fn message(language: Language, key: MessageKey) -> &'static str {
    match (key, language) {
        (MessageKey::SearchFailed, Language::It) => "Errore durante la ricerca. Riprova più tardi.",
        (MessageKey::SearchFailed, Language::En) => "Search failed. Please try again later.",
        (MessageKey::SearchFailed, Language::Es) => {
            "Error durante la búsqueda. Inténtalo de nuevo más tarde."
        }
        (MessageKey::SearchFailed, Language::Fr) => {
            "Erreur lors de la recherche. Réessayez plus tard."
        }
        (MessageKey::SearchFailed, Language::De) => {
            "Fehler bei der Suche. Bitte versuche es später erneut."
        }

        (MessageKey::RateLimited, Language::It) => "Troppe richieste. Riprova tra poco.",
        (MessageKey::RateLimited, Language::En) => "Too many requests. Please try again shortly.",
        (MessageKey::RateLimited, Language::Es) => {
            "Demasiadas solicitudes. Inténtalo de nuevo en breve."
        }
        (MessageKey::RateLimited, Language::Fr) => "Trop de requêtes. Réessayez dans un instant.",
        (MessageKey::RateLimited, Language::De) => {
            "Zu viele Anfragen. Bitte versuche es gleich erneut."
        }

        (MessageKey::NoResults, Language::It) => "Nessun risultato trovato",
        (MessageKey::NoResults, Language::En) => "No results found",
        (MessageKey::NoResults, Language::Es) => "No se encontraron resultados",
        (MessageKey::NoResults, Language::Fr) => "Aucun résultat trouvé",
        (MessageKey::NoResults, Language::De) => "Keine Ergebnisse gefunden",
    }
}
