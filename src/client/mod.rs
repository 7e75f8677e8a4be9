mod api;
mod controller;
mod messages;
mod preference;
mod request;

#[cfg(test)]
mod tests;

pub use api::{ClientError, HttpSearchApi, SearchApi};
pub use controller::{DEFAULT_DEBOUNCE, SearchController, SearchPhase, SearchSnapshot, Settlement};
pub use messages::{MessageKey, message};
pub use preference::{FileStore, LANGUAGE_KEY, LanguageContext, MemoryStore, PreferenceStore};
pub use request::{SearchKey, SearchRequest};
