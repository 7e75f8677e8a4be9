//! Terminal front end for the search page.
//!
//! Every line typed is a new search box value. `:tv` and `:movie` switch the
//! kind, `:lang <code>` switches and saves the language, `:q` quits. An
//! optional argument seeds the page from a URL query such as
//! `q=dune&type=movie&lang=en-US`.

use anyhow::Context;
use goodkraken::AppConfig;
use goodkraken::config::CatalogConfig;
use goodkraken::catalog::{Language, MediaKind};
use goodkraken::client::{
    FileStore, HttpSearchApi, LanguageContext, MemoryStore, MessageKey, PreferenceStore,
    SearchController, SearchPhase, SearchSnapshot, Settlement, message,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const API_URL_ENV: &str = "GOODKRAKEN_API_URL";
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const POSTER_SIZE: &str = "w185";

enum Command<'a> {
    Quit,
    Kind(MediaKind),
    Language(&'a str),
    Search(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line {
        ":q" | ":quit" => Command::Quit,
        ":movie" => Command::Kind(MediaKind::Movie),
        ":tv" => Command::Kind(MediaKind::Tv),
        _ => match line.strip_prefix(":lang") {
            Some(code) => Command::Language(code.trim()),
            None => Command::Search(line),
        },
    }
}

fn render(snapshot: &SearchSnapshot, catalog: &CatalogConfig) {
    match snapshot.phase {
        SearchPhase::Settled(Settlement::Success) if snapshot.results.is_empty() => {
            println!("{}", message(snapshot.language, MessageKey::NoResults));
        }
        SearchPhase::Settled(Settlement::Success) => {
            for item in &snapshot.results {
                let year = item.year().map(|y| format!(" ({y})")).unwrap_or_default();
                println!("  {}{year}  ★ {:.1}", item.display_title(), item.vote_average);
                if let Some(poster) = catalog.poster_url(item, POSTER_SIZE) {
                    println!("    {poster}");
                }
            }
            println!("{} / {}", snapshot.results.len(), snapshot.total_results);
        }
        SearchPhase::Settled(Settlement::Error) => {
            if let Some(error) = &snapshot.error {
                println!("! {error}");
            }
        }
        _ => {}
    }

    if let Some(url_query) = snapshot.url_query() {
        println!("? {url_query}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let store: Arc<dyn PreferenceStore> = match FileStore::default_location() {
        Some(store) => Arc::new(store),
        None => Arc::new(MemoryStore::default()),
    };

    let api = HttpSearchApi::new(base_url).context("failed to build HTTP client")?;
    let controller = SearchController::spawn(Arc::new(api), LanguageContext::load(store));

    if let Some(url_query) = std::env::args().nth(1) {
        controller.navigate(url_query).await?;
        render(&controller.settled().await, &config.catalog);
    }

    let mut kind = controller
        .snapshot()
        .request
        .map_or(MediaKind::Movie, |r| r.kind);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_command(line.trim()) {
            Command::Quit => break,
            Command::Kind(next) => {
                kind = next;
                if let Some(request) = controller.snapshot().request {
                    controller.input(request.query, kind).await?;
                }
            }
            Command::Language(code) => match Language::from_code(code) {
                Some(language) => {
                    controller.set_language(language).await?;
                    println!("= {}", language.display_name());
                }
                None => eprintln!("unknown language '{code}'"),
            },
            Command::Search(query) => controller.input(query, kind).await?,
        }

        render(&controller.settled().await, &config.catalog);
    }

    controller.shutdown().await?;
    Ok(())
}
