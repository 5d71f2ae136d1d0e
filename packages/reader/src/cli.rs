//! Command-line interface for the reader.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::CachingSource;
use crate::catalog::CollectionCatalog;
use crate::config::{SheetsConfig, TEXT_WRAP_WIDTH};
use crate::error::Result;
use crate::navigation::Navigator;
use crate::reading::{ArticleRef, JsonFileStore, ReadingAids};
use crate::relations::{CrossReferenceResolver, StaticRelationStore};
use crate::repository::ArticleRepository;
use crate::search::SearchEngine;
use crate::source::{InMemorySource, SheetsSource, TabularSource};
use crate::types::{collection_label, Article, Direction, RowKind};

/// Default file for favorites, notes, tags and history.
const DEFAULT_STORE_FILE: &str = ".vademecum.json";

/// Vade Mecum - Read legal codes from a spreadsheet source.
#[derive(Parser)]
#[command(name = "vademecum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read collections from a local YAML file instead of Google Sheets
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// YAML relation table (default: built-in Constitution table)
    #[arg(long, global = true)]
    pub relations: Option<PathBuf>,

    /// File holding favorites, notes, tags and history
    #[arg(long, global = true, env = "VADEMECUM_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available collections (legal areas).
    Collections,

    /// List the articles of a collection.
    List {
        /// Collection name (default: the source's default range)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Show one article.
    Show {
        identifier: String,

        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Search by article number or text.
    Search {
        query: String,

        /// Restrict to one collection (default: all collections)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Show the cross-references of an article.
    Refs {
        identifier: String,

        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Print the identifier after (or before) an article.
    Next {
        identifier: String,

        #[arg(short, long)]
        collection: Option<String>,

        /// Step backwards instead of forwards
        #[arg(long)]
        previous: bool,
    },

    /// Toggle an article as favorite.
    Favorite {
        identifier: String,

        #[arg(short, long)]
        collection: Option<String>,
    },

    /// List favorite articles.
    Favorites,

    /// Show or replace the note of an article.
    Note {
        identifier: String,

        /// New note text; an empty string clears the note
        text: Option<String>,

        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Add or remove a tag on an article.
    Tag {
        identifier: String,

        tag: String,

        #[arg(short, long)]
        collection: Option<String>,

        #[arg(long)]
        remove: bool,
    },

    /// Show recently read articles.
    History {
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(cli))
}

/// Execute a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
    let data = cli.data.as_deref();

    match cli.command {
        Commands::Collections => collections_command(&open_source(data)?).await,
        Commands::List { collection } => {
            list_command(&open_source(data)?, collection.as_deref()).await
        }
        Commands::Show {
            identifier,
            collection,
        } => {
            show_command(
                &open_source(data)?,
                &store_path,
                &identifier,
                collection.as_deref(),
            )
            .await
        }
        Commands::Search { query, collection } => {
            search_command(&open_source(data)?, &query, collection.as_deref()).await
        }
        Commands::Refs {
            identifier,
            collection,
        } => {
            refs_command(
                &open_source(data)?,
                cli.relations.as_deref(),
                &identifier,
                collection.as_deref(),
            )
            .await
        }
        Commands::Next {
            identifier,
            collection,
            previous,
        } => {
            let direction = if previous {
                Direction::Previous
            } else {
                Direction::Next
            };
            let source = open_source(data)?;
            let target = Navigator::new(&source)
                .step(&identifier, collection.as_deref(), direction)
                .await;
            println!("{target}");
            Ok(())
        }
        Commands::Favorite {
            identifier,
            collection,
        } => favorite_command(&store_path, &identifier, collection.as_deref()),
        Commands::Favorites => favorites_command(&store_path),
        Commands::Note {
            identifier,
            text,
            collection,
        } => note_command(
            &store_path,
            &identifier,
            text.as_deref(),
            collection.as_deref(),
        ),
        Commands::Tag {
            identifier,
            tag,
            collection,
            remove,
        } => tag_command(
            &store_path,
            &identifier,
            &tag,
            collection.as_deref(),
            remove,
        ),
        Commands::History { limit } => history_command(&store_path, limit),
    }
}

/// Open the configured source behind a cache, so one command never fetches
/// the same collection twice.
fn open_source(data: Option<&Path>) -> Result<CachingSource<Arc<dyn TabularSource>>> {
    let source: Arc<dyn TabularSource> = match data {
        Some(path) => Arc::new(InMemorySource::from_path(path)?),
        None => Arc::new(SheetsSource::new(SheetsConfig::from_env()?)?),
    };
    Ok(CachingSource::new(source))
}

fn open_relations(path: Option<&Path>) -> Result<StaticRelationStore> {
    match path {
        Some(path) => StaticRelationStore::from_path(path),
        None => Ok(StaticRelationStore::builtin()),
    }
}

fn open_aids(path: &Path) -> Result<ReadingAids<JsonFileStore>> {
    Ok(ReadingAids::new(JsonFileStore::open(path)?))
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a non-fatal notice for a degraded source.
fn notice(message: &str) {
    eprintln!("{} {message}", style("Warning:").yellow().bold());
}

async fn collections_command<S: TabularSource>(source: &S) -> Result<()> {
    let pb = spinner("Loading collections...");
    let result = CollectionCatalog::new(source).try_names().await;
    pb.finish_and_clear();

    let names = result.unwrap_or_else(|e| {
        notice(&format!("could not load collections: {e}"));
        Vec::new()
    });
    if names.is_empty() {
        println!("No collections found.");
    }
    for name in names {
        println!("{}", style(name).cyan());
    }
    Ok(())
}

async fn list_command<S: TabularSource>(source: &S, collection: Option<&str>) -> Result<()> {
    let pb = spinner("Loading articles...");
    let result = ArticleRepository::new(source).try_list(collection).await;
    pb.finish_and_clear();

    let articles = result.unwrap_or_else(|e| {
        notice(&format!("could not load articles: {e}"));
        Vec::new()
    });
    for article in &articles {
        print_summary(article);
    }
    println!();
    println!("{} articles", articles.len());
    Ok(())
}

async fn show_command<S: TabularSource>(
    source: &S,
    store_path: &Path,
    identifier: &str,
    collection: Option<&str>,
) -> Result<()> {
    let pb = spinner("Loading article...");
    let result = ArticleRepository::new(source)
        .try_get(identifier, collection)
        .await;
    pb.finish_and_clear();

    let article = match result {
        Ok(article) => article,
        Err(e) => {
            notice(&format!("could not load articles: {e}"));
            None
        }
    };
    let Some(article) = article else {
        println!("Article {} not found.", style(identifier).cyan());
        return Ok(());
    };

    let key = ArticleRef::from(&article);
    let mut aids = open_aids(store_path)?;
    aids.record_read(key.clone())?;

    let star = if aids.is_favorite(&key)? { " ★" } else { "" };
    println!(
        "{} {}{}",
        style(format!("Art. {}", article.identifier)).bold(),
        style(&article.collection).dim(),
        style(star).yellow()
    );
    println!();
    println!("{}", textwrap::fill(&article.text, TEXT_WRAP_WIDTH));

    let tags = aids.tags(&key)?;
    if !tags.is_empty() {
        println!();
        println!("Tags: {}", style(tags.join(", ")).green());
    }
    if let Some(note) = aids.note(&key)? {
        println!();
        println!("{}", style("Note:").bold());
        println!("{}", textwrap::fill(&note, TEXT_WRAP_WIDTH));
    }
    Ok(())
}

async fn search_command<S: TabularSource>(
    source: &S,
    query: &str,
    collection: Option<&str>,
) -> Result<()> {
    let pb = spinner("Searching...");
    let results = SearchEngine::new(source).search(query, collection).await;
    pb.finish_and_clear();

    if results.is_empty() {
        println!("No articles match {}.", style(query).cyan());
        return Ok(());
    }
    for article in &results {
        print_summary(article);
    }
    println!();
    println!("{} results", results.len());
    Ok(())
}

async fn refs_command<S: TabularSource>(
    source: &S,
    relations: Option<&Path>,
    identifier: &str,
    collection: Option<&str>,
) -> Result<()> {
    let store = open_relations(relations)?;
    let resolver = CrossReferenceResolver::new(&store);
    let repository = ArticleRepository::new(source);
    let resolved = resolver
        .resolve_with_targets(identifier, collection, &repository)
        .await;

    if resolved.is_empty() {
        println!("No cross-references for article {}.", style(identifier).cyan());
        return Ok(());
    }
    for item in resolved {
        let reference = &item.reference;
        let target = match &item.target {
            Some(article) => truncate(&article.text, 60),
            None => style("(not available)").dim().to_string(),
        };
        println!(
            "{:<14} → Art. {:<6} {}",
            style(reference.relation.as_str()).magenta(),
            reference.to,
            target
        );
        if let Some(description) = &reference.description {
            println!("{:<14}   {}", "", style(description).dim());
        }
    }
    Ok(())
}

fn favorite_command(store_path: &Path, identifier: &str, collection: Option<&str>) -> Result<()> {
    let mut aids = open_aids(store_path)?;
    let key = ArticleRef::new(collection_label(collection), identifier);
    if aids.toggle_favorite(key)? {
        println!("Added article {} to favorites.", style(identifier).cyan());
    } else {
        println!("Removed article {} from favorites.", style(identifier).cyan());
    }
    Ok(())
}

fn favorites_command(store_path: &Path) -> Result<()> {
    let aids = open_aids(store_path)?;
    let favorites = aids.favorites()?;
    if favorites.is_empty() {
        println!("No favorites yet.");
    }
    for favorite in favorites {
        println!(
            "Art. {:<6} {}",
            favorite.identifier,
            style(favorite.collection).dim()
        );
    }
    Ok(())
}

fn note_command(
    store_path: &Path,
    identifier: &str,
    text: Option<&str>,
    collection: Option<&str>,
) -> Result<()> {
    let mut aids = open_aids(store_path)?;
    let key = ArticleRef::new(collection_label(collection), identifier);
    match text {
        Some(text) => {
            aids.save_note(&key, text)?;
            println!("{}", style("Note saved.").green());
        }
        None => match aids.note(&key)? {
            Some(note) => println!("{}", textwrap::fill(&note, TEXT_WRAP_WIDTH)),
            None => println!("No note for article {}.", style(identifier).cyan()),
        },
    }
    Ok(())
}

fn tag_command(
    store_path: &Path,
    identifier: &str,
    tag: &str,
    collection: Option<&str>,
    remove: bool,
) -> Result<()> {
    let mut aids = open_aids(store_path)?;
    let key = ArticleRef::new(collection_label(collection), identifier);
    if remove {
        aids.remove_tag(&key, tag)?;
    } else {
        aids.add_tag(&key, tag)?;
    }
    println!("Tags: {}", style(aids.tags(&key)?.join(", ")).green());
    Ok(())
}

fn history_command(store_path: &Path, limit: usize) -> Result<()> {
    let aids = open_aids(store_path)?;
    let recent = aids.recent(limit)?;
    if recent.is_empty() {
        println!("Nothing read yet.");
    }
    for entry in recent {
        println!(
            "{}  Art. {:<6} {}",
            style(entry.read_at.format("%Y-%m-%d %H:%M")).dim(),
            entry.article.identifier,
            entry.article.collection
        );
    }
    Ok(())
}

fn print_summary(article: &Article) {
    match article.kind {
        RowKind::Heading => println!("{}", style(&article.text).bold().underlined()),
        RowKind::Article => println!(
            "  {:<8} {}",
            style(&article.identifier).cyan(),
            truncate(&article.text, 80)
        ),
        RowKind::Orphan => println!(
            "  {:<8} {}",
            style(&article.identifier).cyan(),
            style("(no text)").dim()
        ),
    }
}

/// Cut text to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}
