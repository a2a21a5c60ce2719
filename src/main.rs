//! Biblia command-line reader and HTTP server.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use biblia::config::ReaderConfig;
use biblia::db::import_translation;
use biblia::output::{
    format_chapter, format_chapters, format_passage, print_books, print_resolution,
    print_search_results, print_stats, write_csv, write_json,
};
use biblia::reader::Reader;
use biblia::registry::Registry;
use biblia::server;
use biblia::store::{canonicalize_codes, is_valid_key, parse_translation_json};

#[derive(Parser)]
#[command(name = "biblia")]
#[command(about = "Book, chapter and verse lookup for Portuguese Bible translations")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of <key>.json translation files [default: data]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// SQLite database to read instead of the JSON directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Translation key [default: acf]
    #[arg(short = 't', long, global = true)]
    translation: Option<String>,

    /// Only log warnings and suppress progress output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Listen address [default: 127.0.0.1:8080]
        #[arg(long)]
        addr: Option<SocketAddr>,
    },

    /// Print a chapter, a chapter range (e.g. 1-3) or selected verses
    Read {
        /// Book code, name or abbreviation
        book: String,

        /// Chapter number, or a range such as 1-3
        chapter: String,

        /// Verse expression such as 5,7,9-11
        verses: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search verse text (case-insensitive substring)
    Search {
        query: String,

        /// Maximum number of results [default: 20]
        #[arg(long)]
        limit: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write results as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List the books of a translation
    Books {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show how a book token resolves
    Resolve { token: String },

    /// Suggest canonical books for a prefix
    Suggest { prefix: String },

    /// Show translation statistics
    Stats,

    /// Import a JSON translation into a SQLite database
    Import {
        /// JSON translation file
        #[arg(long)]
        input: PathBuf,

        /// Translation key to store it under
        #[arg(long)]
        key: String,

        /// SQLite database path (created if missing)
        #[arg(long)]
        output: PathBuf,
    },
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    // Start with defaults (or the config file), then overlay explicit flags
    let defaults = match &cli.config {
        Some(path) => ReaderConfig::load(path)?,
        None => ReaderConfig::default(),
    };
    let config = ReaderConfig {
        data_dir: cli.data_dir.unwrap_or(defaults.data_dir),
        database: cli.database.or(defaults.database),
        default_translation: cli.translation.unwrap_or(defaults.default_translation),
        ..defaults
    };
    let key = config.default_translation.clone();
    let registry = Arc::new(Registry::standard());

    match cli.command {
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or(config.addr);
            let reader = Arc::new(Reader::from_config(&config, registry));
            if !config.preload.is_empty() {
                reader.store().preload(&config.preload)?;
            }
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(addr, reader))?;
        }

        Commands::Read {
            book,
            chapter,
            verses,
            json,
        } => {
            let reader = Reader::from_config(&config, registry);
            let mut stdout = std::io::stdout().lock();

            match (chapter.split_once('-'), verses) {
                (_, Some(expr)) => {
                    let view = reader.passage(&key, &book, &chapter, &expr)?;
                    if json {
                        write_json(&view, &mut stdout)?;
                    } else {
                        print!("{}", format_passage(&view));
                    }
                }
                (Some((from, to)), None) => {
                    let view = reader.chapters(&key, &book, Some(from), Some(to))?;
                    if json {
                        write_json(&view, &mut stdout)?;
                    } else {
                        print!("{}", format_chapters(&view));
                    }
                }
                (None, None) => {
                    let view = reader.chapter(&key, &book, &chapter)?;
                    if json {
                        write_json(&view, &mut stdout)?;
                    } else {
                        print!("{}", format_chapter(&view));
                    }
                }
            }
        }

        Commands::Search {
            query,
            limit,
            json,
            csv,
        } => {
            let reader = Reader::from_config(&config, registry);
            let results = reader.search(&key, &query, limit.as_deref())?;

            if json {
                write_json(&results, &mut std::io::stdout().lock())?;
            } else {
                print_search_results(&results);
            }
            if let Some(path) = csv {
                let mut file = std::fs::File::create(&path)?;
                write_csv(&results.results, &mut file)?;
                if !cli.quiet {
                    eprintln!("CSV output: {}", path.display());
                }
            }
        }

        Commands::Books { json } => {
            let reader = Reader::from_config(&config, registry);
            let books = reader.books(&key)?;
            if json {
                write_json(&books, &mut std::io::stdout().lock())?;
            } else {
                print_books(&books);
            }
        }

        Commands::Resolve { token } => {
            let reader = Reader::from_config(&config, registry);
            print_resolution(&reader.resolve(&key, &token)?);
        }

        Commands::Suggest { prefix } => {
            let reader = Reader::from_config(&config, registry);
            for book in reader.suggest(&prefix) {
                println!("{:<5} {} / {}", book.code, book.name_pt, book.name_en);
            }
        }

        Commands::Stats => {
            let reader = Reader::from_config(&config, registry);
            print_stats(&reader.stats(&key)?);
        }

        Commands::Import { input, key, output } => {
            if !is_valid_key(&key) {
                return Err(format!("invalid translation key '{}'", key).into());
            }
            if !cli.quiet {
                eprintln!("Reading {}...", input.display());
            }
            let content = std::fs::read_to_string(&input)?;
            let mut translation = parse_translation_json(&key, &content)?;
            canonicalize_codes(&mut translation, &registry);
            translation.check_dense()?;

            let written = import_translation(&output, &translation, !cli.quiet)?;
            if !cli.quiet {
                eprintln!(
                    "Imported {} verses of '{}' into {}",
                    written,
                    key,
                    output.display()
                );
            }
        }
    }

    Ok(())
}
