//! Stash terminal shell
//!
//! Thin command-line front end over the catalog resolver.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stash_core::{CatalogConfig, Category, Item, Query, QueryResolver};

#[derive(Debug, Parser)]
#[command(name = "stash", version, about = "Search and browse a collectibles catalog")]
struct Cli {
    /// Configuration file (default: ~/.stash/config.toml, then ./.stash/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store location, overriding the configured path
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search items by name and/or series
    Search {
        /// Search term (empty matches everything)
        term: Option<String>,

        /// Field scope: name, series or all
        #[arg(long)]
        scope: Option<String>,

        /// Exact series label to filter by ("all" for no filter)
        #[arg(long)]
        category: Option<String>,

        /// Sort as key[:direction], e.g. name:desc
        #[arg(long)]
        sort: Option<String>,
    },
    /// List every series label in the catalog
    Categories,
    /// Show one item
    Show {
        /// Item id
        id: String,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load_from_path(path)?,
        None => CatalogConfig::load_standard(std::env::current_dir().ok().as_deref())?,
    };
    if let Some(path) = &cli.store {
        config.store.path = path.clone();
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let resolver = QueryResolver::new(config.store.open()?);

    match cli.command {
        Command::Search {
            term,
            scope,
            category,
            sort,
        } => {
            let query = Query {
                term: term.unwrap_or_default(),
                scope: match scope {
                    Some(s) => s.parse()?,
                    None => config.defaults.scope,
                },
                category: Category::parse(category.as_deref().unwrap_or("all")),
                sort: match sort {
                    Some(s) => s.parse()?,
                    None => config.defaults.sort,
                },
            };
            let items = resolver.resolve(&query)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No items found.");
            } else {
                for item in &items {
                    print_row(item);
                }
            }
        }
        Command::Categories => {
            let categories = resolver.build_categories()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in &categories {
                    println!("{}", category);
                }
            }
        }
        Command::Show { id } => match resolver.get_by_id(&id)? {
            Some(item) if cli.json => println!("{}", serde_json::to_string_pretty(&item)?),
            Some(item) => print_detail(&item),
            None => {
                eprintln!("item not found: {}", id);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn print_row(item: &Item) {
    println!("{}\t{}\t[{}]", item.id, item.name(), item.primary_series());
}

fn print_detail(item: &Item) {
    println!("{}", item.name());
    println!("  series: {}", item.series().labels().join(", "));
    if let Some(description) = &item.description {
        println!("  description: {}", description);
    }
    if let Some(brand) = &item.brand {
        println!("  brand: {}", brand);
    }
    if let Some(size) = &item.size {
        println!("  size: {}", size);
    }
    if let Some(price) = &item.price {
        println!("  price: {}", serde_json::to_string(price).unwrap_or_default());
    }
    if let Some(image) = &item.image {
        println!("  image: {}", image);
    }
}
