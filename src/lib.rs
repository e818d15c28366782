pub mod ingest;
pub mod model;
pub mod search;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use model::types::Product;
use search::query::{Query, SortMode};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "quickcart-search",
    version,
    about = "Substring search over a JSON product catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a catalog file and report how many products it holds
    Ingest {
        /// Path to a JSON file containing an array of product objects
        file: PathBuf,
    },
    /// Search a catalog for products matching a query
    Search {
        /// Path to a JSON file containing an array of product objects
        file: PathBuf,

        /// Query text; "under 10k" style budget phrases are honored
        query: String,

        /// Maximum price cap; overrides any budget phrase in the query
        #[arg(long)]
        budget: Option<f64>,

        /// Result ordering
        #[arg(long, value_enum, default_value = "catalog-order")]
        sort: SortMode,

        /// Print at most this many matches
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { file } => run_ingest(&file),
        Commands::Search {
            file,
            query,
            budget,
            sort,
            limit,
        } => run_search(&file, &query, budget, sort, limit),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "qcart", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

fn run_ingest(file: &PathBuf) -> Result<()> {
    let catalog = ingest::load_catalog(file)?;
    println!(
        "Loaded {} products from {}",
        catalog.len(),
        file.display()
    );
    Ok(())
}

fn run_search(
    file: &PathBuf,
    raw_query: &str,
    budget: Option<f64>,
    sort: SortMode,
    limit: Option<usize>,
) -> Result<()> {
    let catalog = ingest::load_catalog(file)?;

    let mut query =
        Query::parse(raw_query).with_context(|| format!("rejecting query {raw_query:?}"))?;
    if let Some(cap) = budget {
        query = query.with_budget(cap);
    }
    tracing::debug!(text = query.text(), max_price = ?query.max_price(), "query parsed");

    let mut hits = search::query::search(&catalog, &query);
    search::query::apply_sort(&mut hits, sort);
    if let Some(n) = limit {
        hits.truncate(n);
    }

    for product in &hits {
        println!("{}", render_line(product));
    }
    println!("{} match(es)", hits.len());
    Ok(())
}

/// One product per line, absent fields omitted.
fn render_line(product: &Product) -> String {
    let mut line = format!("- {}", product.name);
    if let Some(brand) = &product.brand {
        line.push_str(&format!(" | {brand}"));
    }
    if let Some(price) = product.price {
        line.push_str(&format!(" | {price}"));
    }
    if let Some(category) = &product.category {
        line.push_str(&format!(" | {category}"));
    }
    line
}
