//! econ-define - Economics Term Lookup
//!
//! Prints definitions for economics terms, tolerating typos in the input.

use anyhow::Result;
use clap::Parser;
use econ_define::batch::Batch;
use econ_define::config::Config;
use econ_define::render::render_lookup;
use econ_define::utils::Metric;
use econ_define::{terms, DefineError, FuzzyMap};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Terms to define, or FILE.txt [DELIMITER] to read terms from a file
    inputs: Vec<String>,

    /// Term data file (JSON object of term -> definition)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Minimum similarity ratio for a fuzzy match
    #[arg(short, long)]
    cutoff: Option<f64>,

    /// Similarity metric
    #[arg(short, long, value_enum)]
    metric: Option<Metric>,

    /// Number of alternatives shown when a term is not found
    #[arg(short, long)]
    suggestions: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with an error if any term is not found
    #[arg(long)]
    strict: bool,

    /// Persist the effective settings to the config file
    #[arg(long)]
    save_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data_path = Some(data.clone());
        }
        if let Some(cutoff) = self.cutoff {
            config.cutoff = cutoff;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(suggestions) = self.suggestions {
            config.suggestions = suggestions;
        }
        if self.no_color {
            config.color = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("econ-define v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load()?;
    args.apply(&mut config);
    config.validate()?;

    if args.save_config {
        let path = config.save()?;
        info!("💾 Saved config to {}", path.display());
    }

    let entries = terms::resolve_terms(config.data_path.as_deref())?;
    let glossary = FuzzyMap::with_similarity(entries, config.cutoff, config.metric);
    let opts = config.render_options();

    let batch = Batch::from_args(&args.inputs);
    if batch.is_demo() {
        println!(
            "Here's a demo of running {} in the terminal",
            opts.command("econ-define \"aggregate demand\"")
        );
    }

    let mut first_miss = None;
    for query in batch.queries()? {
        println!();
        let result = glossary.search(&query, false);
        let closest = match result.miss(&query) {
            Some(miss) => {
                first_miss.get_or_insert(miss);
                glossary.closest(&query, config.suggestions)
            }
            None => Vec::new(),
        };
        println!("{}", render_lookup(&query, &result, &closest, &opts));
    }

    if batch.is_demo() {
        println!();
        println!(
            "You can also use {} to load a file",
            opts.command("econ-define FILE_NAME.txt OPTIONAL_DELIMITER=\"\\n\"")
        );
    }

    if let Some(miss) = first_miss.filter(|_| args.strict) {
        return Err(DefineError::from(miss).into());
    }

    Ok(())
}
