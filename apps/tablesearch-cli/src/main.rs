//! tablesearch - keyword lookup over the knowledge tables.
//!
//! ```bash
//! tablesearch "churn rate"                     # domain picked from the query
//! tablesearch "window functions" --domain sql -n 5
//! tablesearch "mrr" --industry saas --json
//! ```

mod output;

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tablesearch_core::config::{resolve_with_base, Config};
use tablesearch_core::registry::Registry;
use tablesearch_core::table_store::CsvTableStore;
use tablesearch_text::{Catalog, KnowledgeSearch};

#[derive(Parser)]
#[command(name = "tablesearch", version, about)]
struct Cli {
    /// Search query
    query: String,

    /// Domain to search. Detected from the query when omitted.
    #[arg(short, long, value_parser = registry_keys(&Registry::domains()))]
    domain: Option<String>,

    /// Industry metrics to search. Takes priority over --domain.
    #[arg(short, long, value_parser = registry_keys(&Registry::industries()))]
    industry: Option<String>,

    /// Maximum number of results (default from config, 3)
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Directory holding the knowledge tables (overrides data.dir)
    #[arg(long)]
    data_dir: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn registry_keys(registry: &Registry) -> PossibleValuesParser {
    let keys: Vec<PossibleValue> = registry.keys().map(|k| PossibleValue::new(k.to_string())).collect();
    PossibleValuesParser::new(keys)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Config::load()?.settings()?;
    let data_dir = match &cli.data_dir {
        Some(dir) => resolve_with_base(&env::current_dir()?, dir),
        None => settings.data_dir(),
    };
    let max_results = cli.max_results.unwrap_or(settings.search.max_results);

    let catalog = Catalog::standard();
    let search = KnowledgeSearch::new(&catalog, CsvTableStore::new(data_dir)).with_params(settings.bm25.into());

    let response = match &cli.industry {
        Some(industry) => search.search_industry(&cli.query, industry, max_results),
        None => search.search(&cli.query, cli.domain.as_deref(), max_results),
    };

    let rendered = if cli.json { output::format_json(&response) } else { output::format_human(&response) };
    println!("{}", rendered);

    Ok(if response.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() { Cli::command().debug_assert(); }

    #[test]
    fn domain_and_industry_accept_declared_keys_only() {
        let cli = Cli::try_parse_from(["tablesearch", "window functions", "--domain", "sql"]).expect("sql");
        assert_eq!(cli.domain.as_deref(), Some("sql"));
        let cli = Cli::try_parse_from(["tablesearch", "mrr", "-i", "saas", "-n", "5"]).expect("saas");
        assert_eq!(cli.industry.as_deref(), Some("saas"));
        assert_eq!(cli.max_results, Some(5));

        assert!(Cli::try_parse_from(["tablesearch", "q", "--domain", "astrology"]).is_err());
        assert!(Cli::try_parse_from(["tablesearch", "q", "--industry", "retail"]).is_err());
    }
}
