use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::{ExplorerConfig, load_config};
use crate::explorer::ListingExplorer;
use crate::filters::{FilterUpdate, PriceRange, SortKey, parse_filter};
use crate::models::{Property, PropertyType, SharingKind};
use crate::store::{ListingStore, build_store};
use crate::utils::{format_path_with_tilde, sanitize_line};

#[derive(Parser)]
#[command(name = "pg-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Filter, sort and browse PG and co-living listings", long_about = None)]
pub struct Cli {
    /// Config file (defaults to $PG_EXPLORER_CONFIG, then the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter and sort listings, printing the results
    Search(SearchArgs),
    /// Show statistics about the loaded listings
    Stats {
        /// Listing page files or directories of them
        #[arg(required = true, value_name = "INPUTS")]
        inputs: Vec<PathBuf>,
    },
    /// Browse listings interactively
    Browse {
        /// Listing page files or directories of them
        #[arg(required = true, value_name = "INPUTS")]
        inputs: Vec<PathBuf>,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Listing page files or directories of them
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Filter expression, e.g. `city:pune price:5000-12000 amenity:wifi`
    #[arg(short, long, value_name = "EXPR")]
    pub filter: Option<String>,

    /// Fuzzy text matched against title, address and city
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Sort order (overrides any `sort:` term in the filter)
    #[arg(short, long, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Maximum number of listings to print (defaults to the configured page limit)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Search(args)) => {
            let config = load_config(cli.config.as_deref())?;
            search(config, args)?;
        }
        Some(Commands::Stats { inputs }) => {
            let config = load_config(cli.config.as_deref())?;
            show_stats(config, inputs)?;
        }
        Some(Commands::Browse { inputs }) => {
            let config = load_config(cli.config.as_deref())?;
            browse(config, inputs)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Build an explorer and apply the filter, sort and query from `args`
pub fn explorer_for_search(config: ExplorerConfig, args: &SearchArgs) -> Result<ListingExplorer> {
    let store = build_store(&args.inputs)?;
    let mut explorer = ListingExplorer::new(config);
    explorer.load_page(store.into_page());

    let mut update = match args.filter.as_deref() {
        Some(expr) => parse_filter(expr).context("Invalid --filter expression")?,
        None => FilterUpdate::new(),
    };
    if let Some(sort) = args.sort {
        update = update.sort_by(sort);
    }

    explorer.update_filters(update, Instant::now())?;
    explorer.flush_pending();

    if let Some(ref query) = args.query {
        explorer.set_search(query);
    }

    Ok(explorer)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput<'a> {
    result_count: usize,
    active_filters: usize,
    price_bounds: PriceRange,
    locations: &'a [String],
    next_page: Option<String>,
    results: Vec<&'a Property>,
}

fn search(config: ExplorerConfig, args: &SearchArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(config.page_limit as usize);
    let explorer = explorer_for_search(config, args)?;
    let next_page = explorer.next_page().map(|request| request.to_query_string());

    if args.json {
        let output = SearchOutput {
            result_count: explorer.result_count(),
            active_filters: explorer.active_filters_count(),
            price_bounds: explorer.price_bounds(),
            locations: explorer.locations(),
            next_page,
            results: explorer.results().take(limit).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Found {} of {} listings ({} active filters, sort: {})",
        explorer.result_count(),
        explorer.store().len(),
        explorer.active_filters_count(),
        explorer.state().sort_by
    );

    for (i, property) in explorer.results().take(limit).enumerate() {
        println!("{:>3}. {}", i + 1, listing_row(property));
    }

    if explorer.result_count() > limit {
        println!("  ... {} more", explorer.result_count() - limit);
    }

    if !explorer.locations().is_empty() {
        let locations: Vec<String> =
            explorer.locations().iter().map(|l| sanitize_line(l)).collect();
        println!();
        println!("Locations: {}", locations.join("; "));
    }

    if let Some(query) = next_page {
        println!("Next page: {}", query);
    }

    Ok(())
}

fn listing_row(property: &Property) -> String {
    let price = property.min_price().map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
    let rating =
        property.average_rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string());
    let place = property.address.as_deref().or(property.city.as_deref()).unwrap_or("-");

    format!(
        "{:>6} | {} | {} | {} | {}",
        price,
        sanitize_line(&property.title),
        sanitize_line(place),
        rating,
        sanitize_line(&property.id)
    )
}

fn show_stats(config: ExplorerConfig, inputs: &[PathBuf]) -> Result<()> {
    let store = build_store(inputs)?;
    let stats = ListingStats::collect(&store);
    let explorer = ListingExplorer::with_listings(config, store.properties);

    println!("Listing Statistics");
    println!("==================");
    println!("Total listings: {}", explorer.store().len());
    println!("  Pages loaded: {}", store.pages_loaded);
    if store.pages_failed > 0 {
        println!("  Pages failed: {}", store.pages_failed);
    }
    if store.duplicates_dropped > 0 {
        println!("  Duplicates dropped: {}", store.duplicates_dropped);
    }
    println!("Price bounds: {}", explorer.price_bounds());
    println!();

    println!("By type:");
    for (label, count) in &stats.by_type {
        println!("  {}: {}", label, count);
    }
    println!();

    println!("Sharing offered:");
    for kind in SharingKind::ALL {
        if let Some((count, cheapest)) = stats.by_sharing.get(&kind) {
            println!("  {}: {} listings, from {}/month", kind, count, cheapest);
        }
    }
    if stats.without_sharing > 0 {
        println!("  none listed: {}", stats.without_sharing);
    }
    println!();

    println!("Cities: {}", stats.cities.len());
    for (city, count) in &stats.cities {
        println!("  {}: {}", sanitize_line(city), count);
    }

    for input in inputs {
        println!("Source: {}", format_path_with_tilde(input));
    }

    Ok(())
}

#[derive(Debug, Default)]
struct ListingStats {
    by_type: BTreeMap<String, usize>,
    /// Listings offering the kind, and the cheapest price seen for it
    by_sharing: BTreeMap<SharingKind, (usize, u32)>,
    without_sharing: usize,
    cities: BTreeMap<String, usize>,
}

impl ListingStats {
    fn collect(store: &ListingStore) -> Self {
        let mut stats = Self::default();

        for property in &store.properties {
            let label = property
                .property_type
                .as_ref()
                .map(PropertyType::to_string)
                .unwrap_or_else(|| "Unspecified".to_string());
            *stats.by_type.entry(label).or_default() += 1;

            if property.sharing_types.is_empty() {
                stats.without_sharing += 1;
            }
            for sharing in &property.sharing_types {
                let entry = stats.by_sharing.entry(sharing.kind).or_insert((0, sharing.price));
                entry.0 += 1;
                entry.1 = entry.1.min(sharing.price);
            }

            if let Some(city) = property.city.as_deref().map(str::trim)
                && !city.is_empty()
            {
                *stats.cities.entry(city.to_string()).or_default() += 1;
            }
        }

        stats
    }
}

fn browse(config: ExplorerConfig, inputs: &[PathBuf]) -> Result<()> {
    let mut explorer = ListingExplorer::new(config);
    match build_store(inputs) {
        Ok(store) => explorer.load_page(store.into_page()),
        Err(e) => explorer.set_load_error(format!("{:#}", e)),
    }
    crate::tui::run_interactive(explorer)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use clap::CommandFactory;

    use super::*;
    use crate::models::SharingType;

    fn property(id: &str, city: &str, sharing: &[(SharingKind, u32)]) -> Property {
        Property {
            id: id.to_string(),
            title: format!("PG {}", id),
            city: Some(city.to_string()),
            address: None,
            property_type: Some(PropertyType::Men),
            sharing_types: sharing
                .iter()
                .map(|&(kind, price)| SharingType { kind, price, available: 1 })
                .collect(),
            amenities: BTreeSet::new(),
            virtual_tour_url: None,
            average_rating: None,
            created_at: None,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_args_parse() {
        let cli = Cli::try_parse_from([
            "pg-explorer",
            "search",
            "pages/",
            "--filter",
            "city:pune",
            "--sort",
            "price-high",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.inputs, vec![PathBuf::from("pages/")]);
                assert_eq!(args.filter.as_deref(), Some("city:pune"));
                assert_eq!(args.sort, Some(SortKey::PriceHigh));
                assert!(args.json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_invalid_sort_rejected() {
        assert!(Cli::try_parse_from(["pg-explorer", "search", "x", "--sort", "cheapest"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["pg-explorer", "stats", "p.json", "--config", "c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_stats_collect() {
        let store = ListingStore {
            properties: vec![
                property("1", "Pune", &[(SharingKind::Single, 9000), (SharingKind::Double, 6000)]),
                property("2", "Pune", &[(SharingKind::Double, 5500)]),
                property("3", " ", &[]),
            ],
            ..Default::default()
        };

        let stats = ListingStats::collect(&store);
        assert_eq!(stats.by_type.get("Men only"), Some(&3));
        assert_eq!(stats.by_sharing.get(&SharingKind::Double), Some(&(2, 5500)));
        assert_eq!(stats.by_sharing.get(&SharingKind::Single), Some(&(1, 9000)));
        assert_eq!(stats.without_sharing, 1);
        assert_eq!(stats.cities.len(), 1);
    }

    #[test]
    fn test_listing_row_sanitizes() {
        let mut p = property("7", "Pune", &[(SharingKind::Triple, 4500)]);
        p.title = "Bad\x1b[2J\nTitle".to_string();
        let row = listing_row(&p);
        assert!(row.contains("4500"));
        assert!(row.contains("Bad Title"));
        assert!(!row.contains('\x1b'));
        assert!(!row.contains('\n'));
    }
}
