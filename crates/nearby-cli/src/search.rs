//! The `search` subcommand: fetch pages, filter by name, print rows.

use anyhow::Context;
use clap::{Args, ValueEnum};

use nearby_core::{AppConfig, BusinessListing, SearchOptions, SortMode};
use nearby_yelp::YelpClient;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    BestMatched,
    Distance,
    HighestRated,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::BestMatched => SortMode::BestMatched,
            SortArg::Distance => SortMode::Distance,
            SortArg::HighestRated => SortMode::HighestRated,
        }
    }
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search term; falls back to the configured default.
    #[arg(long)]
    term: Option<String>,

    /// Number of pages to fetch (the first plus pages-1 "load more" fetches).
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// Show only businesses whose name contains this text (case-insensitive).
    #[arg(long)]
    filter: Option<String>,

    /// Sort order applied by the remote API.
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Category code to filter on; repeatable.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Only businesses currently offering deals.
    #[arg(long)]
    deals: bool,

    /// Print latitude/longitude for the map path.
    #[arg(long)]
    show_coordinates: bool,
}

pub async fn run(args: SearchArgs, config: &AppConfig) -> anyhow::Result<()> {
    let client = YelpClient::with_base_url(
        &config.yelp_api_key,
        config.request_timeout_secs,
        &config.yelp_base_url,
    )
    .context("failed to construct the search client")?;

    let term = args.term.unwrap_or_else(|| config.default_term.clone());
    let options = SearchOptions {
        sort_mode: args.sort.map(SortMode::from),
        categories: args.categories,
        deals_only: args.deals,
    };

    let mut listing = BusinessListing::with_options(client, term, config.page_size, options);
    listing.start().await.context("initial search failed")?;

    for page in 1..args.pages {
        if listing.reached_end() {
            tracing::info!(page, "no more results, stopping pagination early");
            break;
        }
        listing
            .load_more()
            .await
            .with_context(|| format!("failed to fetch page {}", page + 1))?;
    }

    if let Some(filter) = args.filter.as_deref() {
        listing.set_filter(filter);
    }

    if listing.visible().is_empty() {
        println!("no businesses matched");
        return Ok(());
    }

    for business in listing.visible() {
        let reviews = business
            .review_count
            .map_or_else(String::new, |n| format!(" ({n} reviews)"));
        println!("{}{reviews}", business.name);
        if !business.address.is_empty() {
            println!("  {}", business.address);
        }
        if !business.categories.is_empty() {
            println!("  {}", business.categories);
        }
        if !business.distance.is_empty() {
            println!("  {}", business.distance);
        }
        if args.show_coordinates {
            if let Some(c) = business.coordinate {
                println!("  {:.5}, {:.5}", c.latitude, c.longitude);
            }
        }
    }
    println!(
        "\n{} shown / {} fetched",
        listing.visible().len(),
        listing.total_fetched()
    );

    Ok(())
}
