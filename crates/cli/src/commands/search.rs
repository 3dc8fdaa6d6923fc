use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use smartshop_core::domain::product::Product;
use smartshop_core::errors::ApplicationError;
use smartshop_core::search::{search_catalog, SearchOptions, SortBy};

use super::{CommandResult, GlobalArgs, Runtime};

const COMMAND: &str = "search";

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(help = "Free-text query matched against product names and brands")]
    pub query: String,
    #[arg(long, help = "Inclusive lower price bound")]
    pub min_price: Option<Decimal>,
    #[arg(long, help = "Inclusive upper price bound")]
    pub max_price: Option<Decimal>,
    #[arg(long, help = "price_asc | price_desc | name | relevance")]
    pub sort: Option<SortBy>,
}

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    sort_by: SortBy,
    filtered: bool,
    result_count: usize,
    results: Vec<Product>,
}

pub fn run(globals: &GlobalArgs, args: SearchArgs) -> CommandResult {
    let runtime = match Runtime::load(COMMAND, globals) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let options = SearchOptions {
        min_price: args.min_price,
        max_price: args.max_price,
        sort_by: args.sort.unwrap_or(runtime.config.search.default_sort),
    };

    let catalog = runtime.catalog();
    let results = match search_catalog(catalog.products(), &args.query, &options) {
        Ok(results) => results,
        Err(error) => {
            return CommandResult::from_application_error(COMMAND, ApplicationError::from(error))
        }
    };

    let query = args.query.trim();
    let message = if query.is_empty() {
        format!("blank query listed all {} product(s)", results.len())
    } else {
        format!("{} product(s) matched `{query}`", results.len())
    };
    let report = SearchReport {
        query,
        sort_by: options.sort_by,
        filtered: options.has_active_filters(),
        result_count: results.len(),
        results,
    };

    CommandResult::success_with_data(COMMAND, message, report)
}
