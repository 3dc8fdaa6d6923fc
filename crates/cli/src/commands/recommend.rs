use clap::Args;
use smartshop_core::recommend::RecommendationEngine;

use super::{build_cart, CommandResult, GlobalArgs, Runtime};

const COMMAND: &str = "recommend";

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long = "item", value_name = "ID[:QTY]", help = "Cart line used as a hint")]
    pub items: Vec<String>,
    #[arg(long = "max", help = "Number of suggestions (defaults to recommendations.max_count)")]
    pub max_count: Option<usize>,
    #[arg(long, help = "Seed for the random fill (defaults to recommendations.seed)")]
    pub seed: Option<u64>,
}

pub fn run(globals: &GlobalArgs, args: RecommendArgs) -> CommandResult {
    let runtime = match Runtime::load(COMMAND, globals) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let catalog = runtime.catalog();
    let cart = match build_cart(&catalog, &args.items) {
        Ok(cart) => cart,
        Err(error) => return CommandResult::from_application_error(COMMAND, error),
    };

    let max_count = args.max_count.unwrap_or(runtime.config.recommendations.max_count);
    let mut rng = runtime.rng(args.seed);
    let recommendations = RecommendationEngine::default().recommend_scored(
        cart.items(),
        catalog.products(),
        max_count,
        &mut rng,
    );

    let message = format!(
        "{} recommendation(s) for a cart of {} item(s)",
        recommendations.len(),
        cart.total_items()
    );
    CommandResult::success_with_data(COMMAND, message, recommendations)
}
