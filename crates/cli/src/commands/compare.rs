use clap::Args;
use smartshop_core::checkout::CheckoutService;
use smartshop_core::errors::ApplicationError;

use super::{build_cart, CommandResult, GlobalArgs, Runtime};

const COMMAND: &str = "compare";

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    #[arg(long = "item", value_name = "ID[:QTY]", required = true, help = "Cart line to price")]
    pub items: Vec<String>,
}

pub fn run(globals: &GlobalArgs, args: CompareArgs) -> CommandResult {
    let runtime = match Runtime::load(COMMAND, globals) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let summary = build_cart(&runtime.catalog(), &args.items).and_then(|cart| {
        CheckoutService::default()
            .summarize(&cart, &runtime.dataset.retailers)
            .map_err(ApplicationError::from)
    });
    let summary = match summary {
        Ok(summary) => summary,
        Err(error) => return CommandResult::from_application_error(COMMAND, error),
    };

    let currency = &runtime.config.checkout.currency;
    let message = match summary.comparison.cheapest_quote() {
        Some(quote) => format!(
            "{} item(s) compared across {} retailer(s); cheapest is {} at {} {currency}",
            summary.total_items,
            summary.comparison.quotes.len(),
            quote.retailer.name,
            quote.total.round_dp(2),
        ),
        None => format!("{} item(s) compared; no retailers configured", summary.total_items),
    };

    CommandResult::success_with_data(COMMAND, message, summary)
}
