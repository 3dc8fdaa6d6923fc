use clap::Args;
use smartshop_core::checkout::CheckoutService;
use smartshop_core::domain::retailer::RetailerId;
use smartshop_core::errors::ApplicationError;

use super::{build_cart, CommandResult, GlobalArgs, Runtime};

const COMMAND: &str = "order";

#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    #[arg(long = "item", value_name = "ID[:QTY]", required = true, help = "Cart line to order")]
    pub items: Vec<String>,
    #[arg(long, help = "Retailer id to hand the order to")]
    pub retailer: String,
    #[arg(long, help = "Seed for the order number")]
    pub seed: Option<u64>,
}

pub fn run(globals: &GlobalArgs, args: OrderArgs) -> CommandResult {
    let runtime = match Runtime::load(COMMAND, globals) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let mut cart = match build_cart(&runtime.catalog(), &args.items) {
        Ok(cart) => cart,
        Err(error) => return CommandResult::from_application_error(COMMAND, error),
    };

    let mut rng = runtime.rng(args.seed);
    let retailer_id = RetailerId(args.retailer.trim().to_string());
    let confirmation = match CheckoutService::default().place_order(
        &mut cart,
        &runtime.dataset.retailers,
        &retailer_id,
        &mut rng,
    ) {
        Ok(confirmation) => confirmation,
        Err(error) => {
            return CommandResult::from_application_error(COMMAND, ApplicationError::from(error))
        }
    };

    let message = format!(
        "order {} placed with {} for {} {}",
        confirmation.order_number,
        confirmation.retailer_name,
        confirmation.total.round_dp(2),
        runtime.config.checkout.currency
    );
    CommandResult::success_with_data(COMMAND, message, confirmation)
}
