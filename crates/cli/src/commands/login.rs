use clap::Args;
use smartshop_core::accounts::{AccountDirectory, AuthSession};
use smartshop_core::errors::ApplicationError;

use super::CommandResult;

const COMMAND: &str = "login";

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

/// Signs in against the demo account directory.
pub fn run(args: LoginArgs) -> CommandResult {
    let directory = AccountDirectory::demo();
    let mut session = AuthSession::new();

    match session.login(&directory, &args.email, &args.password) {
        Ok(user) => CommandResult::success_with_data(
            COMMAND,
            format!("signed in as {} {}", user.first_name, user.last_name),
            user,
        ),
        Err(error) => CommandResult::from_application_error(COMMAND, ApplicationError::from(error)),
    }
}
