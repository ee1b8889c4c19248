use clap::Subcommand;

use offhours_core::auth;

use super::CliError;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the management-API bearer token in the OS keyring
    Login {
        #[arg(long)]
        token: String,
    },
    /// Remove the stored token
    Logout,
    /// Report whether a token is available
    Status,
}

pub fn run(action: AuthAction) -> Result<(), CliError> {
    match action {
        AuthAction::Login { token } => {
            auth::store_token(&token)?;
            println!("token stored");
        }
        AuthAction::Logout => {
            auth::clear_token()?;
            println!("token removed");
        }
        AuthAction::Status => match auth::stored_token()? {
            Some(_) => println!("token available"),
            None => println!("no token stored"),
        },
    }
    Ok(())
}
