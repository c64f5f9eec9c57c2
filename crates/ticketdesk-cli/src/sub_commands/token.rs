use anyhow::Result;
use clap::{Args, Subcommand};
use ticketdesk_client::{FileStorage, LocalStorage, TOKEN_STORAGE_KEY};

#[derive(Args)]
pub struct TokenSubCommand {
    #[command(subcommand)]
    action: TokenAction,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store an access token used for every following request
    Set {
        /// Access token
        token: String,
    },
    /// Remove the stored access token
    Clear,
    /// Show whether a token is stored
    Show {
        /// Print the token itself
        #[arg(long)]
        reveal: bool,
    },
}

pub async fn token(storage: &FileStorage, sub_command_args: &TokenSubCommand) -> Result<()> {
    match &sub_command_args.action {
        TokenAction::Set { token } => {
            storage.set_item(TOKEN_STORAGE_KEY, token.trim()).await?;
            println!("Token stored in {}", storage.path().display());
        }
        TokenAction::Clear => {
            storage.remove_item(TOKEN_STORAGE_KEY).await?;
            println!("Token removed");
        }
        TokenAction::Show { reveal } => {
            match storage.get_item(TOKEN_STORAGE_KEY).await? {
                Some(token) if *reveal => println!("{}", token),
                Some(_) => println!("Token is set"),
                None => println!("No token stored"),
            }
        }
    }

    Ok(())
}
