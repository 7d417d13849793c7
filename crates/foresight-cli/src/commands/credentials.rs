//! Credentials command implementation.

use crate::cli::{CredentialsAction, CredentialsArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::{mask_key, Formatter};

/// Execute the credentials command.
pub fn execute_credentials(
    args: CredentialsArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let store = config.credential_store();
    match args.action {
        CredentialsAction::Set { key } => {
            store.save(&key)?;
            println!(
                "{}",
                formatter.success(&format!("API key saved to {}", store.path().display()))
            );
        }
        CredentialsAction::Show => match store.load()? {
            Some(key) => println!(
                "{}",
                formatter.info(&format!("API key: {} ({})", mask_key(&key), store.path().display()))
            ),
            None => println!(
                "{}",
                formatter.warning(&format!("No API key stored in {}", store.path().display()))
            ),
        },
    }
    Ok(())
}
