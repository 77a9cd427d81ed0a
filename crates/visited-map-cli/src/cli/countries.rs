//! Store commands: add, remove and list a user's visited countries.

use std::path::PathBuf;

use clap::Args;

use visited_map::{UserId, VisitedStore};

use super::common::{CliError, Config, open_store};

#[derive(Debug, Args)]
pub struct CountryArgs {
    /// Country name, exactly as it appears in the dataset
    pub country: String,

    /// User the visit belongs to
    #[arg(short, long)]
    pub user: UserId,

    /// Visited-country store file
    #[arg(long)]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long)]
    pub user: UserId,

    /// Visited-country store file
    #[arg(long)]
    pub store: Option<PathBuf>,
}

fn validate(args: &CountryArgs) -> Result<(), CliError> {
    if args.user == 0 || args.country.is_empty() {
        return Err(CliError::Usage("user and country are required".to_string()));
    }
    Ok(())
}

/// Execute the add command.
pub fn cmd_add(args: &CountryArgs, config: &Config) -> Result<(), CliError> {
    validate(args)?;
    let store = open_store(args.store.as_deref(), config)?;

    if store.add(args.user, &args.country)? {
        tracing::info!(
            user = args.user,
            country = %args.country,
            store = %store.path().display(),
            "saved country"
        );
    } else {
        tracing::info!(user = args.user, country = %args.country, "country already recorded");
    }
    Ok(())
}

/// Execute the remove command.
pub fn cmd_remove(args: &CountryArgs, config: &Config) -> Result<(), CliError> {
    validate(args)?;
    let store = open_store(args.store.as_deref(), config)?;

    if store.remove(args.user, &args.country)? {
        tracing::info!(user = args.user, country = %args.country, "removed country");
    } else {
        tracing::warn!(user = args.user, country = %args.country, "country was not recorded");
    }
    Ok(())
}

/// Execute the list command. Prints a JSON array, `[]` for unknown users.
pub fn cmd_list(args: &ListArgs, config: &Config) -> Result<(), CliError> {
    let store = open_store(args.store.as_deref(), config)?;
    println!("{}", serde_json::to_string(&store.countries(args.user))?);
    Ok(())
}
