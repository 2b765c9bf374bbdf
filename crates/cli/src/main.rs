//! Kharido CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations (tables + session store)
//! kharido-cli migrate storefront
//!
//! # Seed the catalog from a JSON file
//! kharido-cli seed products --file catalog.json
//!
//! # Replace the catalog wholesale
//! kharido-cli seed products --file catalog.json --clear
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed products` - Load catalog entries from a JSON file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kharido-cli")]
#[command(author, version, about = "Kharido CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed database content
    Seed {
        #[command(subcommand)]
        what: SeedTarget,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert catalog products from a JSON file
    Products {
        /// Path to the catalog JSON file
        #[arg(short, long)]
        file: String,

        /// Delete the existing catalog first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kharido_cli=info,kharido_storefront=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate {
            target: MigrateTarget::Storefront,
        } => commands::migrate::storefront().await?,
        Commands::Seed {
            what: SeedTarget::Products { file, clear },
        } => commands::seed::products(&file, clear).await?,
    }

    Ok(())
}
