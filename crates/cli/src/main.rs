//! Go Marketplace CLI - Inspect and edit the locally stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cli list
//!
//! # Add a product (or one more unit of it)
//! gm-cli add --id 1 --title "Camiseta" --image-url https://cdn/1.png --price 59.90
//!
//! # Change quantities
//! gm-cli increment 1
//! gm-cli decrement 1
//! ```
//!
//! # Configuration
//!
//! The storage file and key come from `GO_MARKETPLACE_STORAGE_PATH` and
//! `GO_MARKETPLACE_STORAGE_KEY` (see `go_marketplace_cart::config`).
//!
//! # Output
//!
//! Cart contents are reported through `tracing` at `info` level, not printed
//! to stdout. A `RUST_LOG` that filters out `gm_cli=info` (e.g. `RUST_LOG=warn`)
//! hides the cart listing; use `RUST_LOG=warn,gm_cli=info` to quiet only the
//! library logs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use go_marketplace_cart::CartConfig;
use go_marketplace_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    /// Currency used when displaying prices
    #[arg(long, value_enum, default_value_t = Currency::Usd, global = true)]
    currency: Currency,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    List,
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(long)]
        price: Decimal,
    },
    /// Add one unit to a product already in the cart
    Increment {
        /// Product ID
        id: String,
    },
    /// Remove one unit of a product, dropping it at zero
    Decrement {
        /// Product ID
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Currency {
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Brl,
}

impl From<Currency> for CurrencyCode {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Usd => Self::USD,
            Currency::Eur => Self::EUR,
            Currency::Gbp => Self::GBP,
            Currency::Cad => Self::CAD,
            Currency::Aud => Self::AUD,
            Currency::Brl => Self::BRL,
        }
    }
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gm_cli=info,go_marketplace_cart=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let currency = CurrencyCode::from(cli.currency);

    match cli.command {
        Commands::List => commands::cart::list(&config, currency).await?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            let product = commands::cart::new_product(id, title, image_url, Price::new(price));
            commands::cart::add(&config, product, currency).await?;
        }
        Commands::Increment { id } => {
            commands::cart::increment(&config, &ProductId::new(id), currency).await?;
        }
        Commands::Decrement { id } => {
            commands::cart::decrement(&config, &ProductId::new(id), currency).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "gm-cli", "add", "--id", "1", "--title", "Tee", "--image-url", "u", "--price", "19.99",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        match cli.command {
            Commands::Add { id, price, .. } => {
                assert_eq!(id, "1");
                assert_eq!(price, Decimal::new(1999, 2));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_currency_flag() {
        let cli = Cli::try_parse_from(["gm-cli", "list", "--currency", "brl"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(CurrencyCode::from(cli.currency), CurrencyCode::BRL);
    }
}
