//! Basket CLI - Command-line storefront for the cart engine.
//!
//! Each invocation rehydrates the cart from the file-backed store, applies one
//! operation, and logs the contents and totals.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (a product already in the cart gains one unit)
//! basket add --id 1 --name "Coffee Mug" --price 18.99 --image assets/mug.png
//!
//! # Change quantities
//! basket increment --id 1
//! basket decrement --id 1
//! basket remove --id 1
//!
//! # Inspect, check out, or empty the cart
//! basket show
//! basket checkout
//! basket reset
//! ```
//!
//! # Commands
//!
//! - `add` / `increment` / `decrement` / `remove` - Cart mutations
//! - `show` - Log the cart contents and totals
//! - `checkout` - Submit an order and empty the cart
//! - `reset` - Empty the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use basket_core::ProductId;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Basket shopping cart")]
struct Cli {
    /// Directory of the cart store (overrides `BASKET_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g. 18.99)
        #[arg(short, long, value_parser = commands::cart::parse_price)]
        price: Decimal,

        /// Number of units
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Product image URL
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Add one more unit of a product already in the cart
    Increment {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
    /// Take one unit away, removing the product at zero
    Decrement {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
    /// Show the cart contents and totals
    Show,
    /// Place an order for the cart contents
    Checkout,
    /// Empty the cart
    Reset,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "basket_cart=info,basket_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let mut config = basket_cart::CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    let mut cart = commands::open_cart(&config)?;
    let _badge = commands::watch_badge(&cart);

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            quantity,
            image,
        } => commands::cart::add(&mut cart, id, name, price, quantity, image),
        Commands::Increment { id } => commands::cart::increment(&mut cart, id)?,
        Commands::Decrement { id } => commands::cart::decrement(&mut cart, id),
        Commands::Remove { id } => commands::cart::remove(&mut cart, id),
        Commands::Show => commands::cart::show(&cart),
        Commands::Checkout => commands::checkout::checkout(&mut cart)?,
        Commands::Reset => commands::checkout::reset(&mut cart),
    }
    Ok(())
}
