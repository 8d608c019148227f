//! Verse Wear CLI - Migrations, catalog and a local cart.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront session table
//! vw-cli migrate
//!
//! # List the catalog
//! vw-cli catalog
//!
//! # Work with a cart kept in a local JSON file
//! vw-cli cart add 1 --size M
//! vw-cli cart update 1-M -- -1
//! vw-cli cart show
//! vw-cli --store /tmp/cart.json cart checkout
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run session store migrations
//! - `catalog` - Print the product catalog
//! - `cart` - Show and change the local cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use verse_wear_core::{Catalog, ProductId, QuantityChange, Size};

mod commands;
mod store;

use store::{DEFAULT_STORE_PATH, FileStore};

#[derive(Parser)]
#[command(name = "vw-cli")]
#[command(author, version, about = "Verse Wear CLI tools")]
struct Cli {
    /// Key/value file holding the local cart
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run session store migrations
    Migrate,
    /// Print the product catalog
    Catalog,
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart and its total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: ProductId,

        /// Size (S, M, L or XL)
        #[arg(short, long)]
        size: Option<Size>,
    },
    /// Change a line's quantity by a signed amount
    Update {
        /// Cart line id, e.g. `1-M`
        cart_id: String,

        /// Amount to add; negative to reduce
        #[arg(allow_hyphen_values = true)]
        change: i32,
    },
    /// Remove a line
    Remove {
        /// Cart line id, e.g. `1-M`
        cart_id: String,
    },
    /// Empty the cart
    Clear,
    /// Start (stubbed) checkout
    Checkout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(cli.store);
    let catalog = Catalog::default();

    let output = match cli.command {
        Commands::Migrate => {
            commands::migrate::storefront().await?;
            return Ok(());
        }
        Commands::Catalog => commands::catalog::render(&catalog),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::render(&commands::cart::load(&store)?),
            CartAction::Add { product_id, size } => {
                let cart = commands::cart::add(&store, &catalog, product_id, size)?;
                commands::cart::render(&cart)
            }
            CartAction::Update { cart_id, change } => {
                let (cart, outcome) = commands::cart::update(&store, &cart_id, change)?;
                if outcome == QuantityChange::Missing {
                    tracing::warn!(%cart_id, "No cart line with that id");
                }
                commands::cart::render(&cart)
            }
            CartAction::Remove { cart_id } => {
                let (cart, removed) = commands::cart::remove(&store, &cart_id)?;
                if !removed {
                    tracing::warn!(%cart_id, "No cart line with that id");
                }
                commands::cart::render(&cart)
            }
            CartAction::Clear => {
                commands::cart::clear(&store)?;
                "Cart cleared.".to_string()
            }
            CartAction::Checkout => commands::cart::begin_checkout(&store)?.message(),
        },
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}
