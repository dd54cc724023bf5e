//! TechStore CLI - Browse the catalog and manage a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Laptops over $1000, cheapest first
//! techstore products --category laptops --price 1000+ --sort price-low
//!
//! # Add two AirPods Pro and check out
//! techstore cart add 3 --quantity 2
//! techstore cart checkout
//!
//! # Sign in (cosmetic, nothing is verified)
//! techstore session login -e sam@example.com -p secret
//! ```
//!
//! # Commands
//!
//! - `products` - Filter, sort and page the catalog
//! - `product` - Show one product
//! - `cart` - Show and change the cart, check out
//! - `session` - Sign in, register, sign out
//!
//! Cart and session live in a JSON file (`--data`, `TECHSTORE_DATA_PATH`,
//! or `techstore-data.json`) so they carry over between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use techstore_core::{Category, PriceRange, ProductId, SortKey};
use techstore_storefront::config::{SimulatedDelays, StorefrontConfig};
use techstore_storefront::persistence::{FileStore, Persistence};
use techstore_storefront::state::AppState;

mod commands;

/// Data file used when neither `--data` nor `TECHSTORE_DATA_PATH` is given.
const DEFAULT_DATA_FILE: &str = "techstore-data.json";

#[derive(Parser)]
#[command(name = "techstore")]
#[command(author, version, about = "TechStore command-line storefront")]
struct Cli {
    /// JSON file holding the cart and session
    #[arg(long, global = true, env = "TECHSTORE_DATA_PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a filter
    Products {
        /// Case-insensitive text to find in names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Category (`smartphones`, `laptops`, `headphones`, `accessories`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Price bucket (`0-100`, `100-500`, `500-1000`, `1000+`)
        #[arg(short, long)]
        price: Option<PriceRange>,

        /// Sort order (`name`, `price-low`, `price-high`, `rating`)
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product
    Product {
        /// Product id
        id: ProductId,
    },
    /// Show and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in and out
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents
    Show,
    /// Add a product
    Add {
        /// Product id
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (zero or less removes it)
    Set {
        /// Product id
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Place the order
    Checkout,
    /// Show aggregate cart figures
    Stats,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the current session
    Show,
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Register and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// At least six characters
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads TECHSTORE_DATA_PATH
    dotenvy::dotenv().ok();

    // Output goes through tracing; keep the lines bare
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// File-backed state with no simulated latency.
fn open_state(data: Option<PathBuf>) -> AppState {
    let path = data.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    let config = StorefrontConfig {
        data_path: Some(path.clone()),
        delays: SimulatedDelays::none(),
        ..StorefrontConfig::default()
    };
    AppState::new(config, Persistence::new(Arc::new(FileStore::new(path))))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let state = open_state(cli.data);
    let mut notifications = commands::NotificationLog::subscribe(&state);

    let result = match cli.command {
        Commands::Products {
            search,
            category,
            price,
            sort,
            page,
        } => {
            let filter = techstore_core::FilterState {
                search_term: search.unwrap_or_default(),
                category,
                price_range: price,
                sort_key: sort,
            };
            commands::products::list(&state, filter, page).await
        }
        Commands::Product { id } => commands::products::show(&state, id),
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&state).await;
                Ok(())
            }
            CartAction::Add { id, quantity } => commands::cart::add(&state, id, quantity).await,
            CartAction::Set { id, quantity } => {
                commands::cart::set(&state, id, quantity).await;
                Ok(())
            }
            CartAction::Remove { id } => {
                commands::cart::remove(&state, id).await;
                Ok(())
            }
            CartAction::Clear => {
                commands::cart::clear(&state).await;
                Ok(())
            }
            CartAction::Checkout => commands::cart::checkout(&state).await,
            CartAction::Stats => {
                commands::cart::stats(&state).await;
                Ok(())
            }
        },
        Commands::Session { action } => match action {
            SessionAction::Show => {
                commands::session::show(&state).await;
                Ok(())
            }
            SessionAction::Login { email, password } => {
                commands::session::login(&state, email, password).await
            }
            SessionAction::Register {
                name,
                email,
                password,
            } => commands::session::register(&state, name, email, password).await,
            SessionAction::Logout => {
                commands::session::logout(&state).await;
                Ok(())
            }
        },
    };

    notifications.flush();
    result
}
