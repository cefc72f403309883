mod admin;
mod cart;
mod catalog;
mod checkout;

use clap::{Parser, Subcommand};
use homeo_cart::{CartStore, JsonFileStorage};
use homeo_client::ApiClient;
use homeo_core::SortKey;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::admin::AdminCommands;
use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "homeo")]
#[command(about = "Homeo Handmade Soaps storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog with optional filters
    Products {
        /// Only show these skin types (repeatable)
        #[arg(long = "skin-type")]
        skin_types: Vec<String>,
        /// Only show these key ingredients (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Only show these fragrances (repeatable)
        #[arg(long = "fragrance")]
        fragrances: Vec<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        /// newest, price-low, price-high, rating, name-asc or name-desc
        #[arg(long, default_value = "newest")]
        sort: SortKey,
    },
    /// Show a product with its reviews and related products
    Product { id: String },
    /// Write a review for a product
    Review {
        product_id: String,
        /// Star rating, 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },
    /// Inspect or change the persisted cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Pay for everything in the cart
    Checkout {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// International phone number; a leading + is added when missing
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
    },
    /// Back-office views and product management
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = homeo_core::load_app_config()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("homeo: run `homeo --help` to list commands");
        return Ok(());
    };

    let client = ApiClient::new(&config)?;
    tracing::debug!(api_url = %client.base_url(), env = %config.env, "client ready");
    let open_cart = || CartStore::open(JsonFileStorage::new(&config.cart_path));

    match command {
        Commands::Products {
            skin_types,
            ingredients,
            fragrances,
            min_price,
            max_price,
            sort,
        } => {
            let filter = homeo_core::ProductFilter {
                skin_types,
                ingredients,
                fragrances,
                min_price,
                max_price,
            };
            catalog::run_products(&client, &filter, sort).await?;
        }
        Commands::Product { id } => catalog::run_product(&client, &id).await?,
        Commands::Review {
            product_id,
            rating,
            comment,
            first_name,
            last_name,
            email,
        } => {
            let review = homeo_core::NewReview {
                product_id,
                first_name,
                last_name,
                email,
                rating,
                comment,
            };
            catalog::run_review(&client, &review).await?;
        }
        Commands::Cart { command } => {
            let mut cart = open_cart();
            cart::run_cart(&client, &mut cart, command).await?;
        }
        Commands::Checkout {
            first_name,
            last_name,
            phone,
            address,
        } => {
            let details =
                homeo_checkout::CustomerDetails::new(first_name, last_name, phone, address);
            let mut cart = open_cart();
            checkout::run_checkout(client, &config, &mut cart, details).await?;
        }
        Commands::Admin { command } => admin::run_admin(&client, command).await?,
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output stays clean.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests;
