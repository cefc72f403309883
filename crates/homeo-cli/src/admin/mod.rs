//! Back-office command handlers: orders, customers and product management.

mod orders;
mod products;

pub(crate) use products::product_form;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use homeo_client::ApiClient;
use homeo_core::admin::{OrderSortKey, ProductSortKey, SortConfig, SortDirection};
use homeo_core::{OrderStatus, StockStatus};
use rust_decimal::Decimal;

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// List orders, five per page
    Orders {
        /// Match against order id or customer name
        #[arg(long, default_value = "")]
        search: String,
        /// pending or completed
        #[arg(long)]
        status: Option<OrderStatus>,
        /// orderId, customer, createdAt, amount or status
        #[arg(long)]
        sort: Option<OrderSortKey>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value = "1")]
        page: usize,
        /// Write every matching order to this CSV file instead of listing
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Customers derived from the order history
    Customers,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
}

/// Sub-commands available under `admin products`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products, five per page
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// in-stock, low-stock or out-of-stock
        #[arg(long)]
        status: Option<StockStatus>,
        /// name, price, stock, status or sales
        #[arg(long)]
        sort: Option<ProductSortKey>,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Export the full catalog as CSV
    Export { path: PathBuf },
    /// Create a product
    Create(ProductArgs),
    /// Replace a product's fields
    Update {
        id: String,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete a product
    Delete { id: String },
}

/// Fields of the product form.
#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long)]
    pub stock: i64,
    #[arg(long)]
    pub skin_type: String,
    #[arg(long)]
    pub ingredient: String,
    #[arg(long)]
    pub fragrance: String,
    /// Repeatable
    #[arg(long = "badge")]
    pub badges: Vec<String>,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub how_to_use: String,
    /// Image file to upload (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

pub(crate) async fn run_admin(client: &ApiClient, command: AdminCommands) -> anyhow::Result<()> {
    match command {
        AdminCommands::Orders {
            search,
            status,
            sort,
            desc,
            page,
            csv,
        } => {
            let query = homeo_core::admin::OrderQuery {
                search,
                sort: sort.map(|key| sort_config(key, desc)),
                status,
                page,
            };
            orders::run_orders(client, &query, csv.as_deref()).await
        }
        AdminCommands::Customers => orders::run_customers(client).await,
        AdminCommands::Products { command } => match command {
            ProductCommands::List {
                search,
                status,
                sort,
                desc,
                page,
            } => {
                let query = homeo_core::admin::ProductQuery {
                    search,
                    sort: sort.map(|key| sort_config(key, desc)),
                    status,
                    page,
                };
                products::run_list(client, &query).await
            }
            ProductCommands::Export { path } => products::run_export(client, &path).await,
            ProductCommands::Create(product) => products::run_create(client, product).await,
            ProductCommands::Update { id, product } => {
                products::run_update(client, &id, product).await
            }
            ProductCommands::Delete { id } => products::run_delete(client, &id).await,
        },
    }
}

fn sort_config<K>(key: K, desc: bool) -> SortConfig<K> {
    SortConfig {
        key,
        direction: if desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    }
}

fn print_page_footer(page: usize, total_pages: usize, showing: (usize, usize), total: usize) {
    println!(
        "\nshowing {} to {} of {total} (page {page} of {})",
        showing.0,
        showing.1,
        total_pages.max(1)
    );
}
