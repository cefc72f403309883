//! Domain types and pure derivations shared by every Homeo crate.
//!
//! Nothing in here performs I/O except [`config`], which reads the process
//! environment.

mod app_config;
pub mod admin;
pub mod catalog;
pub mod config;
pub mod export;
pub mod orders;
pub mod products;
pub mod reviews;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{FilterOptions, ProductFilter, SortKey};
pub use config::{load_app_config, load_app_config_from_env};
pub use orders::{Customer, Order, OrderItem, OrderStatus, UserDetails};
pub use products::{discount_percentage, parse_badges, Product, StockStatus};
pub use reviews::{average_rating, rating_distribution, NewReview, RatingBucket, Review, ReviewSummary};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid review: {0}")]
    InvalidReview(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
