use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Image displayed for products that have no images of their own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.jpg";

/// Stock level at or below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Availability label stored on every product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    /// Derives the label from a stock count.
    #[must_use]
    pub fn from_stock(stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StockStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "in stock" => Ok(StockStatus::InStock),
            "low stock" => Ok(StockStatus::LowStock),
            "out of stock" => Ok(StockStatus::OutOfStock),
            _ => Err(CoreError::UnknownStatus(s.to_owned())),
        }
    }
}

/// A storefront product as served by `GET /api/products`.
///
/// Deserialization goes through [`ProductRecord`] so that loosely shaped
/// backend documents (Mongo `_id`, over-serialized badges, missing prices)
/// come out normalized. `images` stays exactly as stored; use
/// [`Product::display_images`] for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductRecord", rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Pre-sale price. Defaults to `price × 1.05` when the backend has none.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    pub category: Option<String>,
    pub skin_type: Option<String>,
    pub ingredient: Option<String>,
    pub fragrance: Option<String>,
    pub badges: Vec<String>,
    pub images: Vec<String>,
    pub stock: i64,
    pub status: StockStatus,
    pub description: Option<String>,
    pub how_to_use: Option<String>,
    pub sales: u64,
    /// Average review rating, one decimal place. Zero until reviews are
    /// attached with [`Product::with_reviews`].
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub review_count: usize,
}

impl Product {
    /// Whole-percent discount of `price` against `original_price`.
    #[must_use]
    pub fn discount_percentage(&self) -> i64 {
        discount_percentage(self.original_price, self.price)
    }

    /// Images to render, falling back to [`PLACEHOLDER_IMAGE`] when the
    /// product has none.
    #[must_use]
    pub fn display_images(&self) -> Vec<&str> {
        if self.images.is_empty() {
            vec![PLACEHOLDER_IMAGE]
        } else {
            self.images.iter().map(String::as_str).collect()
        }
    }

    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.status != StockStatus::OutOfStock
    }

    /// Annotates the product with the rating derived from `reviews`.
    #[must_use]
    pub fn with_reviews(mut self, reviews: &[crate::Review]) -> Self {
        self.rating = crate::average_rating(reviews);
        self.review_count = reviews.len();
        self
    }
}

/// Raw wire shape of a product document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    original_price: Option<Decimal>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    skin_type: Option<String>,
    #[serde(default)]
    ingredient: Option<String>,
    #[serde(default)]
    fragrance: Option<String>,
    #[serde(default)]
    badges: Value,
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    stock: Option<i64>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    how_to_use: Option<String>,
    #[serde(default)]
    sales: Option<u64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    rating: Option<Decimal>,
    #[serde(default)]
    review_count: Option<usize>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let id = record
            .id
            .filter(|s| !s.trim().is_empty())
            .or(record.mongo_id.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| {
                let generated = uuid::Uuid::new_v4().to_string();
                tracing::warn!(name = %record.name, id = %generated, "product has no id; generated one");
                generated
            });

        let original_price = record.original_price.unwrap_or_else(|| {
            (record.price * Decimal::new(105, 2))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        });

        let stock = record.stock.unwrap_or(0);
        let status = record
            .status
            .and_then(|s| s.parse::<StockStatus>().ok())
            .unwrap_or_else(|| StockStatus::from_stock(stock));

        Product {
            id,
            name: record.name,
            price: record.price,
            original_price,
            category: record.category.filter(|s| !s.is_empty()),
            skin_type: record.skin_type.filter(|s| !s.is_empty()),
            ingredient: record.ingredient.filter(|s| !s.is_empty()),
            fragrance: record.fragrance.filter(|s| !s.is_empty()),
            badges: parse_badges(&record.badges),
            images: record.images.unwrap_or_default(),
            stock,
            status,
            description: record.description,
            how_to_use: record.how_to_use,
            sales: record.sales.unwrap_or(0),
            rating: record.rating.unwrap_or(Decimal::ZERO),
            review_count: record.review_count.unwrap_or(0),
        }
    }
}

/// Whole-percent discount: `round((original − sale) / original × 100)`.
///
/// Returns 0 when `original` is zero or negative, and when the sale price is
/// above the original.
#[must_use]
pub fn discount_percentage(original: Decimal, sale: Decimal) -> i64 {
    if original <= Decimal::ZERO || sale >= original {
        return 0;
    }
    let pct = ((original - sale) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    i64::try_from(pct).unwrap_or(0)
}

/// Flattens a badge list that may have been JSON-encoded one or more times.
///
/// The admin form stores badges as `JSON.stringify(array)`, and some records
/// went through that twice, so a field may hold `["Vegan"]`, `"[\"Vegan\"]"`
/// or `["[\"Vegan\",\"Handmade\"]"]`. Every shape yields plain trimmed strings.
#[must_use]
pub fn parse_badges(raw: &Value) -> Vec<String> {
    let mut out = Vec::new();
    unwrap_badges(raw, &mut out);
    out.into_iter()
        .map(|b| b.trim().to_owned())
        .filter(|b| !b.is_empty())
        .collect()
}

fn unwrap_badges(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) if !s.contains('[') && !s.contains('{') && !s.starts_with('"') => {
            out.push(s.clone());
        }
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => unwrap_badges(&parsed, out),
            Err(_) => out.push(s.clone()),
        },
        Value::Array(items) => {
            for item in items {
                unwrap_badges(item, out);
            }
        }
        other => out.push(other.to_string()),
    }
}
