use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A customer review as returned by `GET /api/reviews/:productId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Star rating, 1–5.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, alias = "createdAt")]
    pub date: Option<DateTime<Utc>>,
}

impl Review {
    #[must_use]
    pub fn author(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// Checks the fields the review form requires before submitting.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidReview`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.product_id.trim().is_empty() {
            return Err(CoreError::InvalidReview("product id is required".into()));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(CoreError::InvalidReview(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        if self.comment.trim().is_empty() {
            return Err(CoreError::InvalidReview("comment is required".into()));
        }
        for (field, value) in [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidReview(format!("{field} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(CoreError::InvalidReview(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        Ok(())
    }
}

/// Share of reviews carrying a given star value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBucket {
    pub stars: u8,
    pub count: usize,
    /// `count / total × 100`, one decimal place.
    pub percentage: Decimal,
}

/// Everything the product page shows about its reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub average: Decimal,
    pub count: usize,
    /// Buckets ordered 5★ down to 1★.
    pub distribution: [RatingBucket; 5],
}

impl ReviewSummary {
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        Self {
            average: average_rating(reviews),
            count: reviews.len(),
            distribution: rating_distribution(reviews),
        }
    }
}

/// Arithmetic mean of the ratings, rounded to one decimal. Zero when empty.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> Decimal {
    if reviews.is_empty() {
        return Decimal::ZERO;
    }
    let total: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    (Decimal::from(total) / Decimal::from(reviews.len()))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Five-bucket breakdown of ratings, highest stars first.
///
/// Ratings outside 1–5 are counted in the total but land in no bucket.
#[must_use]
pub fn rating_distribution(reviews: &[Review]) -> [RatingBucket; 5] {
    let total = reviews.len();
    [5u8, 4, 3, 2, 1].map(|stars| {
        let count = reviews.iter().filter(|r| r.rating == stars).count();
        let percentage = if total == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(count) / Decimal::from(total) * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };
        RatingBucket {
            stars,
            count,
            percentage,
        }
    })
}
