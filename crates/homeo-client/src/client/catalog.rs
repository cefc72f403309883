//! Product and review endpoints.

use futures::stream::{self, StreamExt};
use homeo_core::{NewReview, Product, Review, ReviewSummary};

use super::ApiClient;
use crate::error::ApiError;

/// Related products shown under a product page.
pub const RELATED_LIMIT: usize = 4;

/// Everything the product page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    /// The product, annotated with its own rating.
    pub product: Product,
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
    /// Up to [`RELATED_LIMIT`] products from the same category, each with its
    /// own rating. Never contains `product` itself.
    pub related: Vec<Product>,
}

impl ApiClient {
    /// `GET /api/products`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not a product array.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(&["api", "products"])?;
        tracing::debug!(url = %url, "listing products");
        self.send_json(self.client.get(url), "products", "failed to load products")
            .await
    }

    /// `GET /api/products?category=<category>&limit=<limit>`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list_products`].
    pub async fn list_products_by_category(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint(&["api", "products"])?;
        url.query_pairs_mut()
            .append_pair("category", category)
            .append_pair("limit", &limit.to_string());
        self.send_json(
            self.client.get(url),
            &format!("products(category={category})"),
            "failed to load related products",
        )
        .await
    }

    /// `GET /api/products/<id>`.
    ///
    /// The returned product always carries `id`, whatever id field the
    /// backend filled in.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list_products`].
    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        let url = self.endpoint(&["api", "products", id])?;
        let mut product: Product = self
            .send_json(
                self.client.get(url),
                &format!("product(id={id})"),
                &format!("failed to load product {id}"),
            )
            .await?;
        id.clone_into(&mut product.id);
        Ok(product)
    }

    /// `GET /api/reviews/<product_id>`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list_products`].
    pub async fn list_reviews(&self, product_id: &str) -> Result<Vec<Review>, ApiError> {
        let url = self.endpoint(&["api", "reviews", product_id])?;
        self.send_json(
            self.client.get(url),
            &format!("reviews(product={product_id})"),
            "failed to load reviews",
        )
        .await
    }

    /// Validates `review` and submits it with `POST /api/reviews`, returning
    /// the stored review.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRequest`] if a required field is missing or the
    ///   rating is outside 1–5. Nothing is sent in that case.
    /// - [`ApiError::Http`], [`ApiError::Status`] or [`ApiError::Deserialize`]
    ///   as for the other calls.
    pub async fn submit_review(&self, review: &NewReview) -> Result<Review, ApiError> {
        review.validate()?;
        let url = self.endpoint(&["api", "reviews"])?;
        let saved: Review = self
            .send_json(
                self.client.post(url).json(review),
                "submit review",
                "failed to submit review",
            )
            .await?;
        tracing::info!(product_id = %review.product_id, rating = review.rating, "review submitted");
        Ok(saved)
    }

    /// Loads a product page: the product, its reviews and rating summary,
    /// and related products from the same category.
    ///
    /// A related product whose reviews fail to load is shown unrated rather
    /// than failing the page.
    ///
    /// # Errors
    ///
    /// Returns the first error from loading the product, its reviews, or the
    /// related-product list.
    pub async fn fetch_product_detail(&self, id: &str) -> Result<ProductDetail, ApiError> {
        let (product, reviews) = tokio::try_join!(self.get_product(id), self.list_reviews(id))?;
        let summary = ReviewSummary::from_reviews(&reviews);
        let product = product.with_reviews(&reviews);

        let related = match product.category.as_deref() {
            Some(category) if !category.is_empty() => {
                let candidates: Vec<Product> = self
                    .list_products_by_category(category, RELATED_LIMIT)
                    .await?
                    .into_iter()
                    .filter(|p| p.id != product.id)
                    .take(RELATED_LIMIT)
                    .collect();
                self.annotate_ratings(candidates).await
            }
            _ => Vec::new(),
        };

        Ok(ProductDetail {
            product,
            reviews,
            summary,
            related,
        })
    }

    async fn annotate_ratings(&self, products: Vec<Product>) -> Vec<Product> {
        stream::iter(products)
            .map(|p| async move {
                match self.list_reviews(&p.id).await {
                    Ok(reviews) => p.with_reviews(&reviews),
                    Err(e) => {
                        tracing::warn!(product_id = %p.id, error = %e, "related product reviews unavailable");
                        p.with_reviews(&[])
                    }
                }
            })
            .buffered(RELATED_LIMIT)
            .collect()
            .await
    }
}
