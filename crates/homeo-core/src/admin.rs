//! Back-office listing queries: search, sort, status filter, pagination.

use std::cmp::Ordering;

use crate::catalog::compare_names;
use crate::orders::{Order, OrderStatus};
use crate::products::{Product, StockStatus};
use crate::CoreError;

/// Rows per admin table page.
pub const ITEMS_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Active column sort. Clicking the same column again flips the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortConfig<K> {
    #[must_use]
    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Next sort after a header click on `key`.
    #[must_use]
    pub fn toggled(current: Option<Self>, key: K) -> Self {
        match current {
            Some(c) if c.key == key && c.direction == SortDirection::Asc => Self {
                key,
                direction: SortDirection::Desc,
            },
            _ => Self::asc(key),
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl<T> Page<'_, T> {
    /// 1-based index range of the rows shown, for "Showing x to y of n".
    #[must_use]
    pub fn showing(&self) -> (usize, usize) {
        if self.items.is_empty() {
            return (0, 0);
        }
        let first = page_offset(self.page) + 1;
        (first, first + self.items.len() - 1)
    }
}

fn page_offset(page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE)
}

fn paginate<T>(matches: Vec<&T>, page: usize) -> Page<'_, T> {
    let page = page.max(1);
    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(ITEMS_PER_PAGE);
    let items = matches
        .into_iter()
        .skip(page_offset(page))
        .take(ITEMS_PER_PAGE)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_matches,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortKey {
    OrderId,
    Customer,
    CreatedAt,
    Amount,
    Status,
}

impl std::str::FromStr for OrderSortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orderId" | "order-id" => Ok(OrderSortKey::OrderId),
            "customer" | "userDetails" => Ok(OrderSortKey::Customer),
            "createdAt" | "date" => Ok(OrderSortKey::CreatedAt),
            "amount" | "total" => Ok(OrderSortKey::Amount),
            "status" => Ok(OrderSortKey::Status),
            other => Err(CoreError::UnknownSortKey(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Case-insensitive match against order id or customer full name.
    pub search: String,
    pub sort: Option<SortConfig<OrderSortKey>>,
    pub status: Option<OrderStatus>,
    /// 1-based; zero is treated as the first page.
    pub page: usize,
}

#[must_use]
pub fn query_orders<'a>(orders: &'a [Order], query: &OrderQuery) -> Page<'a, Order> {
    paginate(matching_orders(orders, query), query.page)
}

/// Every order matching `query`'s search and status, sorted, ignoring the
/// page. CSV export uses this.
#[must_use]
pub fn matching_orders<'a>(orders: &'a [Order], query: &OrderQuery) -> Vec<&'a Order> {
    let needle = query.search.to_lowercase();
    let mut matches: Vec<&Order> = orders
        .iter()
        .filter(|o| {
            o.order_id.to_lowercase().contains(&needle)
                || o.user_details.full_name().to_lowercase().contains(&needle)
        })
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .collect();

    if let Some(sort) = query.sort {
        matches.sort_by(|a, b| {
            let ordering = match sort.key {
                OrderSortKey::OrderId => a.order_id.cmp(&b.order_id),
                OrderSortKey::Customer => compare_names(
                    &a.user_details.full_name(),
                    &b.user_details.full_name(),
                ),
                OrderSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                OrderSortKey::Amount => a.amount.cmp(&b.amount),
                OrderSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            };
            sort.apply(ordering)
        });
    }

    matches
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
    Name,
    Price,
    Stock,
    Status,
    Sales,
}

impl std::str::FromStr for ProductSortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ProductSortKey::Name),
            "price" => Ok(ProductSortKey::Price),
            "stock" => Ok(ProductSortKey::Stock),
            "status" => Ok(ProductSortKey::Status),
            "sales" => Ok(ProductSortKey::Sales),
            other => Err(CoreError::UnknownSortKey(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive match against the product name.
    pub search: String,
    pub sort: Option<SortConfig<ProductSortKey>>,
    pub status: Option<StockStatus>,
    pub page: usize,
}

#[must_use]
pub fn query_products<'a>(products: &'a [Product], query: &ProductQuery) -> Page<'a, Product> {
    let needle = query.search.to_lowercase();
    let mut matches: Vec<&Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .filter(|p| query.status.is_none_or(|s| p.status == s))
        .collect();

    if let Some(sort) = query.sort {
        matches.sort_by(|a, b| {
            let ordering = match sort.key {
                ProductSortKey::Name => compare_names(&a.name, &b.name),
                ProductSortKey::Price => a.price.cmp(&b.price),
                ProductSortKey::Stock => a.stock.cmp(&b.stock),
                ProductSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
                ProductSortKey::Sales => a.sales.cmp(&b.sales),
            };
            sort.apply(ordering)
        });
    }

    paginate(matches, query.page)
}
