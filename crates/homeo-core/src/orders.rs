use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Lifecycle of a server-side order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(CoreError::UnknownStatus(s.to_owned())),
        }
    }
}

/// Customer contact captured at checkout and denormalized onto the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
}

impl UserDetails {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Line item snapshot taken when the order was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// A purchase record as listed by `GET /api/payments/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub user_details: UserDetails,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Per-customer rollup derived from the order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub orders: usize,
    /// Sum of completed order amounts.
    pub spent: Decimal,
    pub first_order_at: DateTime<Utc>,
}

/// Groups orders by customer phone number.
///
/// Customers are returned in order of their first purchase. The display name
/// is the one on the customer's most recent order.
#[must_use]
pub fn summarize_customers(orders: &[Order]) -> Vec<Customer> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by_key(|o| o.created_at);

    let mut customers: Vec<Customer> = Vec::new();
    for order in sorted {
        let phone = order.user_details.phone.trim();
        let completed = if order.status == OrderStatus::Completed {
            order.amount
        } else {
            Decimal::ZERO
        };
        if let Some(existing) = customers.iter_mut().find(|c| c.phone == phone) {
            existing.orders += 1;
            existing.spent += completed;
            existing.name = order.user_details.full_name();
        } else {
            customers.push(Customer {
                name: order.user_details.full_name(),
                phone: phone.to_owned(),
                orders: 1,
                spent: completed,
                first_order_at: order.created_at,
            });
        }
    }
    customers
}
