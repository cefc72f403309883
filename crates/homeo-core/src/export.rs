//! CSV exports for the back-office tables.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::orders::Order;
use crate::products::Product;

const ORDER_HEADER: &str = "Order ID,Customer,Phone,Address,Date,Total,Status,Items";
const PRODUCT_HEADER: &str =
    "id,name,price,stock,status,skinType,ingredient,fragrance,badges,sales,images,howToUse";

/// Wraps a field in double quotes, doubling any embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Formats an amount for display: `₹` for rupees (or no currency), else the
/// ISO code followed by the amount.
#[must_use]
pub fn format_money(amount: Decimal, currency: Option<&str>) -> String {
    match currency {
        None | Some("INR") => format!("₹{}", amount.normalize()),
        Some(code) => format!("{code} {}", amount.normalize()),
    }
}

/// Renders orders as CSV with every field quoted.
#[must_use]
pub fn orders_csv(orders: &[Order]) -> String {
    let mut out = String::from(ORDER_HEADER);
    for order in orders {
        let currency = order.currency.as_deref();
        let items = order
            .items
            .iter()
            .map(|item| {
                format!(
                    "{} (Qty: {}, Price: {})",
                    item.name,
                    item.quantity,
                    format_money(item.price, currency)
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        let fields = [
            order.order_id.clone(),
            order.user_details.full_name(),
            order.user_details.phone.clone(),
            order.user_details.address.clone(),
            order.created_at.format("%d %b %Y").to_string(),
            format_money(order.amount, currency),
            order.status.to_string(),
            items,
        ];
        out.push('\n');
        out.push_str(
            &fields
                .iter()
                .map(|f| quote(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    out
}

/// Renders the product catalog as CSV. Every text column is quoted; lists
/// are joined with `;`.
#[must_use]
pub fn products_csv(products: &[Product]) -> String {
    let mut out = String::from(PRODUCT_HEADER);
    for p in products {
        let _ = write!(
            out,
            "\n{},{},{},{},{},{},{},{},{},{},{},{}",
            quote(&p.id),
            quote(&p.name),
            p.price.normalize(),
            p.stock,
            quote(p.status.as_str()),
            quote(p.skin_type.as_deref().unwrap_or_default()),
            quote(p.ingredient.as_deref().unwrap_or_default()),
            quote(p.fragrance.as_deref().unwrap_or_default()),
            quote(&p.badges.join(";")),
            p.sales,
            quote(&p.images.join(";")),
            quote(p.how_to_use.as_deref().unwrap_or_default()),
        );
    }
    out
}
