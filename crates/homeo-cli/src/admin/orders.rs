use std::path::Path;

use anyhow::Context;
use homeo_client::ApiClient;
use homeo_core::admin::{matching_orders, query_orders, OrderQuery};
use homeo_core::export::{format_money, orders_csv};
use homeo_core::orders::summarize_customers;
use homeo_core::Order;

use super::print_page_footer;
use crate::catalog::truncate;

pub(super) async fn run_orders(
    client: &ApiClient,
    query: &OrderQuery,
    csv: Option<&Path>,
) -> anyhow::Result<()> {
    let orders = client.list_orders().await?;

    if let Some(path) = csv {
        let matching: Vec<Order> = matching_orders(&orders, query)
            .into_iter()
            .cloned()
            .collect();
        std::fs::write(path, orders_csv(&matching))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("exported {} order(s) to {}", matching.len(), path.display());
        return Ok(());
    }

    let page = query_orders(&orders, query);
    if page.items.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    println!(
        "{:<24}{:<22}{:<16}{:>12}  STATUS",
        "ORDER", "CUSTOMER", "DATE", "TOTAL"
    );
    for o in &page.items {
        println!(
            "{:<24}{:<22}{:<16}{:>12}  {}",
            truncate(&o.order_id, 22),
            truncate(&o.user_details.full_name(), 20),
            o.created_at.format("%d %b %Y"),
            format_money(o.amount, o.currency.as_deref()),
            o.status
        );
    }
    print_page_footer(page.page, page.total_pages, page.showing(), page.total_matches);
    Ok(())
}

pub(super) async fn run_customers(client: &ApiClient) -> anyhow::Result<()> {
    let orders = client.list_orders().await?;
    let customers = summarize_customers(&orders);
    if customers.is_empty() {
        println!("no customers yet");
        return Ok(());
    }

    println!(
        "{:<24}{:<18}{:>8}{:>14}  FIRST ORDER",
        "NAME", "PHONE", "ORDERS", "SPENT"
    );
    for c in &customers {
        println!(
            "{:<24}{:<18}{:>8}{:>14}  {}",
            truncate(&c.name, 22),
            c.phone,
            c.orders,
            format_money(c.spent, None),
            c.first_order_at.format("%d %b %Y")
        );
    }
    Ok(())
}
