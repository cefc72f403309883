//! Storefront browsing and review commands.

use homeo_client::ApiClient;
use homeo_core::catalog::filter_and_sort;
use homeo_core::export::format_money;
use homeo_core::{FilterOptions, NewReview, Product, ProductFilter, SortKey};

pub(crate) async fn run_products(
    client: &ApiClient,
    filter: &ProductFilter,
    sort: SortKey,
) -> anyhow::Result<()> {
    let products = client.list_products().await?;
    let options = FilterOptions::from_products(&products);
    let listed = filter_and_sort(&products, filter, sort);

    if listed.is_empty() {
        println!("no products match the selected filters");
    } else {
        println!("{:<26}{:<28}{:>10}{:>8}  STATUS", "ID", "NAME", "PRICE", "OFF");
        for p in &listed {
            let off = match p.discount_percentage() {
                0 => String::new(),
                pct => format!("{pct}%"),
            };
            println!(
                "{:<26}{:<28}{:>10}{:>8}  {}",
                truncate(&p.id, 24),
                truncate(&p.name, 26),
                format_money(p.price, None),
                off,
                p.status
            );
        }
    }

    println!();
    println!(
        "showing {} of {} products, sorted by {sort}, {} filter(s) active",
        listed.len(),
        products.len(),
        filter.active_count()
    );
    print_options("skin types", &options.skin_types);
    print_options("ingredients", &options.ingredients);
    print_options("fragrances", &options.fragrances);
    println!("price range: 0 to {}", format_money(options.max_price, None));
    Ok(())
}

pub(crate) async fn run_product(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let detail = client.fetch_product_detail(id).await?;
    let p = &detail.product;

    println!("{}", p.name);
    println!(
        "{}  (was {}, {}% off)  {}",
        format_money(p.price, None),
        format_money(p.original_price, None),
        p.discount_percentage(),
        p.status
    );
    if let Some(description) = &p.description {
        println!("\n{description}");
    }
    if let Some(how_to_use) = &p.how_to_use {
        println!("\nHow to use: {how_to_use}");
    }
    if !p.badges.is_empty() {
        println!("badges: {}", p.badges.join(", "));
    }
    println!("images: {}", p.display_images().join(", "));

    println!(
        "\nrating {} from {} review(s)",
        detail.summary.average, detail.summary.count
    );
    for bucket in &detail.summary.distribution {
        println!(
            "  {}★ {:>4} ({}%)",
            bucket.stars, bucket.count, bucket.percentage
        );
    }
    for review in &detail.reviews {
        println!("\n  {} ({}★)", review.author(), review.rating);
        println!("  {}", review.comment);
    }

    if !detail.related.is_empty() {
        println!("\nyou may also like:");
        for r in &detail.related {
            println!("  {}", related_line(r));
        }
    }
    Ok(())
}

pub(crate) async fn run_review(client: &ApiClient, review: &NewReview) -> anyhow::Result<()> {
    let saved = client.submit_review(review).await?;
    println!(
        "thanks {}! your {}★ review was posted",
        saved.first_name, saved.rating
    );
    Ok(())
}

fn print_options(label: &str, values: &[String]) {
    if !values.is_empty() {
        println!("{label}: {}", values.join(", "));
    }
}

fn related_line(p: &Product) -> String {
    format!(
        "{} {} ({}★, {} reviews) [{}]",
        p.name,
        format_money(p.price, None),
        p.rating,
        p.review_count,
        p.id
    )
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
