use std::path::Path;

use anyhow::Context;
use homeo_client::{ApiClient, ProductForm};
use homeo_core::admin::{query_products, ProductQuery};
use homeo_core::export::{format_money, products_csv};

use super::{print_page_footer, ProductArgs};
use crate::catalog::truncate;

pub(super) async fn run_list(client: &ApiClient, query: &ProductQuery) -> anyhow::Result<()> {
    let products = client.list_products().await?;
    let page = query_products(&products, query);
    if page.items.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!(
        "{:<26}{:<26}{:>10}{:>7}{:>7}  STATUS",
        "ID", "NAME", "PRICE", "STOCK", "SALES"
    );
    for p in &page.items {
        println!(
            "{:<26}{:<26}{:>10}{:>7}{:>7}  {}",
            truncate(&p.id, 24),
            truncate(&p.name, 24),
            format_money(p.price, None),
            p.stock,
            p.sales,
            p.status
        );
    }
    print_page_footer(page.page, page.total_pages, page.showing(), page.total_matches);
    Ok(())
}

pub(super) async fn run_export(client: &ApiClient, path: &Path) -> anyhow::Result<()> {
    let products = client.list_products().await?;
    std::fs::write(path, products_csv(&products))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("exported {} product(s) to {}", products.len(), path.display());
    Ok(())
}

pub(super) async fn run_create(client: &ApiClient, args: ProductArgs) -> anyhow::Result<()> {
    let form = product_form(args, Vec::new());
    client.create_product(&form).await?;
    println!("created {} ({})", form.name, form.status());
    Ok(())
}

/// Without new image files the product keeps its current images.
pub(super) async fn run_update(
    client: &ApiClient,
    id: &str,
    args: ProductArgs,
) -> anyhow::Result<()> {
    let existing_images = if args.images.is_empty() {
        client.get_product(id).await?.images
    } else {
        Vec::new()
    };
    let form = product_form(args, existing_images);
    client.update_product(id, &form).await?;
    println!("updated {id} ({})", form.status());
    Ok(())
}

pub(super) async fn run_delete(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    client.delete_product(id).await?;
    println!("deleted {id}");
    Ok(())
}

pub(crate) fn product_form(args: ProductArgs, existing_images: Vec<String>) -> ProductForm {
    ProductForm {
        name: args.name,
        price: args.price,
        stock: args.stock,
        skin_type: args.skin_type,
        ingredient: args.ingredient,
        fragrance: args.fragrance,
        badges: args.badges,
        description: args.description,
        how_to_use: args.how_to_use,
        image_files: args.images,
        existing_images,
    }
}
