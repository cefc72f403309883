use homeo_core::admin::{OrderSortKey, ProductSortKey};
use homeo_core::{OrderStatus, StockStatus};

use super::*;
use crate::admin::ProductCommands;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["homeo"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn products_defaults_to_newest_without_filters() {
    let cli = Cli::try_parse_from(["homeo", "products"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            ref skin_types,
            min_price: None,
            max_price: None,
            sort: SortKey::Newest,
            ..
        }) if skin_types.is_empty()
    ));
}

#[test]
fn products_collects_repeated_filters() {
    let cli = Cli::try_parse_from([
        "homeo",
        "products",
        "--skin-type",
        "Dry",
        "--skin-type",
        "Oily",
        "--fragrance",
        "Rose",
        "--max-price",
        "450",
        "--sort",
        "price-high",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Products {
            skin_types,
            fragrances,
            max_price,
            sort,
            ..
        }) => {
            assert_eq!(skin_types, ["Dry", "Oily"]);
            assert_eq!(fragrances, ["Rose"]);
            assert_eq!(max_price, Some(Decimal::from(450)));
            assert_eq!(sort, SortKey::PriceHigh);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn products_rejects_unknown_sort() {
    assert!(Cli::try_parse_from(["homeo", "products", "--sort", "cheapest"]).is_err());
}

#[test]
fn parses_product_detail() {
    let cli = Cli::try_parse_from(["homeo", "product", "p-1"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Product { ref id }) if id == "p-1"));
}

#[test]
fn parses_review() {
    let cli = Cli::try_parse_from([
        "homeo",
        "review",
        "p-1",
        "--rating",
        "4",
        "--comment",
        "Smells great",
        "--first-name",
        "Asha",
        "--last-name",
        "Rao",
        "--email",
        "asha@example.com",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Review { rating: 4, ref product_id, .. }) if product_id == "p-1"
    ));
}

#[test]
fn cart_add_defaults_to_one() {
    let cli =
        Cli::try_parse_from(["homeo", "cart", "add", "p-1"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Add { quantity: 1, .. }
        })
    ));
}

#[test]
fn cart_set_accepts_zero() {
    let cli = Cli::try_parse_from(["homeo", "cart", "set", "p-1", "0"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Cart {
            command: CartCommands::Set { quantity: 0, .. }
        })
    ));
}

#[test]
fn cart_set_rejects_negative_quantity() {
    assert!(Cli::try_parse_from(["homeo", "cart", "set", "p-1", "-1"]).is_err());
}

#[test]
fn checkout_requires_all_fields() {
    assert!(Cli::try_parse_from(["homeo", "checkout", "--first-name", "Asha"]).is_err());

    let cli = Cli::try_parse_from([
        "homeo",
        "checkout",
        "--first-name",
        "Asha",
        "--last-name",
        "Rao",
        "--phone",
        "919876543210",
        "--address",
        "12 MG Road",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout { ref phone, .. }) if phone == "919876543210"
    ));
}

#[test]
fn admin_orders_parses_query_flags() {
    let cli = Cli::try_parse_from([
        "homeo", "admin", "orders", "--search", "asha", "--status", "completed", "--sort",
        "amount", "--desc", "--page", "2",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Orders {
                status: Some(OrderStatus::Completed),
                sort: Some(OrderSortKey::Amount),
                desc: true,
                page: 2,
                csv: None,
                ..
            }
        })
    ));
}

#[test]
fn admin_products_list_parses_status_slug() {
    let cli = Cli::try_parse_from([
        "homeo", "admin", "products", "list", "--status", "low-stock", "--sort", "sales",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Products {
                command: ProductCommands::List {
                    status: Some(StockStatus::LowStock),
                    sort: Some(ProductSortKey::Sales),
                    page: 1,
                    ..
                }
            }
        })
    ));
}

#[test]
fn admin_products_create_collects_badges_and_images() {
    let cli = Cli::try_parse_from([
        "homeo",
        "admin",
        "products",
        "create",
        "--name",
        "Oat Bar",
        "--price",
        "175.50",
        "--stock",
        "12",
        "--skin-type",
        "Dry",
        "--ingredient",
        "Oat",
        "--fragrance",
        "Lavender",
        "--badge",
        "New",
        "--badge",
        "Vegan",
        "--image",
        "oat.jpg",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Admin {
        command:
            AdminCommands::Products {
                command: ProductCommands::Create(args),
            },
    }) = cli.command
    else {
        panic!("expected admin products create");
    };
    let form = crate::admin::product_form(args, Vec::new());
    assert_eq!(form.price, Decimal::new(17550, 2));
    assert_eq!(form.badges, ["New", "Vegan"]);
    assert_eq!(form.image_files.len(), 1);
    assert_eq!(form.status(), StockStatus::InStock);
}

#[test]
fn admin_products_delete_requires_id() {
    assert!(Cli::try_parse_from(["homeo", "admin", "products", "delete"]).is_err());
}
