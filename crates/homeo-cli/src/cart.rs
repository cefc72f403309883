//! Cart command handlers.

use clap::Subcommand;
use homeo_cart::{CartItem, CartStorage, CartStore, QuantityUpdate};
use homeo_client::ApiClient;
use homeo_core::export::format_money;

use crate::catalog::truncate;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// List cart lines and the total
    Show,
    /// Add a product by id
    Add {
        product_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a line
    Remove { id: String },
    /// Set a line's quantity; 0 removes it
    Set { id: String, quantity: u32 },
    /// Empty the cart
    Clear,
}

pub(crate) async fn run_cart<S: CartStorage>(
    client: &ApiClient,
    cart: &mut CartStore<S>,
    command: CartCommands,
) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {}
        CartCommands::Add {
            product_id,
            quantity,
        } => {
            let product = client.get_product(&product_id).await?;
            if !product.is_purchasable() {
                anyhow::bail!("{} is out of stock", product.name);
            }
            cart.add_to_cart(CartItem::from_product(&product, quantity));
            println!("added {quantity} × {} to cart", product.name);
        }
        CartCommands::Remove { id } => {
            if cart.get(&id).is_none() {
                println!("{id} is not in the cart");
            }
            cart.remove_from_cart(&id);
        }
        CartCommands::Set { id, quantity } => match cart.update_quantity(&id, quantity) {
            QuantityUpdate::Updated => {}
            QuantityUpdate::Removed => println!("item removed from cart"),
            QuantityUpdate::Missing => println!("{id} is not in the cart"),
        },
        CartCommands::Clear => {
            cart.clear_cart();
            println!("cart cleared");
        }
    }

    print_cart(cart);
    Ok(())
}

pub(crate) fn print_cart<S: CartStorage>(cart: &CartStore<S>) {
    if cart.is_empty() {
        println!("your cart is empty");
        return;
    }
    println!("{:<26}{:<28}{:>5}{:>12}", "ID", "NAME", "QTY", "SUBTOTAL");
    for item in cart.items() {
        println!(
            "{:<26}{:<28}{:>5}{:>12}",
            truncate(&item.id, 24),
            truncate(&item.name, 26),
            item.quantity,
            format_money(item.line_total(), None)
        );
    }
    println!(
        "{} item(s), total {}",
        cart.cart_item_count(),
        format_money(cart.cart_total(), None)
    );
}
