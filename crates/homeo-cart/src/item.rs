use homeo_core::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the cart, keyed by product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CartItem {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            images: Vec::new(),
        }
    }

    /// A cart line for `quantity` units of `product` at its current price.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            images: product.images.clone(),
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// First image, used as the cart thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartItem::new("p-1", "Rose Bar", Decimal::new(1250, 2), 3);
        assert_eq!(item.line_total(), Decimal::new(3750, 2));
    }

    #[test]
    fn from_product_copies_price_and_images() {
        let product: Product = serde_json::from_value(json!({
            "id": "p-7",
            "name": "Turmeric Bar",
            "price": 210,
            "images": ["/t1.jpg", "/t2.jpg"]
        }))
        .unwrap();
        let item = CartItem::from_product(&product, 2);
        assert_eq!(item.id, "p-7");
        assert_eq!(item.price, Decimal::from(210));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.thumbnail(), Some("/t1.jpg"));
    }

    #[test]
    fn serializes_price_as_json_number() {
        let item = CartItem::new("p-1", "Rose Bar", Decimal::new(995, 1), 1);
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["price"], json!(99.5));
        assert_eq!(v["images"], json!([]));
    }
}
