//! Storefront listing: filtering, sorting and the filter sidebar's options.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::products::Product;
use crate::CoreError;

/// Upper bound of the price slider when no product is pricier.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/// Listing order for the storefront grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Backend order, unchanged.
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Rating,
    NameAsc,
    NameDesc,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Newest => Ordering::Equal,
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Rating => b.rating.cmp(&a.rating),
            SortKey::NameAsc => compare_names(&a.name, &b.name),
            SortKey::NameDesc => compare_names(&b.name, &a.name),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            other => Err(CoreError::UnknownSortKey(other.to_owned())),
        }
    }
}

/// Case-insensitive name comparison with a case-sensitive tiebreak, close to
/// a locale-aware compare for the ASCII product names the shop uses.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sidebar selections. Empty selections match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub skin_types: Vec<String>,
    pub ingredients: Vec<String>,
    pub fragrances: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        selection_matches(&self.skin_types, product.skin_type.as_deref())
            && selection_matches(&self.ingredients, product.ingredient.as_deref())
            && selection_matches(&self.fragrances, product.fragrance.as_deref())
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }

    /// Number of active filters, as shown on the "Filters (n)" button.
    ///
    /// Each selected value counts once; a price range narrower than
    /// `0..=DEFAULT_MAX_PRICE` counts as one more.
    #[must_use]
    pub fn active_count(&self) -> usize {
        let narrowed_price = self.min_price.is_some_and(|min| min > Decimal::ZERO)
            || self.max_price.is_some_and(|max| max < DEFAULT_MAX_PRICE);
        self.skin_types.len()
            + self.ingredients.len()
            + self.fragrances.len()
            + usize::from(narrowed_price)
    }
}

fn selection_matches(selected: &[String], value: Option<&str>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.iter().any(|s| s == v))
}

/// Filters then sorts `products`. Sorting is stable, so `Newest` and ties
/// keep the backend order.
#[must_use]
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    filter: &ProductFilter,
    sort: SortKey,
) -> Vec<&'a Product> {
    let mut listed: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    listed.sort_by(|a, b| sort.compare(a, b));
    listed
}

/// Distinct values offered in the filter sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub skin_types: Vec<String>,
    pub ingredients: Vec<String>,
    pub fragrances: Vec<String>,
    /// Upper bound of the price slider: the priciest product, at least
    /// [`DEFAULT_MAX_PRICE`].
    pub max_price: Decimal,
}

impl FilterOptions {
    /// Collects the distinct values in first-seen order.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut options = FilterOptions {
            max_price: DEFAULT_MAX_PRICE,
            ..FilterOptions::default()
        };
        for p in products {
            push_unique(&mut options.skin_types, p.skin_type.as_deref());
            push_unique(&mut options.ingredients, p.ingredient.as_deref());
            push_unique(&mut options.fragrances, p.fragrance.as_deref());
            options.max_price = options.max_price.max(p.price);
        }
        options
    }
}

fn push_unique(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(v) = value {
        if !values.iter().any(|existing| existing == v) {
            values.push(v.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(id: &str, name: &str, price: i64, skin: &str, fragrance: &str) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "price": price,
            "skinType": skin,
            "ingredient": "Neem",
            "fragrance": fragrance,
            "stock": 20
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("a", "Rose Bar", 250, "Dry", "Floral"),
            product("b", "charcoal Bar", 180, "Oily", "Woody"),
            product("c", "Aloe Bar", 320, "Dry", "Fresh"),
            product("d", "Neem Bar", 180, "Sensitive", "Herbal"),
        ]
    }

    fn ids(listed: &[&Product]) -> Vec<String> {
        listed.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn sort_key_round_trips_through_str() {
        for key in [
            SortKey::Newest,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
            SortKey::NameAsc,
            SortKey::NameDesc,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(CoreError::UnknownSortKey("cheapest".into()))
        );
    }

    #[test]
    fn empty_filter_keeps_backend_order() {
        let products = catalog();
        let listed = filter_and_sort(&products, &ProductFilter::default(), SortKey::Newest);
        assert_eq!(ids(&listed), ["a", "b", "c", "d"]);
    }

    #[test]
    fn price_low_is_stable_on_ties() {
        let products = catalog();
        let listed = filter_and_sort(&products, &ProductFilter::default(), SortKey::PriceLow);
        assert_eq!(ids(&listed), ["b", "d", "a", "c"]);
    }

    #[test]
    fn price_high_sorts_descending() {
        let products = catalog();
        let listed = filter_and_sort(&products, &ProductFilter::default(), SortKey::PriceHigh);
        assert_eq!(ids(&listed), ["c", "a", "b", "d"]);
    }

    #[test]
    fn name_sorts_ignore_case() {
        let products = catalog();
        let asc = filter_and_sort(&products, &ProductFilter::default(), SortKey::NameAsc);
        assert_eq!(ids(&asc), ["c", "b", "d", "a"]);
        let desc = filter_and_sort(&products, &ProductFilter::default(), SortKey::NameDesc);
        assert_eq!(ids(&desc), ["a", "d", "b", "c"]);
    }

    #[test]
    fn rating_sort_puts_best_first() {
        let reviews: Vec<crate::Review> = serde_json::from_value(json!([
            {"productId": "c", "firstName": "A", "lastName": "B", "rating": 5}
        ]))
        .unwrap();
        let mut products = catalog();
        products[2] = products[2].clone().with_reviews(&reviews);
        let listed = filter_and_sort(&products, &ProductFilter::default(), SortKey::Rating);
        assert_eq!(listed[0].id, "c");
    }

    #[test]
    fn selections_combine_across_groups() {
        let products = catalog();
        let filter = ProductFilter {
            skin_types: vec!["Dry".into(), "Oily".into()],
            fragrances: vec!["Floral".into(), "Woody".into()],
            ..ProductFilter::default()
        };
        let listed = filter_and_sort(&products, &filter, SortKey::Newest);
        assert_eq!(ids(&listed), ["a", "b"]);
    }

    #[test]
    fn price_range_is_inclusive() {
        let products = catalog();
        let filter = ProductFilter {
            min_price: Some(Decimal::from(180)),
            max_price: Some(Decimal::from(250)),
            ..ProductFilter::default()
        };
        let listed = filter_and_sort(&products, &filter, SortKey::Newest);
        assert_eq!(ids(&listed), ["a", "b", "d"]);
    }

    #[test]
    fn active_count_counts_selections_and_narrowed_price() {
        let mut filter = ProductFilter {
            skin_types: vec!["Dry".into()],
            ingredients: vec!["Neem".into(), "Aloe".into()],
            ..ProductFilter::default()
        };
        assert_eq!(filter.active_count(), 3);

        filter.max_price = Some(DEFAULT_MAX_PRICE);
        assert_eq!(filter.active_count(), 3);

        filter.max_price = Some(Decimal::from(500));
        assert_eq!(filter.active_count(), 4);
    }

    #[test]
    fn filter_options_are_unique_in_first_seen_order() {
        let options = FilterOptions::from_products(&catalog());
        assert_eq!(options.skin_types, ["Dry", "Oily", "Sensitive"]);
        assert_eq!(options.ingredients, ["Neem"]);
        assert_eq!(options.fragrances, ["Floral", "Woody", "Fresh", "Herbal"]);
        assert_eq!(options.max_price, DEFAULT_MAX_PRICE);
    }

    #[test]
    fn filter_options_raise_max_price_for_pricey_products() {
        let products = vec![product("x", "Gift Set", 1450, "Dry", "Floral")];
        let options = FilterOptions::from_products(&products);
        assert_eq!(options.max_price, Decimal::from(1450));
    }
}
