use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// A product as served by the catalog. Fields beyond the four the cart reads
/// are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Remote purchasable quantity for one product at the time it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// One product-quantity pair. Serialized flat, e.g.
/// `{"id":1,"title":"..","price":179.9,"image":"..","amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }
}

/// Absolute quantity requested for a line. Signed: callers may ask for zero
/// or less, which the manager ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Lines in the order they were first added, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.amount)).sum()
    }

    /// Next cart with `line` appended. A line for the same product is replaced
    /// in place so ids stay unique.
    pub fn with_line(&self, line: CartLine) -> Self {
        let mut lines = self.lines.clone();
        match lines
            .iter_mut()
            .find(|existing| existing.product_id() == line.product_id())
        {
            Some(existing) => *existing = line,
            None => lines.push(line),
        }
        Self { lines }
    }

    pub fn without(&self, product_id: ProductId) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|line| line.product_id() != product_id)
                .cloned()
                .collect(),
        }
    }

    /// Next cart with the matching line's amount replaced; `None` when no line
    /// matches.
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Option<Self> {
        if !self.contains(product_id) {
            return None;
        }
        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.product_id() == product_id {
                    CartLine {
                        amount,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        Some(Self { lines })
    }

    /// Drops duplicate ids (first wins) and lines with a zero amount. Used on
    /// hydration so a hand-edited blob cannot break the cart invariants.
    pub(crate) fn normalized(self) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        for line in self.lines {
            if line.amount == 0 || lines.iter().any(|kept| kept.product_id() == line.product_id()) {
                continue;
            }
            lines.push(line);
        }
        Self { lines }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId) -> Product {
        Product {
            id,
            title: format!("Sneaker {}", id),
            price: 139.9,
            image: format!("https://cdn.example.com/{}.jpg", id),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let line = CartLine {
            product: product(1),
            amount: 2,
        };

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Sneaker 1",
                "price": 139.9,
                "image": "https://cdn.example.com/1.jpg",
                "amount": 2
            })
        );
    }

    #[test]
    fn test_cart_parses_stored_array() {
        let blob = r#"[
            {"id": 3, "title": "Runner", "price": 99.5, "image": "r.jpg", "amount": 1},
            {"id": 1, "title": "Trail", "price": 150.0, "image": "t.jpg", "amount": 4}
        ]"#;

        let cart: Cart = serde_json::from_str(blob).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].product_id(), 3);
        assert_eq!(cart.line(1).unwrap().amount, 4);
        assert_eq!(cart.total_units(), 5);
    }

    #[test]
    fn test_product_keeps_unknown_catalog_fields() {
        let json = r#"{"id": 9, "title": "Boot", "price": 10.0, "image": "b.jpg", "brand": "x"}"#;
        let parsed: Product = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "Boot");
        assert_eq!(parsed.extra.get("brand"), Some(&serde_json::json!("x")));
        assert_eq!(serde_json::to_value(&parsed).unwrap()["brand"], "x");
    }

    #[test]
    fn test_cart_line_round_trips_extra_fields_beside_amount() {
        let blob = r#"[{"id": 4, "title": "Court", "price": 80.0, "image": "c.jpg", "color": "red", "amount": 3}]"#;

        let cart: Cart = serde_json::from_str(blob).unwrap();
        let line = cart.line(4).unwrap();
        assert_eq!(line.amount, 3);
        assert_eq!(line.product.extra.len(), 1);
        assert_eq!(line.product.extra["color"], "red");

        let written = serde_json::to_value(&cart).unwrap();
        assert_eq!(written[0]["color"], "red");
        assert_eq!(written[0]["amount"], 3);
    }

    #[test]
    fn test_with_line_keeps_insertion_order_and_uniqueness() {
        let cart = Cart::new()
            .with_line(CartLine::new(product(2)))
            .with_line(CartLine::new(product(1)))
            .with_line(CartLine {
                product: product(2),
                amount: 5,
            });

        let ids: Vec<ProductId> = cart.iter().map(CartLine::product_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(cart.line(2).unwrap().amount, 5);
    }

    #[test]
    fn test_without_preserves_remaining_order() {
        let cart = Cart::new()
            .with_line(CartLine::new(product(1)))
            .with_line(CartLine::new(product(2)))
            .with_line(CartLine::new(product(3)));

        let next = cart.without(2);
        let ids: Vec<ProductId> = next.iter().map(CartLine::product_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_with_amount_on_missing_line_is_none() {
        let cart = Cart::new().with_line(CartLine::new(product(1)));

        assert!(cart.with_amount(7, 3).is_none());
        let updated = cart.with_amount(1, 3).unwrap();
        assert_eq!(updated.line(1).unwrap().amount, 3);
        assert_eq!(updated.line(1).unwrap().product, product(1));
    }

    #[test]
    fn test_normalized_drops_duplicates_and_zero_amounts() {
        let blob = r#"[
            {"id": 1, "title": "A", "price": 1.0, "image": "a", "amount": 2},
            {"id": 2, "title": "B", "price": 1.0, "image": "b", "amount": 0},
            {"id": 1, "title": "A", "price": 1.0, "image": "a", "amount": 9}
        ]"#;

        let cart: Cart = serde_json::from_str(blob).unwrap();
        let cart = cart.normalized();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(1).unwrap().amount, 2);
    }
}
