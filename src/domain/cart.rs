use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use super::catalog::Product;

/// One persisted cart line. At most one exists per `(user_id, product_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

/// A cart entry joined with the product snapshot it was loaded with.
#[derive(Debug, Clone, PartialEq)]
pub struct CartViewEntry {
    pub entry: CartEntry,
    pub product: Product,
}

impl CartViewEntry {
    pub fn subtotal(&self) -> BigDecimal {
        &self.product.price * BigDecimal::from(self.entry.quantity)
    }

    /// Another unit may be added without exceeding stock.
    pub fn can_increment(&self) -> bool {
        self.entry.quantity < self.product.stock
    }
}

pub fn total(items: &[CartViewEntry]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + item.subtotal())
}

pub fn item_count(items: &[CartViewEntry]) -> i64 {
    items.iter().map(|item| i64::from(item.entry.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn view(price: &str, quantity: i32, stock: i32) -> CartViewEntry {
        let product_id = Uuid::new_v4();
        CartViewEntry {
            entry: CartEntry {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                product_id,
                quantity,
            },
            product: Product {
                id: product_id,
                name: "p".into(),
                description: String::new(),
                price: BigDecimal::from_str(price).expect("valid decimal"),
                stock,
                image_url: String::new(),
                category_id: Uuid::new_v4(),
            },
        }
    }

    #[test]
    fn total_is_exact_sum_of_price_times_quantity() {
        let items = vec![view("25.99", 2, 10), view("10.00", 1, 10)];
        assert_eq!(total(&items), BigDecimal::from_str("61.98").expect("valid decimal"));
    }

    #[test]
    fn total_of_empty_cart_is_zero() {
        assert_eq!(total(&[]), BigDecimal::zero());
    }

    #[test]
    fn item_count_sums_quantities_not_entries() {
        let items = vec![view("1", 2, 10), view("1", 3, 10)];
        assert_eq!(item_count(&items), 5);
    }

    #[test]
    fn can_increment_stops_at_stock() {
        assert!(view("1", 2, 3).can_increment());
        assert!(!view("1", 3, 3).can_increment());
    }
}
