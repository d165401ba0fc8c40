//! Plain-text rendering of storefront data.

use std::fmt::Write as _;

use shopverse_core::format::{stock_label, truncate_text};
use shopverse_core::validation::StrengthMeter;
use shopverse_core::{Cart, InventorySummary, Order, Product, Session};
use shopverse_storefront::CheckoutReceipt;
use shopverse_storefront::state::EMPTY_CART_MESSAGE;

const NAME_WIDTH: usize = 32;
const MISSING_PRODUCT: &str = "Unavailable product";

/// One catalogue row: id, name, price and stock label.
#[must_use]
pub fn product_row(product: &Product) -> String {
    format!(
        "{}  {:<width$}  {:>12}  {}",
        product.id,
        truncate_text(&product.name, NAME_WIDTH),
        product.price.to_string(),
        stock_label(Some(product)),
        width = NAME_WIDTH,
    )
}

#[must_use]
pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(out, "  ID:     {}", product.id);
    let _ = writeln!(out, "  Price:  {}", product.price);
    let _ = writeln!(out, "  Stock:  {} ({})", product.stock, stock_label(Some(product)));
    let _ = writeln!(out, "  Image:  {}", product.image_or_default());
    if !product.description.trim().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.description.trim());
    }
    out
}

#[must_use]
pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return format!("{EMPTY_CART_MESSAGE}\n");
    }

    let mut out = String::new();
    for item in &cart.items {
        let name = item.product.as_ref().map_or(MISSING_PRODUCT, |p| p.name.as_str());
        let _ = writeln!(
            out,
            "{:>3} x {:<width$}  {:>12}",
            item.quantity.unwrap_or(0),
            truncate_text(name, NAME_WIDTH),
            item.subtotal().to_string(),
            width = NAME_WIDTH,
        );
    }
    let _ = writeln!(out, "Items: {}", cart.item_count());
    let _ = writeln!(out, "Total: {}", cart.total());
    out
}

/// One line per order, newest last as the backend returns them.
#[must_use]
pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet\n".to_string();
    }

    let mut out = String::new();
    for order in orders {
        let _ = writeln!(
            out,
            "{}  {:<10}  {:>3} items  {:>12}",
            order.id,
            order.status.label(),
            order.item_count(),
            order.total_amount.to_string(),
        );
    }
    out
}

#[must_use]
pub fn receipt(receipt: &CheckoutReceipt) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order placed: {}", receipt.order.id);
    let _ = writeln!(out, "  Status:   {}", receipt.order.status.label());
    let _ = writeln!(out, "  Total:    {}", receipt.order.total_amount);
    let _ = writeln!(
        out,
        "  Payment:  {} via {} ({})",
        receipt.payment.amount, receipt.payment.payment_method, receipt.payment.status
    );
    out
}

#[must_use]
pub fn inventory(summary: &InventorySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Products:      {}", summary.total);
    let _ = writeln!(
        out,
        "In stock:      {} ({:.0}%)",
        summary.in_stock,
        summary.in_stock_percentage()
    );
    let _ = writeln!(out, "Low stock:     {}", summary.low_stock);
    let _ = writeln!(out, "Out of stock:  {}", summary.out_of_stock);
    out
}

#[must_use]
pub fn whoami(session: Option<&Session>) -> String {
    let Some(session) = session else {
        return "Not logged in\n".to_string();
    };
    let role = if session.is_admin() { "admin" } else { "user" };
    format!("{} <{}> ({role})\n", session.full_name(), session.email)
}

#[must_use]
pub fn strength(meter: &StrengthMeter) -> String {
    let mut out = format!("Password strength: {} ({}/7)\n", meter.label, meter.score);
    for suggestion in &meter.suggestions {
        let _ = writeln!(out, "  - {suggestion}");
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(stock: u32) -> Product {
        serde_json::from_value(json!({
            "id": "p1",
            "name": "Brass Lamp",
            "description": "Hand polished",
            "price": 4500,
            "image_url": "",
            "stock": stock,
        }))
        .unwrap()
    }

    #[test]
    fn test_product_row() {
        let row = product_row(&product(3));
        assert!(row.starts_with("p1  Brass Lamp"));
        assert!(row.contains("Rs. 4,500"));
        assert!(row.ends_with("Low Stock"));
    }

    #[test]
    fn test_product_detail_uses_default_image() {
        let detail = product_detail(&product(0));
        assert!(detail.contains("Stock:  0 (Out of Stock)"));
        assert!(detail.contains("/images/default-product.jpg"));
        assert!(detail.ends_with("Hand polished\n"));
    }

    #[test]
    fn test_cart_rendering() {
        assert_eq!(cart(&Cart::default()), "Your cart is empty\n");

        let cart_value: Cart = serde_json::from_value(json!({
            "id": "c1",
            "user": "u1",
            "items": [
                {"product": {"id": "p1", "name": "Brass Lamp", "price": 1500, "stock": 9}, "quantity": 2},
                {"product": null, "quantity": 1},
            ],
        }))
        .unwrap();
        let text = cart(&cart_value);
        assert!(text.contains("2 x Brass Lamp"));
        assert!(text.contains("Rs. 3,000"));
        assert!(text.contains("Unavailable product"));
        assert!(text.contains("Items: 3"));
        assert!(text.ends_with("Total: Rs. 3,000\n"));
    }

    #[test]
    fn test_orders_rendering() {
        assert_eq!(orders(&[]), "No orders yet\n");

        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "items": [{"quantity": 2, "price": 100, "subtotal": 200}],
            "total_amount": 200,
            "status": "shipped",
        }))
        .unwrap();
        let text = orders(&[order]);
        assert!(text.starts_with("o1  Shipped"));
        assert!(text.contains("2 items"));
        assert!(text.contains("Rs. 200"));
    }

    #[test]
    fn test_inventory_rendering() {
        let summary =
            InventorySummary::from_products(&[product(0), product(3), product(40), product(8)]);
        let text = inventory(&summary);
        assert!(text.contains("Products:      4"));
        assert!(text.contains("In stock:      3 (75%)"));
        assert!(text.contains("Low stock:     1"));
        assert!(text.contains("Out of stock:  1"));
    }

    #[test]
    fn test_whoami() {
        assert_eq!(whoami(None), "Not logged in\n");

        let session: Session = serde_json::from_value(json!({
            "id": "u1",
            "first_name": "Sana",
            "last_name": "Mir",
            "email": "sana@example.com",
            "role": {"id": "r1", "name": ["admin"]},
        }))
        .unwrap();
        assert_eq!(whoami(Some(&session)), "Sana Mir <sana@example.com> (admin)\n");
    }
}
