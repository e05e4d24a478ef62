//! Terminal rendering.
//!
//! Everything the CLI writes to stdout goes through here.

#![allow(clippy::print_stdout)]

use chrono::Utc;

use gymtastic_core::format::{format_currency, format_stock};
use gymtastic_core::{CartLine, Order, Price, Product, User};

pub fn line(text: &str) {
    println!("{text}");
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No hay productos.");
        return;
    }
    println!(
        "{:>4}  {:<32} {:<13} {:>10} {:>10}",
        "ID", "Producto", "Categoría", "Precio", "Stock"
    );
    for product in products {
        println!(
            "{:>4}  {:<32} {:<13} {:>10} {:>10}",
            product.id,
            truncate(&product.name, 32),
            product.category.label(),
            format_currency(product.price),
            format_stock(Some(product.stock)),
        );
    }
}

pub fn product(product: &Product) {
    println!("{} (#{})", product.name, product.id);
    println!("  Categoría: {}", product.category);
    println!("  Precio:    {}", format_currency(product.price));
    println!("  Stock:     {}", format_stock(Some(product.stock)));
    println!("  Imagen:    {}", product.image);
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }
}

pub fn cart(lines: &[CartLine], count: u32, total: Price) {
    if lines.is_empty() {
        println!("Tu carrito está vacío.");
        return;
    }
    for item in lines {
        println!(
            "{:>4}  {:<32} {:>4} x {:>10} = {:>10}",
            item.product.id,
            truncate(&item.product.name, 32),
            item.quantity,
            format_currency(item.product.price),
            format_currency(item.subtotal()),
        );
    }
    println!("{count} productos, total {}", format_currency(total));
}

pub fn user(user: &User) {
    println!("{} <{}> [{}]", user.name, user.email, user.role);
    if let Some(phone) = &user.phone {
        println!("  Teléfono: {phone}");
    }
    if let Some(end) = user.plan_end() {
        let state = if user.has_active_plan(Utc::now()) {
            "vigente hasta"
        } else {
            "vencido el"
        };
        println!("  Plan {state}: {}", end.format("%d-%m-%Y"));
    }
}

pub fn users(users: &[User]) {
    if users.is_empty() {
        println!("No hay usuarios.");
        return;
    }
    for user in users {
        println!("{:<32} {:<28} {}", user.email, truncate(&user.name, 28), user.role);
    }
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No hay órdenes.");
        return;
    }
    for order in orders {
        println!(
            "{:<18} {}  {:<28} {:>3} ítems {:>10}  {}",
            order.id,
            order.date.format("%d-%m-%Y"),
            order.customer.email,
            order.item_count(),
            format_currency(order.total),
            order.status,
        );
    }
}

pub fn order(order: &Order) {
    println!("Orden {} ({})", order.id, order.status);
    println!("  Fecha:   {}", order.date.format("%d-%m-%Y %H:%M"));
    println!(
        "  Cliente: {} {} <{}>",
        order.customer.first_name, order.customer.last_names, order.customer.email
    );
    if !order.customer.commune.is_empty() {
        println!(
            "  Envío:   {}, {}, {}",
            order.customer.street, order.customer.commune, order.customer.region
        );
    }
    for item in &order.items {
        println!("    {} x {}", item.quantity, item.product.name);
    }
    println!("  Total:   {}", format_currency(order.total));
}

pub fn list(items: &[&str]) {
    for item in items {
        println!("{item}");
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Creatina", 32), "Creatina");
        assert_eq!(truncate("Proteína Whey Gold", 8), "Proteín…");
    }
}
