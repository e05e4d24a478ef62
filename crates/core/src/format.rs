//! Display formatting for prices and stock.

use crate::types::{Price, Stock};

/// Label for unlimited stock.
pub const UNLIMITED_LABEL: &str = "Ilimitado";

/// Label for a product whose stock is unknown.
pub const UNAVAILABLE_LABEL: &str = "No disp.";

/// Format an amount the way es-CL renders CLP: `$` prefix, `.` as the
/// thousands separator, no decimals.
///
/// ```
/// use gymtastic_core::{Price, format::format_currency};
///
/// assert_eq!(format_currency(Price::from_pesos(45000)), "$45.000");
/// ```
#[must_use]
pub fn format_currency(price: Price) -> String {
    let rounded = price.rounded();
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format stock for display. `None` means the stock is not known.
#[must_use]
pub fn format_stock(stock: Option<Stock>) -> String {
    match stock {
        None => UNAVAILABLE_LABEL.to_owned(),
        Some(Stock::Unlimited) => UNLIMITED_LABEL.to_owned(),
        Some(Stock::Limited(units)) => units.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Price::from_pesos(15000)), "$15.000");
        assert_eq!(format_currency(Price::from_pesos(1_234_567)), "$1.234.567");
        assert_eq!(format_currency(Price::from_pesos(999)), "$999");
        assert_eq!(format_currency(Price::ZERO), "$0");
    }

    #[test]
    fn test_format_currency_drops_decimals() {
        assert_eq!(format_currency(Price::new(Decimal::new(99_995, 1))), "$10.000");
        assert_eq!(format_currency(Price::new(Decimal::new(12_344, 1))), "$1.234");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Price::from_pesos(-5000)), "-$5.000");
        assert_eq!(format_currency(Price::new(Decimal::new(-4, 1))), "$0");
    }

    #[test]
    fn test_format_stock() {
        assert_eq!(format_stock(Some(Stock::Unlimited)), "Ilimitado");
        assert_eq!(format_stock(Some(Stock::Limited(50))), "50");
        assert_eq!(format_stock(None), "No disp.");
    }
}
