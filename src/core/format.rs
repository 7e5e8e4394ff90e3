/// Format a price with a currency symbol, thousands separators and two decimals
///
/// Negative values keep the sign after the symbol, e.g. `₹-1,234.50`.
pub fn format_price(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", symbol, sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_price(0.0, "₹"), "₹0.00");
        assert_eq!(format_price(999.999, "₹"), "₹1,000.00");
        assert_eq!(format_price(1234567.891, "₹"), "₹1,234,567.89");
        assert_eq!(format_price(100000.0, "$"), "$100,000.00");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_price(-1234.5, "₹"), "₹-1,234.50");
        assert_eq!(format_price(-0.001, "₹"), "₹0.00");
    }
}
